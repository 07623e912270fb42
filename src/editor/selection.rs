use super::EditorState;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: Vec<usize>,
}

impl SelectionSet {
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn replace(&mut self, index: usize) {
        self.indices.clear();
        self.indices.push(index);
    }

    pub fn assign(&mut self, indices: Vec<usize>) {
        self.indices = indices;
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl EditorState {
    pub fn delete_selected(&mut self) {
        if self.selected_vertices.is_empty() && self.selected_edges.is_empty() {
            return;
        }

        for &edge_index in self.selected_edges.as_slice().iter().rev() {
            self.graph.edges.swap_remove(edge_index);
        }

        let removed = self.selected_vertices.as_slice();
        if !removed.is_empty() {
            self.graph.edges.retain_mut(|(from, to)| {
                let (Err(from_shift), Err(to_shift)) =
                    (removed.binary_search(from), removed.binary_search(to))
                else {
                    return false;
                };
                *from -= from_shift;
                *to -= to_shift;
                true
            });

            let mut write = 0;
            for read in 0..self.graph.vertices.len() {
                if removed.binary_search(&read).is_ok() {
                    continue;
                }
                self.graph.vertices.swap(write, read);
                write += 1;
            }
            self.graph.vertices.truncate(write);
        }

        self.selected_vertices.clear();
        self.selected_edges.clear();
        self.revision += 1;
    }
}
