pub mod import;

use eframe::egui::Vec2;

use import::GraphFile;

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub label: Option<String>,
}

impl Vertex {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            label: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStore {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<(usize, usize)>,
}

impl GraphStore {
    pub fn add_vertex(&mut self, position: Vec2) -> usize {
        self.vertices.push(Vertex::at(position));
        self.vertices.len() - 1
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn to_graph_file(&self) -> GraphFile {
        GraphFile {
            vertices: self
                .vertices
                .iter()
                .map(|vertex| vertex.label.clone().unwrap_or_default())
                .collect(),
            edges: self.edges.clone(),
        }
    }
}
