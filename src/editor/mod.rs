mod interaction;
mod selection;
pub mod snapshot;

pub use selection::SelectionSet;

use anyhow::Result;
use eframe::egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::graph::GraphStore;
use crate::graph::import::{self, GraphFile};
use crate::physics::{self, PhysicsScratch};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Mode {
    #[default]
    Move,
    VertexCreate,
    EdgeCreate,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Move => "Move",
            Self::VertexCreate => "Add vertex",
            Self::EdgeCreate => "Add edge",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Drag {
    #[default]
    Idle,
    Pan,
    MoveVertices { last: Vec2 },
    CreateEdge { from: usize },
    RubberBand { start: Vec2 },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputFrame {
    pub pointer_world: Vec2,
    pub pointer_screen_delta: Vec2,
    pub pointer_in_canvas: bool,
    pub primary_pressed: bool,
    pub primary_released: bool,
    pub secondary_pressed: bool,
    pub secondary_released: bool,
    pub delete_pressed: bool,
    pub mode_request: Option<Mode>,
    pub frame_seconds: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameOutput {
    pub pan_delta: Vec2,
}

#[derive(Default)]
pub struct EditorState {
    pub graph: GraphStore,
    pub selected_vertices: SelectionSet,
    pub selected_edges: SelectionSet,
    pub mode: Mode,
    pub drag: Drag,
    pub simulate: bool,
    pub revision: u64,
    pub scratch: PhysicsScratch,
}

impl EditorState {
    pub fn frame(&mut self, input: &InputFrame) -> FrameOutput {
        let mut output = FrameOutput::default();
        self.resolve_input(input, &mut output);

        if self.simulate {
            physics::step_simulation(
                &mut self.graph,
                self.selected_vertices.as_slice(),
                &mut self.scratch,
                input.frame_seconds,
            );
        }

        output
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.drag = Drag::Idle;
    }

    pub fn import(&mut self, file: &GraphFile) -> Result<()> {
        self.graph = import::build_store(file)?;
        self.selected_vertices.clear();
        self.selected_edges.clear();
        self.drag = Drag::Idle;
        self.revision += 1;
        Ok(())
    }

    pub fn export(&self) -> GraphFile {
        self.graph.to_graph_file()
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn rejected_import_leaves_the_editor_untouched() {
        let mut editor = EditorState::default();
        editor.graph.add_vertex(vec2(1.0, 2.0));
        editor.graph.add_vertex(vec2(3.0, 4.0));
        editor.graph.edges.push((0, 1));
        editor.selected_vertices.assign(vec![0]);

        let file = GraphFile {
            vertices: vec!["x".to_owned(), "y".to_owned()],
            edges: vec![(0, 2)],
        };

        assert!(editor.import(&file).is_err());
        assert_eq!(editor.graph.vertex_count(), 2);
        assert_eq!(editor.graph.vertices[0].position, vec2(1.0, 2.0));
        assert_eq!(editor.graph.edges, [(0, 1)]);
        assert_eq!(editor.selected_vertices.as_slice(), [0]);
        assert_eq!(editor.revision, 0);
    }

    #[test]
    fn accepted_import_replaces_the_graph_and_resets_interaction() {
        let mut editor = EditorState::default();
        editor.graph.add_vertex(vec2(9.0, 9.0));
        editor.selected_vertices.assign(vec![0]);
        editor.drag = Drag::RubberBand {
            start: vec2(0.0, 0.0),
        };

        let file = GraphFile {
            vertices: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            edges: vec![(0, 1), (1, 2)],
        };

        editor.import(&file).unwrap();
        assert_eq!(editor.graph.vertex_count(), 3);
        assert_eq!(editor.graph.edges, [(0, 1), (1, 2)]);
        assert!(editor.selected_vertices.is_empty());
        assert_eq!(editor.drag, Drag::Idle);
        assert_eq!(editor.revision, 1);
    }

    #[test]
    fn physics_runs_only_while_simulate_is_on() {
        let mut editor = EditorState::default();
        editor.graph.add_vertex(vec2(0.0, 0.0));
        editor.graph.add_vertex(vec2(100.0, 0.0));

        let input = InputFrame {
            frame_seconds: 1.0 / 60.0,
            ..InputFrame::default()
        };

        editor.frame(&input);
        assert_eq!(editor.graph.vertices[1].position, vec2(100.0, 0.0));

        editor.simulate = true;
        editor.frame(&input);
        assert_ne!(editor.graph.vertices[1].position, vec2(100.0, 0.0));
    }
}
