use eframe::egui::{Rect, Vec2};

use crate::geometry::{segment_distance, segment_intersects_rect};

use super::{Drag, EditorState, FrameOutput, InputFrame, Mode};

const HIT_RADIUS: f32 = 10.0;

impl EditorState {
    pub(super) fn resolve_input(&mut self, input: &InputFrame, output: &mut FrameOutput) {
        if let Some(mode) = input.mode_request {
            self.set_mode(mode);
        }

        if input.primary_pressed && input.pointer_in_canvas {
            self.primary_press(input.pointer_world);
        }

        if input.secondary_pressed && input.pointer_in_canvas {
            self.selected_vertices.clear();
            self.selected_edges.clear();
            self.drag = Drag::RubberBand {
                start: input.pointer_world,
            };
        }

        self.update_drag(input, output);

        if input.primary_released {
            self.primary_release(input.pointer_world);
        }

        if input.secondary_released {
            self.secondary_release(input.pointer_world);
        }

        if input.delete_pressed && self.drag == Drag::Idle {
            self.delete_selected();
        }
    }

    fn primary_press(&mut self, pointer_world: Vec2) {
        match self.mode {
            Mode::Move => match self.vertex_under_cursor(pointer_world) {
                Some(index) => self.grab_vertex(index, pointer_world),
                None => {
                    self.selected_vertices.clear();
                    self.selected_edges.clear();
                    self.drag = Drag::Pan;
                }
            },
            Mode::VertexCreate => match self.vertex_under_cursor(pointer_world) {
                Some(index) => self.grab_vertex(index, pointer_world),
                None => {
                    let index = self.graph.add_vertex(pointer_world);
                    self.selected_vertices.replace(index);
                    self.revision += 1;
                    self.drag = Drag::MoveVertices {
                        last: pointer_world,
                    };
                }
            },
            Mode::EdgeCreate => {
                self.selected_edges.clear();
                match self.vertex_under_cursor(pointer_world) {
                    Some(index) => self.drag = Drag::CreateEdge { from: index },
                    None => {
                        if let Some(edge) = self.edge_under_cursor(pointer_world) {
                            self.selected_edges.replace(edge);
                        }
                    }
                }
            }
        }
    }

    fn grab_vertex(&mut self, index: usize, pointer_world: Vec2) {
        if !self.selected_vertices.contains(index) {
            self.selected_vertices.replace(index);
            self.graph.vertices[index].velocity = Vec2::ZERO;
        }
        self.drag = Drag::MoveVertices {
            last: pointer_world,
        };
    }

    fn update_drag(&mut self, input: &InputFrame, output: &mut FrameOutput) {
        match &mut self.drag {
            Drag::Pan => output.pan_delta = input.pointer_screen_delta,
            Drag::MoveVertices { last } => {
                let delta = input.pointer_world - *last;
                *last = input.pointer_world;
                for &index in self.selected_vertices.as_slice() {
                    self.graph.vertices[index].position += delta;
                }
            }
            Drag::Idle | Drag::CreateEdge { .. } | Drag::RubberBand { .. } => {}
        }
    }

    fn primary_release(&mut self, pointer_world: Vec2) {
        match self.drag {
            Drag::CreateEdge { from } => {
                self.drag = Drag::Idle;
                let Some(to) = self.vertex_under_cursor(pointer_world) else {
                    return;
                };
                if to == from || self.graph.edges.contains(&(from, to)) {
                    return;
                }
                self.graph.edges.push((from, to));
                self.selected_edges.replace(self.graph.edges.len() - 1);
                self.revision += 1;
            }
            Drag::Pan | Drag::MoveVertices { .. } => self.drag = Drag::Idle,
            Drag::Idle | Drag::RubberBand { .. } => {}
        }
    }

    fn secondary_release(&mut self, pointer_world: Vec2) {
        let Drag::RubberBand { start } = self.drag else {
            return;
        };
        self.drag = Drag::Idle;

        let region = Rect::from_two_pos(start.to_pos2(), pointer_world.to_pos2());
        if self.mode == Mode::EdgeCreate {
            let mut hits = Vec::new();
            for (index, &(from, to)) in self.graph.edges.iter().enumerate() {
                if segment_intersects_rect(
                    self.graph.vertices[from].position,
                    self.graph.vertices[to].position,
                    region,
                ) {
                    hits.push(index);
                }
            }
            self.selected_edges.assign(hits);
        } else {
            let mut hits = Vec::new();
            for (index, vertex) in self.graph.vertices.iter().enumerate() {
                if region.contains(vertex.position.to_pos2()) {
                    hits.push(index);
                }
            }
            hits.sort_unstable();
            self.selected_vertices.assign(hits);
        }
    }

    pub fn vertex_under_cursor(&self, pointer_world: Vec2) -> Option<usize> {
        let within = |index: usize| {
            (self.graph.vertices[index].position - pointer_world).length() < HIT_RADIUS
        };

        for &index in self.selected_vertices.as_slice() {
            if within(index) {
                return Some(index);
            }
        }
        (0..self.graph.vertices.len()).rev().find(|&index| within(index))
    }

    pub fn edge_under_cursor(&self, pointer_world: Vec2) -> Option<usize> {
        let within = |index: usize| {
            let (from, to) = self.graph.edges[index];
            segment_distance(
                pointer_world,
                self.graph.vertices[from].position,
                self.graph.vertices[to].position,
            ) < HIT_RADIUS
        };

        for &index in self.selected_edges.as_slice() {
            if within(index) {
                return Some(index);
            }
        }
        (0..self.graph.edges.len()).find(|&index| within(index))
    }
}
