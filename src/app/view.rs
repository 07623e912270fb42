use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{
    self, Align2, Color32, FontId, Key, PointerButton, Pos2, Rect, Sense, Shape, Stroke, Ui, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::editor::{Drag, InputFrame, Mode};
use crate::geometry::segment_intersects_rect;
use crate::physics;

use super::LinkpadApp;
use super::render_utils::{
    blend_color, dim_color, draw_background, regular_polygon_points, screen_to_world,
    world_to_screen,
};

const VERTEX_RADIUS: f32 = 10.0;
const VERTEX_SIDES: usize = 6;
const LABEL_ZOOM_THRESHOLD: f32 = 0.8;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl LinkpadApp {
    pub(super) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);
        self.handle_canvas_zoom(ui, rect, &response);

        let input = self.gather_input(ui, rect, &response);
        let frame_output = self.editor.frame(&input);
        self.pan += frame_output.pan_delta;

        if self.editor.simulate || self.editor.drag != Drag::Idle {
            ui.ctx().request_repaint();
        }

        let pointer_world = input.pointer_world;
        let hovered_vertex = if response.hovered() {
            self.editor.vertex_under_cursor(pointer_world)
        } else {
            None
        };
        if hovered_vertex.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let search_matches = self.cached_search_matches();
        let search_active = search_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());

        let band_region = match self.editor.drag {
            Drag::RubberBand { start } => {
                Some(Rect::from_two_pos(start.to_pos2(), pointer_world.to_pos2()))
            }
            _ => None,
        };

        if self.show_quadtree_overlay {
            let nodes = physics::quadtree_nodes(&self.editor.graph, &mut self.editor.scratch);
            for node in nodes {
                let min = node.bounds.position;
                let max = node.bounds.position + node.bounds.size;
                let top_left = world_to_screen(rect, self.pan, self.zoom, min);
                let top_right = world_to_screen(rect, self.pan, self.zoom, vec2(max.x, min.y));
                let bottom_right = world_to_screen(rect, self.pan, self.zoom, max);
                let bottom_left = world_to_screen(rect, self.pan, self.zoom, vec2(min.x, max.y));

                let alpha = if node.is_leaf() { 110 } else { 55 };
                let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(106, 198, 255, alpha));
                painter.line_segment([top_left, top_right], stroke);
                painter.line_segment([top_right, bottom_right], stroke);
                painter.line_segment([bottom_right, bottom_left], stroke);
                painter.line_segment([bottom_left, top_left], stroke);
            }
        }

        let screen_positions: Vec<Pos2> = self
            .editor
            .graph
            .vertices
            .iter()
            .map(|vertex| world_to_screen(rect, self.pan, self.zoom, vertex.position))
            .collect();

        for (index, &(from, to)) in self.editor.graph.edges.iter().enumerate() {
            let start = screen_positions[from];
            let end = screen_positions[to];

            let is_selected = self.editor.selected_edges.contains(index);
            let in_band = self.editor.mode == Mode::EdgeCreate
                && band_region.is_some_and(|region| {
                    segment_intersects_rect(
                        self.editor.graph.vertices[from].position,
                        self.editor.graph.vertices[to].position,
                        region,
                    )
                });

            let (line_width, line_color) = if is_selected {
                (2.4, Color32::from_rgb(245, 206, 93))
            } else if in_band {
                (2.0, Color32::from_rgba_unmultiplied(103, 196, 255, 220))
            } else {
                (1.4, Color32::from_rgba_unmultiplied(120, 128, 138, 200))
            };
            painter.line_segment([start, end], Stroke::new(line_width, line_color));
        }

        if let Drag::CreateEdge { from } = self.editor.drag {
            let start = screen_positions[from];
            let end = world_to_screen(rect, self.pan, self.zoom, pointer_world);
            painter.line_segment(
                [start, end],
                Stroke::new(1.6, Color32::from_rgba_unmultiplied(245, 206, 93, 170)),
            );
        }

        let radius = (VERTEX_RADIUS * self.zoom).max(2.5);
        let base_color = Color32::from_rgb(96, 146, 205);
        for (index, vertex) in self.editor.graph.vertices.iter().enumerate() {
            let position = screen_positions[index];

            let is_selected = self.editor.selected_vertices.contains(index);
            let is_hovered = hovered_vertex == Some(index);
            let is_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));
            let in_band = self.editor.mode != Mode::EdgeCreate
                && band_region.is_some_and(|region| region.contains(vertex.position.to_pos2()));

            let color = if is_selected {
                Color32::from_rgb(245, 206, 93)
            } else if is_hovered {
                Color32::from_rgb(255, 164, 101)
            } else if in_band {
                blend_color(base_color, Color32::from_rgb(103, 196, 255), 0.80)
            } else if is_match {
                blend_color(base_color, Color32::from_rgb(103, 196, 255), 0.68)
            } else if search_active {
                dim_color(base_color, 0.38)
            } else {
                base_color
            };

            let outline_width = if is_selected || is_hovered { 1.8 } else { 1.0 };
            let points = regular_polygon_points(
                position,
                radius,
                VERTEX_SIDES,
                -std::f32::consts::FRAC_PI_2,
            );
            painter.add(Shape::convex_polygon(
                points,
                color,
                Stroke::new(outline_width, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
            ));

            let show_label =
                is_selected || is_hovered || is_match || self.zoom > LABEL_ZOOM_THRESHOLD;
            if show_label && let Some(label) = &vertex.label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    label,
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(region) = band_region {
            let top_left = world_to_screen(rect, self.pan, self.zoom, region.min.to_vec2());
            let bottom_right = world_to_screen(rect, self.pan, self.zoom, region.max.to_vec2());
            let screen_region = Rect::from_two_pos(top_left, bottom_right);

            painter.rect_filled(
                screen_region,
                0.0,
                Color32::from_rgba_unmultiplied(103, 196, 255, 26),
            );
            let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(103, 196, 255, 170));
            painter.line_segment([screen_region.left_top(), screen_region.right_top()], stroke);
            painter.line_segment(
                [screen_region.right_top(), screen_region.right_bottom()],
                stroke,
            );
            painter.line_segment(
                [screen_region.right_bottom(), screen_region.left_bottom()],
                stroke,
            );
            painter.line_segment(
                [screen_region.left_bottom(), screen_region.left_top()],
                stroke,
            );
        }
    }

    fn gather_input(&self, ui: &Ui, rect: Rect, response: &egui::Response) -> InputFrame {
        let (
            pointer_screen,
            pointer_screen_delta,
            primary_pressed,
            primary_released,
            secondary_pressed,
            secondary_released,
            frame_seconds,
        ) = ui.input(|input| {
            (
                input.pointer.latest_pos().unwrap_or_else(|| rect.center()),
                input.pointer.delta(),
                input.pointer.button_pressed(PointerButton::Primary),
                input.pointer.button_released(PointerButton::Primary),
                input.pointer.button_pressed(PointerButton::Secondary),
                input.pointer.button_released(PointerButton::Secondary),
                input.stable_dt,
            )
        });

        let (mode_request, delete_pressed) = if ui.ctx().wants_keyboard_input() {
            (None, false)
        } else {
            ui.input(|input| {
                let mode_request = if input.key_pressed(Key::Num1) {
                    Some(Mode::Move)
                } else if input.key_pressed(Key::Num2) {
                    Some(Mode::VertexCreate)
                } else if input.key_pressed(Key::Num3) {
                    Some(Mode::EdgeCreate)
                } else {
                    None
                };
                (mode_request, input.key_pressed(Key::Delete))
            })
        };

        InputFrame {
            pointer_world: screen_to_world(rect, self.pan, self.zoom, pointer_screen),
            pointer_screen_delta,
            pointer_in_canvas: response.hovered(),
            primary_pressed,
            primary_released,
            secondary_pressed,
            secondary_released,
            delete_pressed,
            mode_request,
            frame_seconds,
        }
    }

    fn handle_canvas_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.revision == self.editor.revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .editor
            .graph
            .vertices
            .iter()
            .enumerate()
            .filter_map(|(index, vertex)| {
                let label = vertex.label.as_deref()?;
                fuzzy_match_score(&matcher, label, query).map(|_| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(super::SearchMatchCache {
            query: query.to_owned(),
            revision: self.editor.revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }
}
