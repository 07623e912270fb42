use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use eframe::egui::{self, Context, Key, Vec2};

use crate::editor::{EditorState, snapshot};
use crate::graph::import;

mod panels;
mod render_utils;
mod view;

pub struct LinkpadApp {
    editor: EditorState,
    pan: Vec2,
    zoom: f32,
    graph_path: Option<String>,
    session_path: String,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    show_quadtree_overlay: bool,
    status: String,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

struct SearchMatchCache {
    query: String,
    revision: u64,
    matches: Arc<HashSet<usize>>,
}

impl LinkpadApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        graph_path: Option<String>,
        session_path: String,
    ) -> Self {
        let mut app = Self {
            editor: EditorState::default(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            graph_path,
            session_path,
            search: String::new(),
            search_match_cache: None,
            show_quadtree_overlay: false,
            status: String::new(),
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        };

        if app.graph_path.is_some() {
            app.import_graph();
        } else {
            app.status = "Empty canvas; keys 1/2/3 switch tools".to_owned();
        }
        app
    }

    fn import_graph(&mut self) {
        let Some(path) = self.graph_path.clone() else {
            self.status = "No graph file was given on the command line".to_owned();
            return;
        };

        match import::load_graph_file(&path).and_then(|file| self.editor.import(&file)) {
            Ok(()) => {
                self.search_match_cache = None;
                self.status = format!(
                    "Imported {path}: {} vertices, {} edges",
                    self.editor.graph.vertex_count(),
                    self.editor.graph.edge_count()
                );
            }
            Err(error) => self.status = format!("Import failed: {error:#}"),
        }
    }

    fn export_graph(&mut self) {
        let path = self
            .graph_path
            .clone()
            .unwrap_or_else(|| "linkpad-graph.json".to_owned());

        match import::save_graph_file(&path, &self.editor.export()) {
            Ok(()) => self.status = format!("Exported graph to {path}"),
            Err(error) => self.status = format!("Export failed: {error:#}"),
        }
    }

    fn save_session(&mut self) {
        match snapshot::save_session_file(&self.session_path, &self.editor) {
            Ok(()) => self.status = format!("Session saved to {}", self.session_path),
            Err(error) => self.status = format!("Session save failed: {error:#}"),
        }
    }

    fn restore_session(&mut self) {
        match snapshot::load_session_file(&self.session_path) {
            Ok(editor) => {
                self.editor = editor;
                self.search_match_cache = None;
                self.status = format!("Session restored from {}", self.session_path);
            }
            Err(error) => self.status = format!("Session restore failed: {error:#}"),
        }
    }

    fn handle_reload_keys(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (reload_graph, restore_session) =
            ctx.input(|input| (input.key_pressed(Key::F5), input.key_pressed(Key::F6)));

        if reload_graph {
            self.import_graph();
        }
        if restore_session {
            self.restore_session();
        }
    }

    fn update_fps_counter(&mut self, ctx: &Context) {
        const FPS_SAMPLE_WINDOW: usize = 120;

        let frame_seconds = ctx.input(|input| input.stable_dt);
        if frame_seconds <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / frame_seconds).clamp(0.0, 1000.0);
        self.fps_samples.push_back(self.fps_current);
        while self.fps_samples.len() > FPS_SAMPLE_WINDOW {
            self.fps_samples.pop_front();
        }
    }

    fn fps_display_text(&self) -> String {
        let average = if self.fps_samples.is_empty() {
            self.fps_current
        } else {
            self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32
        };
        format!("FPS {:.0} | avg {average:.1}", self.fps_current)
    }
}

impl eframe::App for LinkpadApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.update_fps_counter(ctx);
        self.handle_reload_keys(ctx);

        self.draw_top_bar(ctx);
        self.draw_controls_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| self.draw_canvas(ui));
    }
}
