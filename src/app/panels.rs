use eframe::egui::{self, Align, Context, Layout, Ui};

use crate::editor::Mode;

use super::LinkpadApp;

impl LinkpadApp {
    pub(super) fn draw_top_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("linkpad");
                    ui.separator();
                    ui.label(format!("vertices: {}", self.editor.graph.vertex_count()));
                    ui.label(format!("edges: {}", self.editor.graph.edge_count()));
                    ui.separator();
                    ui.label(format!("tool: {}", self.editor.mode.label()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.fps_display_text());
                    });
                });
            });
    }

    pub(super) fn draw_controls_panel(&mut self, ctx: &Context) {
        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_controls(ui));
    }

    fn draw_controls(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        ui.heading("Tools");
        ui.separator();

        let mut mode_request = None;
        if ui
            .selectable_label(self.editor.mode == Mode::Move, "Move (1)")
            .on_hover_text("Drag vertices or pan the canvas; click empty space to clear the selection.")
            .clicked()
        {
            mode_request = Some(Mode::Move);
        }
        if ui
            .selectable_label(self.editor.mode == Mode::VertexCreate, "Add vertex (2)")
            .on_hover_text("Click empty space to add a vertex; existing vertices still drag.")
            .clicked()
        {
            mode_request = Some(Mode::VertexCreate);
        }
        if ui
            .selectable_label(self.editor.mode == Mode::EdgeCreate, "Add edge (3)")
            .on_hover_text("Drag from one vertex to another to connect them; click an edge to select it.")
            .clicked()
        {
            mode_request = Some(Mode::EdgeCreate);
        }
        if let Some(mode) = mode_request {
            self.editor.set_mode(mode);
        }

        ui.separator();

        ui.checkbox(&mut self.editor.simulate, "Auto layout")
            .on_hover_text("Step the force simulation every frame; selected vertices stay pinned.");
        ui.checkbox(&mut self.show_quadtree_overlay, "Quadtree overlay")
            .on_hover_text("Draw the spatial partition used by the repulsion pass.");

        ui.separator();

        ui.label("Search labels");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy match against vertex labels; everything else dims.");

        ui.separator();

        ui.label(format!(
            "selected: {} vertices, {} edges",
            self.editor.selected_vertices.len(),
            self.editor.selected_edges.len()
        ));

        ui.separator();

        if ui
            .add_enabled(
                self.graph_path.is_some(),
                egui::Button::new("Reload graph (F5)"),
            )
            .on_hover_text("Re-import the graph file given on the command line.")
            .clicked()
        {
            self.import_graph();
        }
        if ui
            .button("Export graph")
            .on_hover_text("Write the current vertices and edges back to a graph file.")
            .clicked()
        {
            self.export_graph();
        }
        if ui.button("Save session").clicked() {
            self.save_session();
        }
        if ui
            .button("Restore session (F6)")
            .on_hover_text("Rebuild the editor from the last saved session file.")
            .clicked()
        {
            self.restore_session();
        }

        ui.separator();
        if !self.status.is_empty() {
            ui.label(self.status.as_str());
        }

        ui.add_space(8.0);
        ui.label("Right-drag sweeps a rubber-band selection; Delete removes it.");
    }
}
