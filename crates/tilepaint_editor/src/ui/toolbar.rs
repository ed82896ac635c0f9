//! Toolbar and status bar

use bevy_egui::egui;
use tilepaint_core::{Command, Tool};

use super::{ImageLoadState, PendingAction, TilesetTexture};
use crate::project::Project;
use crate::EditorState;

/// Render the toolbar
pub fn render_toolbar(ctx: &egui::Context, editor_state: &mut EditorState, project: &mut Project) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Tools:");
            let current = project.session.current_tool();
            for tool in Tool::ALL {
                if ui
                    .selectable_label(current == tool, tool.label())
                    .on_hover_text(format!("{} ({})", tool.label(), tool.shortcut()))
                    .clicked()
                {
                    project.send(Command::SelectTool(tool));
                }
            }

            ui.separator();

            let history = project.session.history();
            if ui
                .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                .on_hover_text("Ctrl+Z")
                .clicked()
            {
                editor_state.pending_action = Some(PendingAction::Undo);
            }
            if ui
                .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                .on_hover_text("Ctrl+Y")
                .clicked()
            {
                editor_state.pending_action = Some(PendingAction::Redo);
            }

            ui.separator();

            ui.checkbox(&mut editor_state.show_grid, "Grid");

            ui.separator();

            // Zoom controls (Shift+wheel on the canvas)
            if ui.button("-").clicked() {
                project.send(Command::ZoomStep { delta: 1.0 });
            }
            ui.label(format!("{}%", project.session.view().zoom_percent()));
            if ui.button("+").clicked() {
                project.send(Command::ZoomStep { delta: -1.0 });
            }

            ui.separator();
            if ui.button("Export").on_hover_text("Ctrl+E").clicked() {
                editor_state.pending_action = Some(PendingAction::Export);
            }
        });
    });
}

/// Render the status bar at the bottom of the window
pub fn render_status_bar(ctx: &egui::Context, project: &Project, tileset: &TilesetTexture) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let session = &project.session;
            match session.hover_tile() {
                Some((x, y)) => ui.label(format!("X: {}  Y: {}", x, y)),
                None => ui.label("X: -  Y: -"),
            };
            ui.separator();
            ui.label(format!("Zoom: {}%", session.view().zoom_percent()));
            ui.separator();
            ui.label(format!("Tile: {}", session.selected_tile()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                match &tileset.state {
                    ImageLoadState::Failed(e) => {
                        ui.colored_label(egui::Color32::from_rgb(200, 160, 60), e);
                    }
                    ImageLoadState::Loading | ImageLoadState::Pending => {
                        ui.label("Loading tileset...");
                    }
                    ImageLoadState::Loaded => {}
                }
            });
        });
    });
}
