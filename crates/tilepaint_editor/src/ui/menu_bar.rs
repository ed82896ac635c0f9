//! Menu bar UI

use bevy_egui::egui;
use std::path::PathBuf;

use super::PendingAction;
use crate::preferences::EditorPreferences;
use crate::project::Project;
use crate::EditorState;

/// Render the menu bar
pub fn render_menu_bar(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    project: &Project,
    preferences: &EditorPreferences,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Map").clicked() {
                    editor_state.pending_action = Some(PendingAction::New);
                    ui.close();
                }
                if ui.button("Open...").clicked() {
                    editor_state.pending_action = Some(PendingAction::Open);
                    ui.close();
                }

                ui.menu_button("Open Recent", |ui| {
                    if preferences.recent_projects.is_empty() {
                        ui.label("(No recent projects)");
                    } else {
                        for recent in &preferences.recent_projects {
                            if ui
                                .button(&recent.name)
                                .on_hover_text(&recent.path)
                                .clicked()
                            {
                                editor_state.pending_open_recent_project =
                                    Some(PathBuf::from(&recent.path));
                                ui.close();
                            }
                        }
                        ui.separator();
                        if ui.button("Clear Recent Projects").clicked() {
                            editor_state.pending_clear_recent_projects = true;
                            ui.close();
                        }
                    }
                });

                ui.separator();
                if ui.button("Save").clicked() {
                    editor_state.pending_action = Some(PendingAction::Save);
                    ui.close();
                }
                if ui.button("Save As...").clicked() {
                    editor_state.pending_action = Some(PendingAction::SaveAs);
                    ui.close();
                }
                ui.separator();
                if ui.button("Export Lua...").clicked() {
                    editor_state.pending_action = Some(PendingAction::Export);
                    ui.close();
                }
            });

            ui.menu_button("Edit", |ui| {
                let history = project.session.history();
                if ui
                    .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    editor_state.pending_action = Some(PendingAction::Undo);
                    ui.close();
                }
                if ui
                    .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    editor_state.pending_action = Some(PendingAction::Redo);
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                if ui
                    .checkbox(&mut editor_state.show_grid, "Show Grid")
                    .clicked()
                {
                    ui.close();
                }
            });

            // Project status on the right
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dirty_indicator = if project.is_dirty() { " *" } else { "" };
                ui.label(format!("{}{}", project.name(), dirty_indicator));
            });
        });
    });
}
