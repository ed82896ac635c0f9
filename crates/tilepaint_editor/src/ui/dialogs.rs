//! Dialog windows for the editor

use bevy_egui::egui;

use crate::project::Project;
use crate::EditorState;

/// Actions that can be triggered from menus, the toolbar or shortcuts
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    New,
    Open,
    Save,
    SaveAs,
    /// Generate the Lua table and show the export window
    Export,
    Undo,
    Redo,
}

/// Render all dialogs and run pending file actions
pub fn render_dialogs(ctx: &egui::Context, editor_state: &mut EditorState, project: &mut Project) {
    render_export_dialog(ctx, editor_state);
    render_error_dialog(ctx, editor_state);

    let Some(action) = editor_state.pending_action.take() else {
        return;
    };

    match action {
        PendingAction::New => {
            project.new_map();
            bevy::log::info!("Started a new map");
        }
        PendingAction::Open => {
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Map Project", &["json"])
                    .pick_file()
                {
                    match project.open(&path) {
                        Ok(()) => {
                            bevy::log::info!("Opened project {:?}", path);
                            editor_state.pending_add_recent_project = Some(path);
                        }
                        Err(e) => {
                            bevy::log::error!("Failed to open {:?}: {}", path, e);
                            editor_state.error_message =
                                Some(format!("Failed to load project: {}", e));
                        }
                    }
                }
            }
        }
        PendingAction::Save => {
            if project.path.is_some() {
                match project.save_current() {
                    Ok(()) => bevy::log::info!("Saved project {:?}", project.path),
                    Err(e) => {
                        bevy::log::error!("Failed to save project: {}", e);
                        editor_state.error_message = Some(format!("Failed to save: {}", e));
                    }
                }
            } else {
                // No path set, trigger Save As
                editor_state.pending_action = Some(PendingAction::SaveAs);
            }
        }
        PendingAction::SaveAs => {
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Map Project", &["json"])
                    .set_file_name(tilepaint_core::default_project_file_name())
                    .save_file()
                {
                    match project.save(&path) {
                        Ok(()) => {
                            bevy::log::info!("Saved project {:?}", path);
                            editor_state.pending_add_recent_project = Some(path);
                        }
                        Err(e) => {
                            bevy::log::error!("Failed to save {:?}: {}", path, e);
                            editor_state.error_message = Some(format!("Failed to save: {}", e));
                        }
                    }
                }
            }
        }
        PendingAction::Export => {
            editor_state.export_code = project.session.tile_table().to_lua();
            editor_state.show_export_dialog = true;
            bevy::log::debug!(
                "Generated Lua export ({} bytes)",
                editor_state.export_code.len()
            );
        }
        // Edit actions are applied in process_edit_actions
        PendingAction::Undo | PendingAction::Redo => {
            editor_state.pending_action = Some(action);
        }
    }
}

fn render_export_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    if !editor_state.show_export_dialog {
        return;
    }

    let mut open = true;
    egui::Window::new("Export")
        .open(&mut open)
        .collapsible(false)
        .default_size([480.0, 400.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Copy").clicked() {
                    ui.ctx().copy_text(editor_state.export_code.clone());
                }
                #[cfg(feature = "native")]
                {
                    if ui.button("Save As...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Lua", &["lua"])
                            .set_file_name("map.lua")
                            .save_file()
                        {
                            match crate::project::write_export(&path, &editor_state.export_code) {
                                Ok(()) => bevy::log::info!("Exported map to {:?}", path),
                                Err(e) => {
                                    bevy::log::error!("Failed to export {:?}: {}", path, e);
                                    editor_state.error_message =
                                        Some(format!("Failed to export: {}", e));
                                }
                            }
                        }
                    }
                }
            });
            ui.separator();
            egui::ScrollArea::both()
                .id_salt("export_scroll")
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut editor_state.export_code.as_str())
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
        });

    if !open {
        editor_state.show_export_dialog = false;
    }
}

fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(error_msg) = editor_state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}
