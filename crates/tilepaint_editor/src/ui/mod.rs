//! Editor UI components using bevy_egui
//!
//! This module provides the panels, canvas and dialogs for the editor.

mod canvas;
mod dialogs;
mod menu_bar;
mod palette;
mod toolbar;

pub use canvas::{fallback_color, render_canvas, tile_uv};
pub use dialogs::*;
pub use menu_bar::render_menu_bar;
pub use palette::render_palette;
pub use toolbar::{render_status_bar, render_toolbar};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass, EguiTextureHandle};
use tilepaint_core::Command;

use crate::preferences::EditorPreferences;
use crate::project::Project;
use crate::{AssetsBasePath, EditorState};

/// State of an image load operation
#[derive(Debug, Clone, PartialEq)]
pub enum ImageLoadState {
    /// Not yet started loading
    Pending,
    /// Currently loading
    Loading,
    /// Successfully loaded
    Loaded,
    /// Failed to load
    Failed(String),
}

/// Resource tracking the tileset texture used by the canvas and palette
#[derive(Resource)]
pub struct TilesetTexture {
    /// Asset path the handle was loaded from
    pub path: String,
    pub handle: Option<Handle<Image>>,
    pub texture_id: Option<egui::TextureId>,
    /// Image size in pixels
    pub size: egui::Vec2,
    pub state: ImageLoadState,
}

impl Default for TilesetTexture {
    fn default() -> Self {
        Self {
            path: String::new(),
            handle: None,
            texture_id: None,
            size: egui::Vec2::ZERO,
            state: ImageLoadState::Pending,
        }
    }
}

impl TilesetTexture {
    /// Loaded texture and its pixel size, if available
    pub fn texture(&self) -> Option<(egui::TextureId, egui::Vec2)> {
        match (&self.state, self.texture_id) {
            (ImageLoadState::Loaded, Some(id)) => Some((id, self.size)),
            _ => None,
        }
    }

    /// Whether loading has finished, successfully or not
    ///
    /// Pointer input is ignored until this is true.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, ImageLoadState::Loaded | ImageLoadState::Failed(_))
    }
}

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TilesetTexture>()
            .add_systems(Update, (load_tileset_texture, process_edit_actions))
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// System to load the tileset texture and register it with egui
fn load_tileset_texture(
    project: Res<Project>,
    mut tileset: ResMut<TilesetTexture>,
    mut contexts: EguiContexts,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    assets_base_path: Res<AssetsBasePath>,
) {
    use bevy::asset::LoadState;

    let wanted = &project.session.config().tileset_path;
    if tileset.path != *wanted {
        // Convert backslashes to forward slashes for Bevy
        let asset_path = wanted.replace('\\', "/");
        bevy::log::info!("Loading tileset {}", asset_path);
        let handle: Handle<Image> = asset_server.load(asset_path);
        *tileset = TilesetTexture {
            path: wanted.clone(),
            handle: Some(handle),
            state: ImageLoadState::Loading,
            ..Default::default()
        };
        return;
    }

    if tileset.state != ImageLoadState::Loading {
        return;
    }
    let Some(handle) = tileset.handle.clone() else {
        return;
    };

    match asset_server.load_state(&handle) {
        LoadState::Loaded => {
            if let Some(image) = images.get(&handle) {
                let size = egui::vec2(image.width() as f32, image.height() as f32);
                let texture_id = contexts.add_image(EguiTextureHandle::Strong(handle.clone()));
                bevy::log::info!(
                    "Tileset loaded: {} -> {}x{} px",
                    tileset.path,
                    size.x as u32,
                    size.y as u32
                );
                tileset.texture_id = Some(texture_id);
                tileset.size = size;
                tileset.state = ImageLoadState::Loaded;
            }
        }
        LoadState::Failed(e) => {
            let full_path = assets_base_path.path().join(&tileset.path);
            bevy::log::warn!("Failed to load tileset {:?}: {}", full_path, e);
            tileset.state =
                ImageLoadState::Failed(format!("Failed to load: {}", full_path.display()));
        }
        LoadState::Loading | LoadState::NotLoaded => {}
    }
}

/// Applies edit actions queued by menus, the toolbar or shortcuts
fn process_edit_actions(mut editor_state: ResMut<EditorState>, mut project: ResMut<Project>) {
    let Some(action) = editor_state.pending_action.take() else {
        return;
    };

    let command = match action {
        PendingAction::Undo => Command::Undo,
        PendingAction::Redo => Command::Redo,
        // File operations are handled in dialogs.rs
        _ => {
            editor_state.pending_action = Some(action);
            return;
        }
    };

    if let Err(e) = project.apply(command) {
        bevy::log::error!("History restore failed: {}", e);
        editor_state.error_message = Some(e.to_string());
    }
}

/// Main UI rendering system
fn render_ui(
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut project: ResMut<Project>,
    mut preferences: ResMut<EditorPreferences>,
    tileset: Res<TilesetTexture>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let show_grid_before = editor_state.show_grid;

    render_menu_bar(ctx, &mut editor_state, &project, &preferences);
    render_toolbar(ctx, &mut editor_state, &mut project);
    render_status_bar(ctx, &project, &tileset);

    egui::SidePanel::left("palette")
        .resizable(false)
        .default_width(project.session.config().palette.size().0 + 24.0)
        .show(ctx, |ui| {
            ui.heading("Tiles");
            ui.separator();
            render_palette(ui, &mut project, &tileset);
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            render_canvas(ui, &mut project, &tileset, editor_state.show_grid);
        });

    render_dialogs(ctx, &mut editor_state, &mut project);

    if record_grid_toggle(show_grid_before, editor_state.show_grid, &mut preferences) {
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }
}

/// Store a grid toggle made in the UI this frame. Returns true if preferences changed.
///
/// Only a change during the frame counts, so a startup override from the
/// plugin never overwrites the saved preference.
fn record_grid_toggle(before: bool, after: bool, preferences: &mut EditorPreferences) -> bool {
    if before == after || preferences.show_grid == after {
        return false;
    }
    preferences.show_grid = after;
    true
}
