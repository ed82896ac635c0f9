//! tilepaint_editor - Interactive 2D tile painting editor for Bevy
//!
//! This crate provides the editor application around `tilepaint_core`:
//! - Tile canvas with pan and zoom
//! - Tile palette backed by a tileset image
//! - Brush, eraser, flood fill, rectangle fill and picker tools
//! - Undo/redo
//! - Project save/load and Lua table export
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use tilepaint_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::new())
//!         .run();
//! }
//! ```

pub mod commands;
pub mod preferences;
pub mod project;
pub mod ui;

pub use tilepaint_core;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiPlugin;
use std::path::PathBuf;

use commands::handle_keyboard_shortcuts;
use project::Project;
use tilepaint_core::{EditorSession, MapConfig, Tool, ToolState, ViewTransform};
use ui::{EditorUiPlugin, PendingAction};

/// Resource storing the directory the asset server loads the tileset from
#[derive(Resource, Default)]
pub struct AssetsBasePath(pub PathBuf);

impl AssetsBasePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.0
    }
}

/// Configuration for initial editor state
///
/// Use this to customize the editor's initial settings when embedding it in your application.
#[derive(Clone, Debug)]
pub struct EditorStateConfig {
    /// Whether to show the grid on startup. Default: true
    pub show_grid: bool,
    /// Initial zoom level (0.1 to 5.0). Default: 1.0
    pub initial_zoom: f32,
    /// Initial tool selection. Default: Brush
    pub initial_tool: Tool,
    /// Map size, tileset and palette layout
    pub map_config: MapConfig,
}

impl Default for EditorStateConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            initial_zoom: 1.0,
            initial_tool: Tool::Brush,
            map_config: MapConfig::default(),
        }
    }
}

/// Main editor plugin with configurable assets path and initial state
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use tilepaint_editor::{tilepaint_core::Tool, EditorPlugin};
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_assets_path("my_assets")
///             .with_initial_grid(false)
///             .with_initial_zoom(2.0)
///             .with_initial_tool(Tool::Fill)
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    /// Custom assets path. If None, defaults to `./assets`.
    pub assets_path: Option<PathBuf>,
    /// Initial editor state configuration.
    pub initial_state: EditorStateConfig,
}

impl EditorPlugin {
    /// Create an editor plugin with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the assets directory path
    /// This should match where Bevy's AssetServer looks for files.
    pub fn with_assets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets_path = Some(path.into());
        self
    }

    /// Set the map configuration (size, tileset, palette)
    pub fn with_map_config(mut self, config: MapConfig) -> Self {
        self.initial_state.map_config = config;
        self
    }

    /// Set whether to show the grid on startup (default: true)
    pub fn with_initial_grid(mut self, show: bool) -> Self {
        self.initial_state.show_grid = show;
        self
    }

    /// Set the initial zoom level (0.1 to 5.0, default: 1.0)
    pub fn with_initial_zoom(mut self, zoom: f32) -> Self {
        self.initial_state.initial_zoom =
            zoom.clamp(tilepaint_core::MIN_ZOOM, tilepaint_core::MAX_ZOOM);
        self
    }

    /// Set the initial tool selection (default: Brush)
    pub fn with_initial_tool(mut self, tool: Tool) -> Self {
        self.initial_state.initial_tool = tool;
        self
    }

    fn detect_assets_path(&self) -> PathBuf {
        if let Some(path) = &self.assets_path {
            return path.clone();
        }

        std::env::current_dir()
            .map(|p| p.join("assets"))
            .unwrap_or_else(|_| PathBuf::from("assets"))
    }

    /// Build the starting session from the initial state
    fn initial_session(&self) -> EditorSession {
        let config = &self.initial_state;
        let mut view = ViewTransform::default();
        view.set_zoom(config.initial_zoom);
        let tools = ToolState {
            current_tool: config.initial_tool,
            ..Default::default()
        };
        EditorSession::with_state(config.map_config.clone(), tools, view)
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        let assets_path = self.detect_assets_path();
        bevy::log::info!("EditorPlugin: Using assets path: {:?}", assets_path);

        let preferences = preferences::EditorPreferences::load();
        bevy::log::info!(
            "Loaded editor preferences ({} recent projects)",
            preferences.recent_projects.len()
        );

        // The plugin can start with the grid hidden; otherwise the saved preference applies
        let mut editor_state = EditorState::default();
        editor_state.show_grid = self.initial_state.show_grid && preferences.show_grid;

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .insert_resource(editor_state)
            .insert_resource(preferences)
            .insert_resource(Project::with_session(self.initial_session()))
            .insert_resource(AssetsBasePath::new(assets_path))
            .add_systems(Startup, setup_editor_camera)
            .add_systems(
                Update,
                (
                    handle_keyboard_shortcuts,
                    handle_recent_projects,
                    update_window_title,
                ),
            );
    }
}

/// System to handle recent projects updates
fn handle_recent_projects(
    mut editor_state: ResMut<EditorState>,
    mut preferences: ResMut<preferences::EditorPreferences>,
    mut project: ResMut<Project>,
) {
    if let Some(path) = editor_state.pending_add_recent_project.take() {
        let name = project.name();
        preferences.add_recent_project(path, name);
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }

    if let Some(path) = editor_state.pending_open_recent_project.take() {
        match project.open(&path) {
            Ok(()) => {
                bevy::log::info!("Opened project {:?}", path);
                let name = project.name();
                preferences.add_recent_project(&path, name);
            }
            Err(e) => {
                bevy::log::error!("Failed to open {:?}: {}", path, e);
                editor_state.error_message = Some(format!("Failed to load project: {}", e));
                // Stale entry: the file is gone or no longer fits this map
                preferences.remove_recent_project(&path.to_string_lossy());
            }
        }
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }

    if editor_state.pending_clear_recent_projects {
        editor_state.pending_clear_recent_projects = false;
        preferences.clear_recent_projects();
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }
}

/// Keeps the window title in sync with the project name and dirty state
fn update_window_title(
    project: Res<Project>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !project.is_changed() {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    let title = window_title(&project);
    if window.title != title {
        window.title = title;
    }
}

fn window_title(project: &Project) -> String {
    let dirty = if project.is_dirty() { " *" } else { "" };
    format!("Tilepaint - {}{}", project.name(), dirty)
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Global editor state
#[derive(Resource)]
pub struct EditorState {
    pub show_grid: bool,

    // Dialogs
    pub error_message: Option<String>,
    pub show_export_dialog: bool,
    /// Code shown in the export window
    pub export_code: String,

    // Recent projects handling
    pub pending_add_recent_project: Option<PathBuf>,
    pub pending_open_recent_project: Option<PathBuf>,
    pub pending_clear_recent_projects: bool,

    // Pending actions
    pub pending_action: Option<PendingAction>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            show_grid: true,

            error_message: None,
            show_export_dialog: false,
            export_code: String::new(),

            pending_add_recent_project: None,
            pending_open_recent_project: None,
            pending_clear_recent_projects: false,

            pending_action: None,
        }
    }
}
