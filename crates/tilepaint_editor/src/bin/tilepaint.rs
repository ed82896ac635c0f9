//! Standalone Tilepaint editor binary
//!
//! Run with: tilepaint

use bevy::asset::{AssetPlugin, UnapprovedPathMode};
use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use std::path::PathBuf;
use tilepaint_editor::preferences::EditorPreferences;
use tilepaint_editor::project::Project;
use tilepaint_editor::EditorPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Tilepaint".to_string(),
                        resolution: WindowResolution::new(1280, 800),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin {
                    // Tiles are pixel art, keep them crisp when zoomed
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                })
                .set(AssetPlugin {
                    // Projects may point at a tileset outside the assets folder
                    unapproved_path_mode: UnapprovedPathMode::Allow,
                    ..default()
                }),
        )
        .add_plugins(EditorPlugin::default())
        .add_systems(Startup, auto_open_last_project)
        .run();
}

/// Reopen the most recent project when enabled in preferences
fn auto_open_last_project(mut project: ResMut<Project>, preferences: Res<EditorPreferences>) {
    if !preferences.auto_open_last_project {
        return;
    }

    let Some(recent) = preferences.last_project() else {
        return;
    };
    let path = PathBuf::from(&recent.path);
    if !path.exists() {
        warn!(
            "Last project file not found: {} ({})",
            recent.name, recent.path
        );
        return;
    }

    match project.open(&path) {
        Ok(()) => info!("Auto-opened last project: {}", recent.name),
        Err(e) => warn!("Failed to auto-open project '{}': {}", recent.name, e),
    }
}
