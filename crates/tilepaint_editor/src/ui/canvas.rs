//! Map canvas - draws the grid and forwards pointer input to the session
//!
//! Screen positions handed to the session are absolute egui coordinates; the
//! canvas rectangle is passed along as the session viewport so the mapping
//! stays `screen = rect.min + world * zoom + offset`.

use bevy_egui::egui;
use tilepaint_core::{Command, MapConfig, Modifiers, PointerButton, TileRect, Viewport};

use super::TilesetTexture;
use crate::project::Project;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(30, 30, 35);
const RECT_PREVIEW_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 49, 77, 77);
const RECT_PREVIEW_STROKE: egui::Color32 = egui::Color32::from_rgb(0, 162, 255);

/// Flat color for a tile when the tileset image is unavailable
pub fn fallback_color(tile: u32) -> egui::Color32 {
    let colors = [
        egui::Color32::from_rgb(60, 60, 100),
        egui::Color32::from_rgb(60, 100, 60),
        egui::Color32::from_rgb(100, 60, 60),
        egui::Color32::from_rgb(100, 100, 60),
        egui::Color32::from_rgb(60, 100, 100),
        egui::Color32::from_rgb(100, 60, 100),
        egui::Color32::from_rgb(80, 80, 80),
        egui::Color32::from_rgb(70, 90, 110),
    ];
    colors[tile as usize % colors.len()]
}

/// UV rectangle of a tileset cell, given the image size in pixels
pub fn tile_uv(cell: (u32, u32), config: &MapConfig, image_size: egui::Vec2) -> egui::Rect {
    let uv_tile_width = config.tw as f32 / image_size.x.max(1.0);
    let uv_tile_height = config.th as f32 / image_size.y.max(1.0);
    let (col, row) = cell;
    egui::Rect::from_min_max(
        egui::pos2(col as f32 * uv_tile_width, row as f32 * uv_tile_height),
        egui::pos2(
            (col + 1) as f32 * uv_tile_width,
            (row + 1) as f32 * uv_tile_height,
        ),
    )
}

/// Paint one tile into `rect`, from the tileset if possible
pub(crate) fn paint_tile(
    painter: &egui::Painter,
    rect: egui::Rect,
    tile: u32,
    config: &MapConfig,
    tileset: &TilesetTexture,
) {
    let cell = config.palette.atlas_cell(tile);
    match (tileset.texture(), cell) {
        (Some((texture_id, size)), Some(cell)) => {
            painter.image(
                texture_id,
                rect,
                tile_uv(cell, config, size),
                egui::Color32::WHITE,
            );
        }
        // Ids with no image on the sheet draw as an empty cell
        (Some(_), None) => {}
        (None, _) => {
            painter.rect_filled(rect, 0.0, fallback_color(tile));
        }
    }
}

/// Render the canvas and handle its input
pub fn render_canvas(
    ui: &mut egui::Ui,
    project: &mut Project,
    tileset: &TilesetTexture,
    show_grid: bool,
) {
    let rect = ui.available_rect_before_wrap();
    let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

    let viewport = Viewport::new(rect.min.x, rect.min.y, rect.width(), rect.height());
    if *project.session.viewport() != viewport {
        project.send(Command::Resize(viewport));
    }

    // Pointer input waits until the tileset has either loaded or failed
    if tileset.is_resolved() {
        handle_input(ui, &response, project);
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, BACKGROUND);
    draw_tiles(&painter, rect, project, tileset);
    if show_grid {
        draw_grid(&painter, project);
    }
    if let Some(preview) = project.session.rect_preview() {
        draw_rect_preview(&painter, project, preview);
    }
}

fn handle_input(ui: &egui::Ui, response: &egui::Response, project: &mut Project) {
    let events = ui.input(|i| i.events.clone());
    for event in events {
        let gesture_active = project.session.is_drawing() || project.session.is_panning();
        match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed: true,
                modifiers,
            } if response.hovered() && response.rect.contains(pos) => {
                let Some(button) = map_button(button) else {
                    continue;
                };
                project.send(Command::PointerDown {
                    x: pos.x,
                    y: pos.y,
                    button,
                    modifiers: map_modifiers(modifiers),
                });
            }
            egui::Event::PointerButton { pressed: false, .. } if gesture_active => {
                project.send(Command::PointerUp);
            }
            egui::Event::PointerMoved(pos) if gesture_active || response.hovered() => {
                project.send(Command::PointerMove { x: pos.x, y: pos.y });
            }
            _ => {}
        }
    }

    if response.hovered() {
        let (scroll, modifiers) = ui.input(|i| (i.raw_scroll_delta, i.modifiers));
        // egui may turn shift+wheel into horizontal scrolling
        let amount = if scroll.y != 0.0 { scroll.y } else { scroll.x };
        if amount != 0.0 {
            // egui scrolls up with a positive delta; the session expects wheel-down positive
            project.send(Command::Zoom {
                delta: -amount,
                modifiers: map_modifiers(modifiers),
            });
        }
    }
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn map_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.ctrl || modifiers.mac_cmd,
        shift: modifiers.shift,
        alt: modifiers.alt,
    }
}

fn tile_rect(project: &Project, x: i32, y: i32, width: u32, height: u32) -> egui::Rect {
    let session = &project.session;
    let (sx, sy) = session
        .mapper()
        .tile_to_screen(x, y, session.viewport(), session.view());
    let size = session.mapper().tile_screen_size(session.view());
    egui::Rect::from_min_size(
        egui::pos2(sx, sy),
        egui::vec2(width as f32 * size, height as f32 * size),
    )
}

fn draw_tiles(
    painter: &egui::Painter,
    clip: egui::Rect,
    project: &Project,
    tileset: &TilesetTexture,
) {
    let config = project.session.config();
    for (x, y, tile) in project.session.grid().cells() {
        let rect = tile_rect(project, x as i32, y as i32, 1, 1);
        if !rect.intersects(clip) {
            continue;
        }
        paint_tile(painter, rect, tile, config, tileset);
    }
}

fn draw_grid(painter: &egui::Painter, project: &Project) {
    let grid = project.session.grid();
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    let map = tile_rect(project, 0, 0, grid.width(), grid.height());
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 25));
    let size = map.width() / width.max(1) as f32;

    // Lines would merge into a solid fill when zoomed far out
    if size >= 4.0 {
        for x in 1..width {
            let sx = map.min.x + x as f32 * size;
            painter.line_segment([egui::pos2(sx, map.min.y), egui::pos2(sx, map.max.y)], stroke);
        }
        for y in 1..height {
            let sy = map.min.y + y as f32 * size;
            painter.line_segment([egui::pos2(map.min.x, sy), egui::pos2(map.max.x, sy)], stroke);
        }
    }

    painter.rect_stroke(
        map,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(80)),
        egui::StrokeKind::Outside,
    );
}

fn draw_rect_preview(painter: &egui::Painter, project: &Project, preview: TileRect) {
    let rect = tile_rect(
        project,
        preview.min_x,
        preview.min_y,
        preview.width(),
        preview.height(),
    );
    painter.rect_filled(rect, 0.0, RECT_PREVIEW_FILL);
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(2.0, RECT_PREVIEW_STROKE),
        egui::StrokeKind::Inside,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_uv_spans_one_cell() {
        let config = MapConfig::default();
        // 8 x 8 cells of 128 px
        let size = egui::vec2(1024.0, 1024.0);
        let uv = tile_uv((1, 2), &config, size);
        assert_eq!(uv.min, egui::pos2(0.125, 0.25));
        assert_eq!(uv.max, egui::pos2(0.25, 0.375));
    }

    #[test]
    fn test_modifiers_map_command_to_ctrl() {
        let modifiers = egui::Modifiers {
            mac_cmd: true,
            shift: true,
            ..Default::default()
        };
        let mapped = map_modifiers(modifiers);
        assert!(mapped.ctrl && mapped.shift && !mapped.alt);
    }

    #[test]
    fn test_extra_buttons_ignored() {
        assert_eq!(map_button(egui::PointerButton::Extra1), None);
        assert_eq!(
            map_button(egui::PointerButton::Middle),
            Some(PointerButton::Middle)
        );
    }

    #[test]
    fn test_fallback_colors_differ_for_neighbours() {
        assert_ne!(fallback_color(10), fallback_color(11));
    }
}
