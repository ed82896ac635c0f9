//! Tile palette panel

use bevy_egui::egui;
use tilepaint_core::Command;

use super::canvas::paint_tile;
use super::TilesetTexture;
use crate::project::Project;

/// Render the swatch grid; clicks select a tile through the session
pub fn render_palette(ui: &mut egui::Ui, project: &mut Project, tileset: &TilesetTexture) {
    let layout = project.session.config().palette;
    let (width, height) = layout.size();

    egui::ScrollArea::vertical()
        .id_salt("palette_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());
            let painter = ui.painter_at(rect);
            let selected = layout.swatch_for_tile(project.session.selected_tile());

            for index in 0..layout.swatch_count {
                let (x, y) = layout.swatch_origin(index);
                let swatch = egui::Rect::from_min_size(
                    rect.min + egui::vec2(x, y),
                    egui::vec2(layout.swatch_size, layout.swatch_size),
                );
                let tile = layout.tile_for_swatch(index);
                paint_tile(&painter, swatch, tile, project.session.config(), tileset);

                if selected == Some(index) {
                    painter.rect_stroke(
                        swatch,
                        0.0,
                        egui::Stroke::new(2.0, egui::Color32::YELLOW),
                        egui::StrokeKind::Outside,
                    );
                }
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let local = pos - rect.min;
                    project.send(Command::PaletteClick {
                        x: local.x,
                        y: local.y,
                    });
                }
            }

            response.on_hover_text(format!("Tile {}", project.session.selected_tile()));
        });
}
