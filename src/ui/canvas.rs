// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas view showing the labeled image.
//!
//! The composited canvas is drawn at one screen point per canvas pixel,
//! so a click position maps directly to label coordinates.

use crate::annotator::{Mode, PointerButton};
use crate::models::label::Point;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    PointerUp(PointerButton, Point),
}

/// Display the canvas and report pointer releases in canvas coordinates.
pub fn show(
    ui: &mut egui::Ui,
    texture: &Option<egui::TextureHandle>,
    mode: Mode,
    next_label: &str,
    status: &str,
) -> CanvasAction {
    let mut action = CanvasAction::None;

    let Some(texture) = texture else {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("Point Labeler")
                        .size(32.0)
                        .color(egui::Color32::from_gray(200)),
                );
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new("Pick an image from the list and press Load")
                        .color(egui::Color32::from_gray(180)),
                );
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new("File → Open Image...")
                        .weak()
                        .color(egui::Color32::from_gray(130)),
                );
            });
        });
        return action;
    };

    ui.label(egui::RichText::new(status).weak());
    ui.separator();

    egui::ScrollArea::both().show(ui, |ui| {
        let size = texture.size_vec2();
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let button = if response.clicked() {
            Some(PointerButton::Primary)
        } else if response.clicked_by(egui::PointerButton::Middle) {
            Some(PointerButton::Middle)
        } else {
            None
        };

        if let (Some(button), Some(pos)) = (button, response.interact_pointer_pos()) {
            if rect.contains(pos) {
                let local = pos - rect.min;
                action = CanvasAction::PointerUp(button, Point::new(local.x as f64, local.y as f64));
            }
        }

        if response.hovered() {
            let hint = match mode {
                Mode::Label => format!("Next: {}", next_label),
                Mode::Remove => "Remove nearest".to_string(),
            };
            response.on_hover_text_at_pointer(hint);
        }
    });

    action
}
