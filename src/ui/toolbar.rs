// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with mode selection and the main commands.

use crate::annotator::{Mode, Rotation};

/// Button pressed on the toolbar this frame.
pub enum ToolbarAction {
    None,
    SetMode(Mode),
    Load,
    Clear,
    Undo,
    Save,
    Rotate(Rotation),
}

/// Display the toolbar with mode toggle and command buttons.
pub fn show(ui: &mut egui::Ui, current_mode: Mode, has_image: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");
        if ui
            .selectable_label(current_mode == Mode::Label, "✚ Label (o)")
            .clicked()
        {
            action = ToolbarAction::SetMode(Mode::Label);
        }
        if ui
            .selectable_label(current_mode == Mode::Remove, "✖ Remove (p)")
            .clicked()
        {
            action = ToolbarAction::SetMode(Mode::Remove);
        }

        ui.separator();

        if ui.button("Load").clicked() {
            action = ToolbarAction::Load;
        }
        if ui.add_enabled(has_image, egui::Button::new("Clear (c)")).clicked() {
            action = ToolbarAction::Clear;
        }
        if ui.add_enabled(has_image, egui::Button::new("Save (s)")).clicked() {
            action = ToolbarAction::Save;
        }
        if ui.add_enabled(has_image, egui::Button::new("⟲ Rotate (r)")).clicked() {
            action = ToolbarAction::Rotate(Rotation::CounterClockwise);
        }
        if ui.add_enabled(has_image, egui::Button::new("⟳ Rotate (t)")).clicked() {
            action = ToolbarAction::Rotate(Rotation::Clockwise);
        }
        if ui.add_enabled(has_image, egui::Button::new("Undo (z)")).clicked() {
            action = ToolbarAction::Undo;
        }

        ui.separator();

        let hint = match current_mode {
            Mode::Label => "Click to place the next label; middle-click removes",
            Mode::Remove => "Click to remove the nearest label",
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
