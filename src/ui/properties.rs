// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Style panel: numbering, colours, font size and display width.
//!
//! Edits apply to labels placed afterwards only.

use crate::config::{DISPLAY_WIDTH_RANGE, FONT_SIZE_RANGE};
use crate::models::style::StyleSnapshot;

/// Editable copy of the live style.
///
/// Colour fields are committed when they lose focus so half-typed values
/// are not reported as errors.
pub struct StyleForm {
    pub prefix: String,
    pub number_format: String,
    pub fill_color: String,
    pub stroke_color: String,
    pub font_size: u32,
    pub display_width: u32,
    pub index: u32,
}

impl StyleForm {
    pub fn from_style(style: &StyleSnapshot, display_width: u32, index: u32) -> Self {
        Self {
            prefix: style.prefix.clone(),
            number_format: style.number_format.clone(),
            fill_color: style.fill_color.name().to_string(),
            stroke_color: style.stroke_color.name().to_string(),
            font_size: style.font_size,
            display_width,
            index,
        }
    }
}

/// A single edit made in the panel.
pub enum PropertiesAction {
    Prefix(String),
    NumberFormat(String),
    FillColor(String),
    StrokeColor(String),
    FontSize(u32),
    DisplayWidth(u32),
    Index(u32),
}

/// Display the style panel. Returns the edits made this frame.
pub fn show(ui: &mut egui::Ui, form: &mut StyleForm) -> Vec<PropertiesAction> {
    let mut actions = Vec::new();

    ui.heading("Style");
    ui.separator();

    egui::Grid::new("style_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Prefix");
            if ui.text_edit_singleline(&mut form.prefix).changed() {
                actions.push(PropertiesAction::Prefix(form.prefix.clone()));
            }
            ui.end_row();

            ui.label("Format");
            if ui.text_edit_singleline(&mut form.number_format).changed() {
                actions.push(PropertiesAction::NumberFormat(form.number_format.clone()));
            }
            ui.end_row();

            ui.label("Text color");
            if ui.text_edit_singleline(&mut form.fill_color).lost_focus() {
                actions.push(PropertiesAction::FillColor(form.fill_color.clone()));
            }
            ui.end_row();

            ui.label("Stroke color");
            if ui.text_edit_singleline(&mut form.stroke_color).lost_focus() {
                actions.push(PropertiesAction::StrokeColor(form.stroke_color.clone()));
            }
            ui.end_row();

            ui.label("Index");
            if ui.add(egui::DragValue::new(&mut form.index)).changed() {
                actions.push(PropertiesAction::Index(form.index));
            }
            ui.end_row();
        });

    ui.add_space(8.0);

    if ui
        .add(egui::Slider::new(&mut form.font_size, FONT_SIZE_RANGE).text("Font size"))
        .changed()
    {
        actions.push(PropertiesAction::FontSize(form.font_size));
    }

    // Refitting rescales the whole image, so wait for the drag to end.
    let width = ui.add(
        egui::Slider::new(&mut form.display_width, DISPLAY_WIDTH_RANGE)
            .step_by(10.0)
            .text("Max width"),
    );
    if width.drag_stopped() || (width.changed() && !width.dragged()) {
        actions.push(PropertiesAction::DisplayWidth(form.display_width));
    }

    ui.add_space(8.0);
    ui.label(
        egui::RichText::new("Keys: 1-9 font size, -/= index, z undo, c clear")
            .small()
            .weak(),
    );

    actions
}
