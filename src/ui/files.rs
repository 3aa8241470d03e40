// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file list with a thumbnail of the selected entry.

use std::path::PathBuf;

pub enum FilesAction {
    None,
    /// A different entry was selected.
    Select(usize),
    /// An entry was double-clicked.
    Load(usize),
}

/// Display the file list and the thumbnail preview.
pub fn show(
    ui: &mut egui::Ui,
    files: &[PathBuf],
    selected: Option<usize>,
    thumbnail: &Option<egui::TextureHandle>,
) -> FilesAction {
    let mut action = FilesAction::None;

    ui.heading("Images");
    ui.separator();

    if files.is_empty() {
        ui.label(egui::RichText::new("No images in this folder").weak());
    }

    egui::ScrollArea::vertical()
        .max_height(240.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (i, path) in files.iter().enumerate() {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let response = ui.selectable_label(selected == Some(i), name);
                if response.double_clicked() {
                    action = FilesAction::Load(i);
                } else if response.clicked() && selected != Some(i) {
                    action = FilesAction::Select(i);
                }
            }
        });

    if let Some(texture) = thumbnail {
        ui.add_space(8.0);
        ui.image((texture.id(), texture.size_vec2()));
    }

    action
}
