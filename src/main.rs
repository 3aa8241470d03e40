// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Point Labeler
//!
//! A desktop tool for stamping numbered labels onto an image by clicking,
//! then exporting the labeled image.

mod annotator;
mod app;
mod config;
mod error;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::LabelerApp;
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
const CONFIG_ENV: &str = "LABELER_CONFIG";

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = io::serialization::config_or_default(config_path.as_deref());

    // First argument, then config, then the working directory.
    let image_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.image_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let app = LabelerApp::new(&config, image_dir)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 1000.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Point Labeler"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Point Labeler",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
