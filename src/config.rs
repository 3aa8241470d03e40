// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Startup configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! wants to change.

use crate::error::{LabelerError, Result};
use crate::io::export::ExportFormat;
use crate::models::style::{Color, NumberFormat, StyleSnapshot};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Smallest and largest display width the canvas may be fitted to.
pub const DISPLAY_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 320..=3840;
/// Allowed label font sizes in pixels.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelerConfig {
    pub prefix: String,
    pub number_format: String,
    pub fill_color: String,
    pub stroke_color: String,
    pub font_size: u32,
    pub display_width: u32,
    pub start_index: u32,
    pub stroke_width: f32,
    pub export_format: ExportFormat,
    pub font_path: Option<PathBuf>,
    pub image_dir: Option<PathBuf>,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            prefix: "A".to_string(),
            number_format: "02d".to_string(),
            fill_color: "red".to_string(),
            stroke_color: "yellow".to_string(),
            font_size: 32,
            display_width: 1200,
            start_index: 0,
            stroke_width: 3.0,
            export_format: ExportFormat::Png,
            font_path: None,
            image_dir: None,
        }
    }
}

impl LabelerConfig {
    /// Check every value and build the initial label style from it.
    pub fn initial_style(&self) -> Result<StyleSnapshot> {
        NumberFormat::parse(&self.number_format)?;
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(LabelerError::ConfigValidation(format!(
                "font_size {} outside {:?}",
                self.font_size, FONT_SIZE_RANGE
            )));
        }
        Ok(StyleSnapshot {
            font_size: self.font_size,
            fill_color: Color::parse(&self.fill_color)?,
            stroke_color: Color::parse(&self.stroke_color)?,
            prefix: self.prefix.clone(),
            number_format: self.number_format.clone(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.initial_style()?;
        if !DISPLAY_WIDTH_RANGE.contains(&self.display_width) {
            return Err(LabelerError::ConfigValidation(format!(
                "display_width {} outside {:?}",
                self.display_width, DISPLAY_WIDTH_RANGE
            )));
        }
        if !(self.stroke_width >= 0.0 && self.stroke_width <= 20.0) {
            return Err(LabelerError::ConfigValidation(format!(
                "stroke_width {} outside 0..=20",
                self.stroke_width
            )));
        }
        Ok(())
    }
}
