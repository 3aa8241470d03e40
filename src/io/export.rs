// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Writing the composited raster to disk.

use crate::error::{LabelerError, Result};
use crate::models::label::Label;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Encoding of the exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }
}

/// Destination for exported rasters.
pub trait ExportSink {
    fn write_file(&mut self, path: &Path, raster: &RgbaImage) -> Result<()>;
}

/// Writes rasters to the file system, encoding by the path's extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl ExportSink for FileSink {
    fn write_file(&mut self, path: &Path, raster: &RgbaImage) -> Result<()> {
        let is_jpeg = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("jpg") | Some("jpeg")
        );
        // JPEG has no alpha channel.
        let result = if is_jpeg {
            DynamicImage::ImageRgba8(raster.clone()).to_rgb8().save(path)
        } else {
            raster.save(path)
        };
        result.map_err(|e| LabelerError::Export(format!("writing {}: {}", path.display(), e)))
    }
}

/// Output path next to `image_path`: `labeled_{first}-{last}.<ext>`.
///
/// Fails when there are no labels, since the name comes from their text.
pub fn export_path(image_path: &Path, labels: &[Label], format: ExportFormat) -> Result<PathBuf> {
    let (first, last) = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(LabelerError::Export(
                "no labels placed, nothing to name the file after".to_string(),
            ))
        }
    };
    let file_name = format!(
        "labeled_{}-{}.{}",
        first.text,
        last.text,
        format.extension()
    );
    let dir = image_path.parent().unwrap_or_else(|| Path::new(""));
    Ok(dir.join(file_name))
}
