// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error taxonomy for the annotation core.
//!
//! Every fallible core operation returns a [`LabelerError`]. None of them
//! are fatal to the session: the annotator reports them to the output log
//! and carries on.

use std::path::PathBuf;

/// Errors raised by the label store, the annotator and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum LabelerError {
    /// Undo requested while no labels are placed.
    #[error("nothing to undo: no labels have been placed")]
    EmptyStore,

    /// The image could not be opened or decoded.
    #[error("failed to load image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Writing the composited raster failed or there was nothing to write.
    #[error("export failed: {0}")]
    Export(String),

    /// A number format, colour or configuration value is malformed.
    #[error("invalid configuration: {0}")]
    ConfigValidation(String),

    /// An operation needs an image but none is loaded.
    #[error("no image loaded")]
    NoImage,
}

pub type Result<T> = std::result::Result<T, LabelerError>;
