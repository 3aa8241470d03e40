// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing capability the compositor renders into.

use crate::models::label::Point;
use image::{Rgba, RgbaImage};

/// The two independently clearable canvas layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// The scaled/rotated source image.
    Base,
    /// Labels only; redrawn from scratch on every change.
    Overlay,
}

/// A two-layer canvas that can draw centred text.
///
/// Text is always centred horizontally and vertically on `at`.
pub trait CanvasSurface {
    /// Replace the base layer with `image` and reset the overlay to a
    /// transparent layer of the same size.
    fn put_image(&mut self, image: &RgbaImage);

    fn clear_layer(&mut self, layer: Layer);

    /// Draw the outline of `text` with a pen `width` pixels wide.
    fn stroke_text(
        &mut self,
        layer: Layer,
        text: &str,
        at: Point,
        font_size: f32,
        color: Rgba<u8>,
        width: f32,
    );

    fn fill_text(&mut self, layer: Layer, text: &str, at: Point, font_size: f32, color: Rgba<u8>);

    /// Copy of a layer's current pixels.
    fn snapshot(&self, layer: Layer) -> RgbaImage;

    /// Canvas size in pixels, `(0, 0)` before any image is put.
    fn size(&self) -> (u32, u32);
}
