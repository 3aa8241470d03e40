// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay rendering and export compositing.
//!
//! Each label is drawn twice: an outline pass in its stroke colour, then
//! a fill pass in its fill colour on top. The outline keeps the text
//! readable on both light and dark backgrounds.

use super::surface::{CanvasSurface, Layer};
use crate::models::label::Label;
use image::{Rgba, RgbaImage};

/// Stroke width used when none is configured.
pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;

/// Settings shared by every label on the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub stroke_width: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Clear the overlay and redraw every label in insertion order.
///
/// Font size and colours come from each label's own snapshot, never from
/// the live style.
pub fn render_overlay<C: CanvasSurface + ?Sized>(
    canvas: &mut C,
    labels: &[Label],
    options: RenderOptions,
) {
    canvas.clear_layer(Layer::Overlay);

    for label in labels {
        let style = &label.style;
        let font_size = style.font_size as f32;

        canvas.stroke_text(
            Layer::Overlay,
            &label.text,
            label.position,
            font_size,
            Rgba(style.stroke_color.rgba()),
            options.stroke_width,
        );
        canvas.fill_text(
            Layer::Overlay,
            &label.text,
            label.position,
            font_size,
            Rgba(style.fill_color.rgba()),
        );
    }
}

/// Flatten the canvas into a single raster: base first, overlay on top.
///
/// Both layers are copied before blending, so the result is independent
/// of any later canvas change.
pub fn composite_for_export<C: CanvasSurface + ?Sized>(canvas: &C) -> RgbaImage {
    let base = canvas.snapshot(Layer::Base);
    let overlay = canvas.snapshot(Layer::Overlay);
    composite(&base, &overlay)
}

/// Source-over blend of `overlay` onto a copy of `base`.
///
/// Fully transparent overlay pixels leave the base untouched, bit for bit.
pub fn composite(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    let mut out = base.clone();
    let width = out.width().min(overlay.width());
    let height = out.height().min(overlay.height());

    for y in 0..height {
        for x in 0..width {
            let src = *overlay.get_pixel(x, y);
            if src[3] == 0 {
                continue;
            }
            blend_pixel(out.get_pixel_mut(x, y), src, 1.0);
        }
    }
    out
}

/// Blend `src` scaled by `coverage` over `dst` (non-premultiplied RGBA).
pub fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let sa = (src[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    if sa >= 1.0 {
        *dst = src;
        return;
    }

    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
