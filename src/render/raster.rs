// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory two-layer canvas with glyph rasterization.
//!
//! Text is laid out with `ab_glyph`, rasterized into a coverage mask and
//! blended onto the target layer. The stroke pass dilates the mask by
//! half the pen width, which matches an outline drawn centred on the
//! glyph contour once the fill pass is painted over it.

use super::compositor::blend_pixel;
use super::surface::{CanvasSurface, Layer};
use crate::error::{LabelerError, Result};
use crate::models::label::Point;
use ab_glyph::{point, Font, FontArc, FontVec, OutlinedGlyph, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Load a TrueType/OpenType font from disk, or egui's bundled
/// proportional font when `path` is `None`.
pub fn load_font(path: Option<&Path>) -> Result<FontArc> {
    match path {
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                LabelerError::ConfigValidation(format!(
                    "cannot read font {}: {}",
                    path.display(),
                    e
                ))
            })?;
            FontArc::try_from_vec(bytes).map_err(|e| {
                LabelerError::ConfigValidation(format!("invalid font {}: {}", path.display(), e))
            })
        }
        None => default_font(),
    }
}

fn default_font() -> Result<FontArc> {
    let defs = egui::FontDefinitions::default();
    let data = defs
        .families
        .get(&egui::FontFamily::Proportional)
        .and_then(|names| names.first())
        .and_then(|name| defs.font_data.get(name))
        .ok_or_else(|| {
            LabelerError::ConfigValidation("no bundled proportional font available".to_string())
        })?;

    let font = FontVec::try_from_vec_and_index(data.font.to_vec(), data.index)
        .map_err(|e| LabelerError::ConfigValidation(format!("bundled font unusable: {}", e)))?;
    Ok(FontArc::new(font))
}

/// Glyph coverage over a rectangle of canvas pixels.
struct CoverageMask {
    left: i32,
    top: i32,
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl CoverageMask {
    fn at(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0.0;
        }
        self.data[y as usize * self.width + x as usize]
    }

    /// Grow every covered pixel by a disc of `radius` pixels.
    fn dilate(&self, radius: f32) -> CoverageMask {
        let reach = radius.max(0.0).ceil() as i32;
        let limit = radius * radius + 1e-3;
        let offsets: Vec<(i32, i32)> = (-reach..=reach)
            .flat_map(|dy| (-reach..=reach).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| ((dx * dx + dy * dy) as f32) <= limit)
            .collect();

        let mut data = vec![0.0f32; self.data.len()];
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let v = offsets
                    .iter()
                    .map(|&(dx, dy)| self.at(x + dx, y + dy))
                    .fold(0.0f32, f32::max);
                data[y as usize * self.width + x as usize] = v;
            }
        }

        CoverageMask {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// A canvas backed by two RGBA buffers of equal size.
pub struct RasterCanvas {
    font: FontArc,
    base: RgbaImage,
    overlay: RgbaImage,
}

impl RasterCanvas {
    pub fn new(font: FontArc) -> Self {
        Self {
            font,
            base: RgbaImage::new(0, 0),
            overlay: RgbaImage::new(0, 0),
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut RgbaImage {
        match layer {
            Layer::Base => &mut self.base,
            Layer::Overlay => &mut self.overlay,
        }
    }

    /// Lay out `text` centred on `at` and rasterize it, leaving `pad`
    /// empty pixels around the glyph bounds.
    fn text_mask(&self, text: &str, at: Point, font_size: f32, pad: i32) -> Option<CoverageMask> {
        if font_size <= 0.0 || text.is_empty() {
            return None;
        }
        let scale = PxScale::from(font_size);
        let scaled = self.font.as_scaled(scale);

        let mut caret = 0.0f32;
        let mut previous = None;
        let mut placed = Vec::new();
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            placed.push((id, caret));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let origin_x = at.x as f32 - caret / 2.0;
        let baseline = at.y as f32 + (scaled.ascent() + scaled.descent()) / 2.0;

        let outlines: Vec<OutlinedGlyph> = placed
            .into_iter()
            .filter_map(|(id, offset)| {
                let glyph = id.with_scale_and_position(scale, point(origin_x + offset, baseline));
                self.font.outline_glyph(glyph)
            })
            .collect();
        if outlines.is_empty() {
            return None;
        }

        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for outline in &outlines {
            let b = outline.px_bounds();
            min_x = min_x.min(b.min.x);
            min_y = min_y.min(b.min.y);
            max_x = max_x.max(b.max.x);
            max_y = max_y.max(b.max.y);
        }

        // Text that cannot touch the canvas is dropped before any i32 math.
        let pad = i64::from(pad);
        let left = min_x.floor() as i64 - pad;
        let top = min_y.floor() as i64 - pad;
        let right = max_x.ceil() as i64 + pad;
        let bottom = max_y.ceil() as i64 + pad;
        let (cw, ch) = self.base.dimensions();
        if right < 0 || bottom < 0 || left >= i64::from(cw) || top >= i64::from(ch) {
            return None;
        }
        let left = i32::try_from(left).ok()?;
        let top = i32::try_from(top).ok()?;
        let width = usize::try_from(right - i64::from(left)).ok()?;
        let height = usize::try_from(bottom - i64::from(top)).ok()?;
        let mut data = vec![0.0f32; width * height];

        for outline in &outlines {
            let b = outline.px_bounds();
            let gx = b.min.x as i32 - left;
            let gy = b.min.y as i32 - top;
            outline.draw(|x, y, coverage| {
                let mx = gx + x as i32;
                let my = gy + y as i32;
                if mx < 0 || my < 0 || mx as usize >= width || my as usize >= height {
                    return;
                }
                let cell = &mut data[my as usize * width + mx as usize];
                *cell = cell.max(coverage);
            });
        }

        Some(CoverageMask {
            left,
            top,
            width,
            height,
            data,
        })
    }

    fn paint(&mut self, layer: Layer, mask: &CoverageMask, color: Rgba<u8>) {
        let target = self.layer_mut(layer);
        let (tw, th) = (target.width() as i32, target.height() as i32);

        for my in 0..mask.height {
            for mx in 0..mask.width {
                let coverage = mask.data[my * mask.width + mx];
                if coverage <= 0.0 {
                    continue;
                }
                let x = mask.left + mx as i32;
                let y = mask.top + my as i32;
                if x < 0 || y < 0 || x >= tw || y >= th {
                    continue;
                }
                blend_pixel(target.get_pixel_mut(x as u32, y as u32), color, coverage);
            }
        }
    }
}

impl CanvasSurface for RasterCanvas {
    fn put_image(&mut self, image: &RgbaImage) {
        self.base = image.clone();
        self.overlay = RgbaImage::new(image.width(), image.height());
    }

    fn clear_layer(&mut self, layer: Layer) {
        for px in self.layer_mut(layer).pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    fn stroke_text(
        &mut self,
        layer: Layer,
        text: &str,
        at: Point,
        font_size: f32,
        color: Rgba<u8>,
        width: f32,
    ) {
        let radius = width.max(0.0) / 2.0;
        let pad = radius.ceil() as i32;
        if let Some(mask) = self.text_mask(text, at, font_size, pad) {
            let outline = mask.dilate(radius);
            self.paint(layer, &outline, color);
        }
    }

    fn fill_text(&mut self, layer: Layer, text: &str, at: Point, font_size: f32, color: Rgba<u8>) {
        if let Some(mask) = self.text_mask(text, at, font_size, 0) {
            self.paint(layer, &mask, color);
        }
    }

    fn snapshot(&self, layer: Layer) -> RgbaImage {
        match layer {
            Layer::Base => self.base.clone(),
            Layer::Overlay => self.overlay.clone(),
        }
    }

    fn size(&self) -> (u32, u32) {
        self.base.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

    fn canvas(width: u32, height: u32) -> RasterCanvas {
        let mut canvas = RasterCanvas::new(load_font(None).unwrap());
        canvas.put_image(&RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])));
        canvas
    }

    fn painted_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, px) in image.enumerate_pixels() {
            if px[3] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds
    }

    #[test]
    fn test_put_image_resets_overlay() {
        let canvas = canvas(40, 30);
        assert_eq!(canvas.size(), (40, 30));
        let overlay = canvas.snapshot(Layer::Overlay);
        assert_eq!(overlay.dimensions(), (40, 30));
        assert!(overlay.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_fill_text_is_centred() {
        let mut canvas = canvas(200, 100);
        canvas.fill_text(Layer::Overlay, "A01", Point::new(100.0, 50.0), 32.0, RED);

        let overlay = canvas.snapshot(Layer::Overlay);
        let (x0, y0, x1, y1) = painted_bounds(&overlay).expect("text should paint pixels");
        let cx = (x0 + x1) as f32 / 2.0;
        let cy = (y0 + y1) as f32 / 2.0;
        assert!((cx - 100.0).abs() < 6.0, "horizontal centre {cx}");
        assert!((cy - 50.0).abs() < 8.0, "vertical centre {cy}");
        assert!(overlay.pixels().any(|p| p[0] == 255 && p[1] == 0 && p[3] > 200));
    }

    #[test]
    fn test_stroke_extends_past_fill() {
        let mut filled = canvas(200, 100);
        filled.fill_text(Layer::Overlay, "A01", Point::new(100.0, 50.0), 32.0, RED);
        let fill_bounds = painted_bounds(&filled.snapshot(Layer::Overlay)).unwrap();

        let mut stroked = canvas(200, 100);
        stroked.stroke_text(Layer::Overlay, "A01", Point::new(100.0, 50.0), 32.0, YELLOW, 3.0);
        let stroke_bounds = painted_bounds(&stroked.snapshot(Layer::Overlay)).unwrap();

        assert!(stroke_bounds.0 < fill_bounds.0);
        assert!(stroke_bounds.2 > fill_bounds.2);
    }

    #[test]
    fn test_larger_font_paints_larger_area() {
        let mut small = canvas(300, 150);
        small.fill_text(Layer::Overlay, "A01", Point::new(150.0, 75.0), 16.0, RED);
        let (sx0, _, sx1, _) = painted_bounds(&small.snapshot(Layer::Overlay)).unwrap();

        let mut large = canvas(300, 150);
        large.fill_text(Layer::Overlay, "A01", Point::new(150.0, 75.0), 48.0, RED);
        let (lx0, _, lx1, _) = painted_bounds(&large.snapshot(Layer::Overlay)).unwrap();

        assert!(lx1 - lx0 > 2 * (sx1 - sx0));
    }

    #[test]
    fn test_text_clipped_at_edges() {
        let mut canvas = canvas(20, 20);
        canvas.fill_text(Layer::Overlay, "A0123", Point::new(0.0, 0.0), 40.0, RED);
        assert_eq!(canvas.snapshot(Layer::Overlay).dimensions(), (20, 20));
    }

    #[test]
    fn test_base_layer_untouched_by_overlay_text() {
        let mut canvas = canvas(60, 40);
        canvas.fill_text(Layer::Overlay, "7", Point::new(30.0, 20.0), 24.0, RED);
        assert!(canvas.snapshot(Layer::Base).pixels().all(|p| *p == Rgba([0, 0, 0, 255])));

        canvas.clear_layer(Layer::Overlay);
        assert!(canvas.snapshot(Layer::Overlay).pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_far_off_canvas_text_is_skipped() {
        let mut canvas = canvas(40, 30);
        for at in [
            Point::new(2f64.powi(31), 10.0),
            Point::new(-2f64.powi(31), 10.0),
            Point::new(10.0, 2f64.powi(40)),
            Point::new(-1e12, -1e12),
        ] {
            canvas.stroke_text(Layer::Overlay, "A01", at, 32.0, YELLOW, 3.0);
            canvas.fill_text(Layer::Overlay, "A01", at, 32.0, RED);
        }
        assert!(canvas.snapshot(Layer::Overlay).pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_missing_font_file_is_config_error() {
        let err = load_font(Some(Path::new("/definitely/not/a/font.ttf"))).unwrap_err();
        assert!(matches!(err, LabelerError::ConfigValidation(_)));
    }
}
