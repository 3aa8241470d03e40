// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading and manipulation.
//!
//! This module handles decoding image files, the 90° rotations and
//! fit-to-width scaling used for display, directory listings and
//! thumbnails for the file browser.

use crate::error::{LabelerError, Result};
use crate::util::geometry::fit_to_width;
use image::{imageops, RgbaImage};
use std::path::{Path, PathBuf};

/// File extensions offered in the image list and open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif", "webp"];

/// Size the thumbnail preview is fitted into.
pub const THUMBNAIL_SIZE: (u32, u32) = (300, 200);

/// Source of decoded images and the pixel operations the annotator needs.
pub trait ImageProvider {
    fn load(&self, path: &Path) -> Result<RgbaImage>;

    /// Rotate by a quarter turn; the result has width and height swapped.
    fn rotate90(&self, image: &RgbaImage, clockwise: bool) -> RgbaImage;

    /// Shrink `image` to at most `max_width` wide. Returns the scaled
    /// image and the scale factor applied.
    fn resize_to_fit(&self, image: &RgbaImage, max_width: u32) -> (RgbaImage, f32);
}

/// Images decoded from the local file system with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskImages;

impl ImageProvider for DiskImages {
    fn load(&self, path: &Path) -> Result<RgbaImage> {
        let decoded = image::open(path).map_err(|source| LabelerError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(decoded.to_rgba8())
    }

    fn rotate90(&self, image: &RgbaImage, clockwise: bool) -> RgbaImage {
        if clockwise {
            imageops::rotate90(image)
        } else {
            imageops::rotate270(image)
        }
    }

    fn resize_to_fit(&self, image: &RgbaImage, max_width: u32) -> (RgbaImage, f32) {
        let (w, h, scale) = fit_to_width(image.width(), image.height(), max_width);
        if (w, h) == image.dimensions() {
            return (image.clone(), 1.0);
        }
        let resized = imageops::resize(image, w, h, imageops::FilterType::Triangle);
        (resized, scale)
    }
}

/// Whether `path` has one of the supported image extensions.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Decode `path` and shrink it to fit within `max_size`, keeping aspect.
pub fn load_thumbnail(path: &Path, max_size: (u32, u32)) -> Result<RgbaImage> {
    let decoded = image::open(path).map_err(|source| LabelerError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decoded.thumbnail(max_size.0, max_size.1).to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_load_missing_file_is_decode_error() {
        let err = DiskImages.load(Path::new("/no/such/image.png")).unwrap_err();
        assert!(matches!(err, LabelerError::ImageDecode { .. }));
    }

    #[test]
    fn test_load_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(
            DiskImages.load(&path),
            Err(LabelerError::ImageDecode { .. })
        ));
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let img = RgbaImage::new(40, 10);
        assert_eq!(DiskImages.rotate90(&img, true).dimensions(), (10, 40));
        assert_eq!(DiskImages.rotate90(&img, false).dimensions(), (10, 40));
    }

    #[test]
    fn test_rotate_direction() {
        // Mark the top-left pixel and follow it.
        let mut img = RgbaImage::new(4, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        let cw = DiskImages.rotate90(&img, true);
        assert_eq!(cw.get_pixel(1, 0)[0], 255);

        let ccw = DiskImages.rotate90(&img, false);
        assert_eq!(ccw.get_pixel(0, 3)[0], 255);
    }

    #[test]
    fn test_resize_to_fit() {
        let img = RgbaImage::new(2000, 1000);
        let (fitted, scale) = DiskImages.resize_to_fit(&img, 500);
        assert_eq!(fitted.dimensions(), (500, 250));
        assert_eq!(scale, 0.25);

        let small = RgbaImage::new(100, 50);
        let (same, scale) = DiskImages.resize_to_fit(&small, 500);
        assert_eq!(same.dimensions(), (100, 50));
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_list_images_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("b.png"), 2, 2);
        write_png(&dir.path().join("a.PNG"), 2, 2);
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        std::fs::create_dir(dir.path().join("sub.png")).unwrap();

        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);
    }

    #[test]
    fn test_thumbnail_fits_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 900, 300);

        let thumb = load_thumbnail(&path, THUMBNAIL_SIZE).unwrap();
        assert!(thumb.width() <= 300 && thumb.height() <= 200);
        assert_eq!(thumb.width(), 300);
    }
}
