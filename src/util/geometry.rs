// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the nearest-label search used for point removal
//! and the fit-to-width computation used to size the display canvas.

use crate::models::label::{Label, Point};

/// Squared Euclidean distance between two points.
pub fn squared_distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Index of the label closest to `query`, or `None` when there are no labels.
///
/// Linear scan with a strict comparison, so on a tie the earliest placed
/// label wins.
pub fn nearest_label(labels: &[Label], query: Point) -> Option<usize> {
    let mut iter = labels.iter().enumerate();
    let (_, first) = iter.next()?;

    let mut best_index = 0;
    let mut best_distance = squared_distance(first.position, query);
    for (i, label) in iter {
        let d = squared_distance(label.position, query);
        if d < best_distance {
            best_distance = d;
            best_index = i;
        }
    }
    Some(best_index)
}

/// Display size for an image no wider than `max_width`.
///
/// Only shrinks; dimensions are truncated to whole pixels. Returns
/// `(width, height, scale)`.
pub fn fit_to_width(width: u32, height: u32, max_width: u32) -> (u32, u32, f32) {
    if width > max_width && width > 0 {
        let ratio = max_width as f64 / width as f64;
        let fitted_w = ((width as f64 * ratio) as u32).max(1);
        let fitted_h = ((height as f64 * ratio) as u32).max(1);
        (fitted_w, fitted_h, ratio as f32)
    } else {
        (width, height, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::StyleSnapshot;

    fn labels_at(points: &[(f64, f64)]) -> Vec<Label> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                Label::new(format!("L{}", i), Point::new(x, y), StyleSnapshot::default())
            })
            .collect()
    }

    #[test]
    fn test_nearest_prefers_closer_label() {
        let labels = labels_at(&[(0.0, 0.0), (10.0, 0.0), (100.0, 100.0)]);
        assert_eq!(nearest_label(&labels, Point::new(1.0, 0.0)), Some(0));
        assert_eq!(nearest_label(&labels, Point::new(6.0, 0.0)), Some(1));
        assert_eq!(nearest_label(&labels, Point::new(90.0, 95.0)), Some(2));
    }

    #[test]
    fn test_nearest_tie_goes_to_earliest() {
        let labels = labels_at(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(nearest_label(&labels, Point::new(5.0, 0.0)), Some(0));

        // Same position twice: first placed wins.
        let labels = labels_at(&[(3.0, 3.0), (7.0, 7.0), (3.0, 3.0)]);
        assert_eq!(nearest_label(&labels, Point::new(3.0, 3.0)), Some(0));
    }

    #[test]
    fn test_nearest_empty() {
        assert_eq!(nearest_label(&[], Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_fit_to_width_shrinks_wide_images() {
        assert_eq!(fit_to_width(2400, 1600, 1200), (1200, 800, 0.5));
        // Truncation, not rounding.
        let (w, h, _) = fit_to_width(1000, 333, 500);
        assert_eq!((w, h), (500, 166));
    }

    #[test]
    fn test_fit_to_width_never_enlarges() {
        assert_eq!(fit_to_width(800, 600, 1200), (800, 600, 1.0));
        assert_eq!(fit_to_width(1200, 600, 1200), (1200, 600, 1.0));
    }
}
