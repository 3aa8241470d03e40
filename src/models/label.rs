// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label data structures.
//!
//! A label is the formatted text stamped at a click location together
//! with the style it was created with.

use super::style::StyleSnapshot;

/// A 2D point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A placed label. Never edited after creation; undo and removal
/// replace the whole value.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Point,
    pub style: StyleSnapshot,
}

impl Label {
    pub fn new(text: String, position: Point, style: StyleSnapshot) -> Self {
        Self {
            text,
            position,
            style,
        }
    }
}
