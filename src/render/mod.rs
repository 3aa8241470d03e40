// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Two-layer rendering: base image plus label overlay.

pub mod compositor;
pub mod raster;
pub mod surface;
