// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Point Labeler application.

pub mod canvas;
pub mod files;
pub mod properties;
pub mod toolbar;
