// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label data model: labels, their styles, the store and the index counter.

pub mod label;
pub mod sequencer;
pub mod store;
pub mod style;
