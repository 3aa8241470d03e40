// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! User-facing message log shown in the status panel.

use std::collections::VecDeque;

const MAX_LINES: usize = 100;

/// Bounded list of recent messages, oldest first.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    lines: VecDeque<String>,
}

impl OutputLog {
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == MAX_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
