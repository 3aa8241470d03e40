// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Index counter for label numbering.

/// Hands out the number for each new label.
///
/// The counter only moves forward on its own. Undo and removal leave it
/// alone, so corrections show up as gaps in the numbering; the user can
/// realign it with [`IndexSequencer::set`].
#[derive(Debug, Clone, Default)]
pub struct IndexSequencer {
    current: u32,
}

impl IndexSequencer {
    pub fn new(start: u32) -> Self {
        Self { current: start }
    }

    /// Return the current index and advance by one.
    pub fn next(&mut self) -> u32 {
        let value = self.current;
        self.current = self.current.saturating_add(1);
        value
    }

    /// The index the next label will receive.
    pub fn peek(&self) -> u32 {
        self.current
    }

    pub fn set(&mut self, value: u32) {
        self.current = value;
    }

    /// Move the counter by `delta`, never below zero.
    pub fn step(&mut self, delta: i64) {
        let stepped = (self.current as i64 + delta).clamp(0, u32::MAX as i64);
        self.current = stepped as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_returns_then_advances() {
        let mut seq = IndexSequencer::new(5);
        assert_eq!(seq.next(), 5);
        assert_eq!(seq.next(), 6);
        assert_eq!(seq.peek(), 7);
    }

    #[test]
    fn test_set_overrides() {
        let mut seq = IndexSequencer::default();
        seq.next();
        seq.set(40);
        assert_eq!(seq.next(), 40);
    }

    #[test]
    fn test_step_saturates_at_zero() {
        let mut seq = IndexSequencer::new(1);
        seq.step(-1);
        assert_eq!(seq.peek(), 0);
        seq.step(-1);
        assert_eq!(seq.peek(), 0);
        seq.step(3);
        assert_eq!(seq.peek(), 3);
    }
}
