// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ordered store of placed labels.
//!
//! Insertion order doubles as drawing order: later labels are drawn on
//! top of earlier ones.

use super::label::{Label, Point};
use crate::error::{LabelerError, Result};
use crate::util::geometry::nearest_label;

#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    labels: Vec<Label>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// Remove and return the most recently placed label.
    pub fn undo_last(&mut self) -> Result<Label> {
        self.labels.pop().ok_or(LabelerError::EmptyStore)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Label> {
        if index < self.labels.len() {
            Some(self.labels.remove(index))
        } else {
            None
        }
    }

    /// Remove the label closest to `query`. Does nothing on an empty store.
    pub fn remove_nearest(&mut self, query: Point) -> Option<Label> {
        let index = nearest_label(&self.labels, query)?;
        self.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn all(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::StyleSnapshot;

    fn label_at(text: &str, x: f64, y: f64) -> Label {
        Label::new(text.to_string(), Point::new(x, y), StyleSnapshot::default())
    }

    fn texts(store: &LabelStore) -> Vec<&str> {
        store.all().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_undo_last_pops_tail() {
        let mut store = LabelStore::new();
        store.append(label_at("A01", 1.0, 1.0));
        store.append(label_at("A02", 2.0, 2.0));

        let undone = store.undo_last().unwrap();
        assert_eq!(undone.text, "A02");
        assert_eq!(texts(&store), vec!["A01"]);
    }

    #[test]
    fn test_undo_last_on_empty_is_error() {
        let mut store = LabelStore::new();
        assert!(matches!(store.undo_last(), Err(LabelerError::EmptyStore)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_nearest_picks_closest() {
        let mut store = LabelStore::new();
        store.append(label_at("A", 0.0, 0.0));
        store.append(label_at("B", 10.0, 0.0));
        store.append(label_at("C", 100.0, 100.0));

        let removed = store.remove_nearest(Point::new(1.0, 0.0)).unwrap();
        assert_eq!(removed.text, "A");
        assert_eq!(texts(&store), vec!["B", "C"]);
    }

    #[test]
    fn test_remove_nearest_interior_element() {
        let mut store = LabelStore::new();
        store.append(label_at("A", 0.0, 0.0));
        store.append(label_at("B", 10.0, 0.0));
        store.append(label_at("C", 100.0, 100.0));

        let removed = store.remove_nearest(Point::new(6.0, 0.0)).unwrap();
        assert_eq!(removed.text, "B");
        assert_eq!(texts(&store), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_nearest_on_empty_is_noop() {
        let mut store = LabelStore::new();
        assert!(store.remove_nearest(Point::new(3.0, 4.0)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut store = LabelStore::new();
        store.append(label_at("A", 0.0, 0.0));
        assert!(store.remove_at(3).is_none());
        assert_eq!(store.len(), 1);
    }
}
