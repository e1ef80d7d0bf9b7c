//! Snapshot-based undo and redo.
//!
//! [`History`] keeps two stacks of whole-document snapshots. The editor calls
//! [`History::checkpoint`] immediately *before* each mutation of the live
//! document; [`History::undo`] and [`History::redo`] then hand back the
//! snapshot that should become the live document.
//!
//! Every push is a deep clone, so the stacks never share element instances
//! with the live document or with each other. Both stacks are unbounded.
//!
//! # Examples
//!
//! ```
//! # use nexostamp::history::History;
//! # use nexostamp_core::{document::Document, element::Element};
//! let mut history = History::new();
//! let mut live = Document::new();
//!
//! history.checkpoint(&live);
//! live.add_element(Element::text());
//!
//! let restored = history.undo(&live).unwrap();
//! assert!(restored.is_empty());
//! live = restored;
//!
//! let redone = history.redo(&live).unwrap();
//! assert_eq!(redone.len(), 1);
//! ```

use log::debug;

use nexostamp_core::document::Document;

/// Undo and redo stacks of document snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<Document>,
    redo: Vec<Document>,
}

impl History {
    /// Creates a history with both stacks empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state of `live` before a mutation and discards the redo stack.
    pub fn checkpoint(&mut self, live: &Document) {
        self.undo.push(live.clone());
        self.redo.clear();
        debug!(undo_depth = self.undo.len(); "Checkpoint recorded");
    }

    /// Steps back one snapshot.
    ///
    /// Returns the document that becomes live, after saving a copy of `live`
    /// for [`History::redo`]. Returns `None` and changes nothing when there is
    /// nothing to undo.
    pub fn undo(&mut self, live: &Document) -> Option<Document> {
        let previous = self.undo.pop()?;
        self.redo.push(live.clone());
        debug!(undo_depth = self.undo.len(), redo_depth = self.redo.len(); "Undo");
        Some(previous)
    }

    /// Steps forward one snapshot. The mirror image of [`History::undo`].
    pub fn redo(&mut self, live: &Document) -> Option<Document> {
        let next = self.redo.pop()?;
        self.undo.push(live.clone());
        debug!(undo_depth = self.undo.len(), redo_depth = self.redo.len(); "Redo");
        Some(next)
    }

    /// Clears both stacks, e.g. when a document is created or opened.
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
        debug!("History reset");
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of snapshots available to [`History::undo`]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of snapshots available to [`History::redo`]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexostamp_core::{element::Element, geometry::Point};

    #[test]
    fn test_undo_then_redo_is_inverse() {
        let mut history = History::new();
        let d0 = Document::new();

        history.checkpoint(&d0);
        let mut d1 = d0.clone();
        d1.add_element(Element::circle());

        let undone = history.undo(&d1).unwrap();
        assert_eq!(undone, d0);

        let redone = history.redo(&undone).unwrap();
        assert_eq!(redone, d1);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = History::new();
        let live = Document::new();

        assert!(history.undo(&live).is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_redo_on_empty_is_noop() {
        let mut history = History::new();
        history.checkpoint(&Document::new());

        assert!(history.redo(&Document::new()).is_none());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_checkpoint_clears_redo() {
        let mut history = History::new();
        let d0 = Document::new();
        history.checkpoint(&d0);

        let mut d1 = d0.clone();
        d1.add_element(Element::text());
        let live = history.undo(&d1).unwrap();
        assert!(history.can_redo());

        history.checkpoint(&live);
        assert!(!history.can_redo());
        assert!(history.redo(&live).is_none());
    }

    #[test]
    fn test_snapshots_are_independent_of_live_document() {
        let mut history = History::new();
        let mut live = Document::new();
        let id = live.add_element(Element::rectangle());

        history.checkpoint(&live);
        live.element_mut(id)
            .unwrap()
            .set_position(Point::new(99.0, 99.0));

        let restored = history.undo(&live).unwrap();
        assert_eq!(restored.element(id).unwrap().position(), Point::default());
    }

    #[test]
    fn test_multiple_steps() {
        let mut history = History::new();
        let mut live = Document::new();
        let mut states = vec![live.clone()];

        for _ in 0..3 {
            history.checkpoint(&live);
            live.add_element(Element::line());
            states.push(live.clone());
        }
        assert_eq!(history.undo_depth(), 3);

        for expected in states.iter().rev().skip(1) {
            live = history.undo(&live).unwrap();
            assert_eq!(&live, expected);
        }
        assert!(history.undo(&live).is_none());
        assert_eq!(history.redo_depth(), 3);

        for expected in states.iter().skip(1) {
            live = history.redo(&live).unwrap();
            assert_eq!(&live, expected);
        }
    }

    #[test]
    fn test_reset_clears_both_stacks() {
        let mut history = History::new();
        let live = Document::new();
        history.checkpoint(&live);
        history.checkpoint(&live);
        let live = history.undo(&live).unwrap();
        assert!(history.can_undo() && history.can_redo());

        history.reset();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo(&live).is_none());
    }
}
