//! Editor-side selection state.
//!
//! Selection is session state of the editor, not part of the document: it is
//! never persisted and never captured in undo snapshots. It refers to elements
//! by [`ElementId`] only.

use indexmap::IndexSet;

use crate::{document::Document, identifier::ElementId};

/// An ordered set of selected element ids.
///
/// Insertion order is kept so the most recently selected element can act as
/// the primary selection (the one a property panel shows).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: IndexSet<ElementId>,
}

impl Selection {
    /// Creates an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of selected ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the id is selected
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids, oldest first
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    /// The most recently selected id
    pub fn primary(&self) -> Option<ElementId> {
        self.ids.last().copied()
    }

    /// Adds an id to the selection, making it primary.
    pub fn select(&mut self, id: ElementId) {
        self.ids.shift_remove(&id);
        self.ids.insert(id);
    }

    /// Replaces the selection with a single id.
    pub fn select_only(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Removes an id if selected, otherwise selects it. Returns whether it is now selected.
    pub fn toggle(&mut self, id: ElementId) -> bool {
        if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Removes an id from the selection. Returns whether it was selected.
    pub fn deselect(&mut self, id: ElementId) -> bool {
        self.ids.shift_remove(&id)
    }

    /// Deselects everything
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids that no longer exist in `document`, e.g. after undo or open.
    pub fn retain_existing(&mut self, document: &Document) {
        self.ids.retain(|id| document.contains(*id));
    }
}

impl FromIterator<ElementId> for Selection {
    fn from_iter<T: IntoIterator<Item = ElementId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
