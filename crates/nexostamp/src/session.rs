//! The live editing session.
//!
//! [`Session`] owns the document being edited together with its undo
//! [`History`], the editor [`Selection`], the file it came from and a dirty
//! flag. Every mutating operation records a checkpoint before touching the
//! document, so undo always returns to the state the user last saw.
//!
//! # Examples
//!
//! ```
//! # use nexostamp::session::Session;
//! # use nexostamp_core::element::ShapeKind;
//! let mut session = Session::new();
//! let id = session.add_shape(ShapeKind::Circle);
//! assert!(session.selection().contains(id));
//!
//! session.duplicate_selected();
//! assert_eq!(session.document().len(), 2);
//!
//! session.undo();
//! assert_eq!(session.document().len(), 1);
//! ```

use std::path::{Path, PathBuf};

use log::{debug, info};

use nexostamp_core::{
    document::Document,
    element::{Element, ShapeKind},
    geometry::Point,
    identifier::ElementId,
    selection::Selection,
};

use crate::{StampError, file, history::History};

/// Where toolbar commands drop new elements on the canvas.
pub const INSERT_POSITION: Point = Point::new(50.0, 50.0);

/// A document open in the editor.
#[derive(Debug, Clone, Default)]
pub struct Session {
    document: Document,
    history: History,
    selection: Selection,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Session {
    /// Starts a session on a fresh, untitled document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session on an existing document with empty history.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Mutable access to the selection. Selecting never touches history.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// File the document was last opened from or saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the document changed since it was created, opened or saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Applies `mutate` to the document after recording a checkpoint.
    ///
    /// This is the single entry point for document changes; the convenience
    /// commands below are built on it.
    pub fn edit<R>(&mut self, mutate: impl FnOnce(&mut Document) -> R) -> R {
        self.history.checkpoint(&self.document);
        self.dirty = true;
        mutate(&mut self.document)
    }

    /// Appends `element` on top of the existing ones and selects it.
    ///
    /// The element's z-index is replaced with [`Document::next_z_index`].
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = self.edit(|doc| {
            let z_index = doc.next_z_index();
            doc.add_element(element.with_z_index(z_index))
        });
        self.selection.select_only(id);
        id
    }

    /// Toolbar "Add Text"
    pub fn add_text(&mut self) -> ElementId {
        self.add_element(Element::text().with_position(INSERT_POSITION))
    }

    /// Toolbar "Add Rectangle", "Add Circle" and "Add Line"
    pub fn add_shape(&mut self, kind: ShapeKind) -> ElementId {
        self.add_element(Element::shape(kind).with_position(INSERT_POSITION))
    }

    /// Replaces one element through the property panel, keeping its id.
    ///
    /// Returns `false`, without recording a checkpoint, if no element has `id`.
    pub fn update_element(&mut self, id: ElementId, updated: Element) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.edit(|doc| doc.replace_element(id, updated))
    }

    /// Deletes every selected element. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let targets = self.selected_in_document();
        if targets.is_empty() {
            return 0;
        }

        let removed = self.edit(|doc| {
            targets
                .iter()
                .filter(|id| doc.remove_element(**id).is_some())
                .count()
        });
        self.selection.clear();
        debug!(removed; "Deleted selection");
        removed
    }

    /// Duplicates every selected element and selects the duplicates.
    ///
    /// Returns the ids of the new elements, in selection order.
    pub fn duplicate_selected(&mut self) -> Vec<ElementId> {
        let sources = self.selected_in_document();
        if sources.is_empty() {
            return Vec::new();
        }

        let copies: Vec<ElementId> = self.edit(|doc| {
            sources
                .iter()
                .filter_map(|id| doc.duplicate_element(*id))
                .collect()
        });
        self.selection = copies.iter().copied().collect();
        debug!(duplicated = copies.len(); "Duplicated selection");
        copies
    }

    /// Steps back one edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.document) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Re-applies one undone edit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.document) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    /// Replaces the session with a fresh, untitled document.
    pub fn new_document(&mut self) {
        self.replace_document(Document::new(), None);
        info!("Started new document");
    }

    /// Loads the document at `path`, discarding history and selection.
    ///
    /// On error the session is left unchanged.
    ///
    /// # Errors
    ///
    /// See [`file::load_document`].
    pub fn open_document(&mut self, path: impl AsRef<Path>) -> Result<(), StampError> {
        let path = path.as_ref();
        let document = file::load_document(path)?;
        self.replace_document(document, Some(path.to_path_buf()));
        Ok(())
    }

    /// Saves to the path the document came from, if any.
    ///
    /// Returns `Ok(false)` when the session has no path yet; hosts then ask
    /// for one and call [`Session::save_as`].
    ///
    /// # Errors
    ///
    /// See [`file::save_document`].
    pub fn save(&mut self) -> Result<bool, StampError> {
        let Some(path) = self.path.clone() else {
            return Ok(false);
        };
        file::save_document(&self.document, &path)?;
        self.dirty = false;
        Ok(true)
    }

    /// Saves to `path`, adding the `.nxs` extension when missing, and
    /// remembers the resulting path. Returns the path written.
    ///
    /// # Errors
    ///
    /// See [`file::save_document`].
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<PathBuf, StampError> {
        let path = file::with_stamp_extension(path);
        file::save_document(&self.document, &path)?;
        self.path = Some(path.clone());
        self.dirty = false;
        Ok(path)
    }

    fn restore(&mut self, document: Document) {
        self.document = document;
        self.selection.retain_existing(&self.document);
        self.dirty = true;
    }

    fn replace_document(&mut self, document: Document, path: Option<PathBuf>) {
        self.document = document;
        self.history.reset();
        self.selection.clear();
        self.path = path;
        self.dirty = false;
    }

    fn selected_in_document(&self) -> Vec<ElementId> {
        self.selection
            .iter()
            .filter(|id| self.document.contains(*id))
            .collect()
    }
}
