//! The stamp document: canvas metadata plus an ordered list of elements.
//!
//! A [`Document`] exclusively owns its elements. Cloning a document is a deep
//! value copy: the clone shares no element instances with its source and keeps
//! every element id unchanged. This is the copy the undo history stores.
//!
//! # Examples
//!
//! ```
//! # use nexostamp_core::document::Document;
//! # use nexostamp_core::element::Element;
//! let mut doc = Document::new();
//! let id = doc.add_element(Element::text());
//!
//! let snapshot = doc.clone();
//! doc.remove_element(id);
//!
//! assert!(doc.is_empty());
//! assert_eq!(snapshot.len(), 1);
//! ```

use log::{debug, trace};

use crate::{
    element::Element,
    geometry::Size,
    identifier::ElementId,
};

/// Name given to new documents.
pub const DEFAULT_NAME: &str = "Untitled Stamp";

/// Canvas size given to new documents, in design units.
pub const DEFAULT_CANVAS_SIZE: Size = Size::new(400.0, 300.0);

/// A complete stamp design.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    name: String,
    canvas: Size,
    elements: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_NAME),
            canvas: DEFAULT_CANVAS_SIZE,
            elements: Vec::new(),
        }
    }
}

impl Document {
    /// Creates an empty "Untitled Stamp" document with a 400×300 canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the display name of the design
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the design
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Builder form of [`Document::set_name`]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Canvas size in design units
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Sets the canvas size.
    ///
    /// A dimension that is not finite and strictly positive is ignored and
    /// keeps its current value, so the canvas is always a positive size.
    pub fn set_canvas(&mut self, canvas: Size) {
        let accept = |value: f32, current: f32| {
            if value.is_finite() && value > 0.0 { value } else { current }
        };
        let width = accept(canvas.width(), self.canvas.width());
        let height = accept(canvas.height(), self.canvas.height());
        if (width, height) != (canvas.width(), canvas.height()) {
            debug!(requested:? = canvas, width, height; "Ignoring non-positive canvas dimension");
        }
        self.canvas = Size::new(width, height);
    }

    /// Builder form of [`Document::set_canvas`]
    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.set_canvas(canvas);
        self
    }

    /// Elements in append order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the document has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if an element with the given id is in the document
    pub fn contains(&self, id: ElementId) -> bool {
        self.position_of(id).is_some()
    }

    /// Looks an element up by id
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id() == id)
    }

    /// Mutable form of [`Document::element`]
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    /// Appends an element and returns the id it is stored under.
    ///
    /// Ids stay unique within a document: an element whose id is already
    /// present, such as a [`Clone`] of a stored element, is given a freshly
    /// minted id before it is appended.
    pub fn add_element(&mut self, mut element: Element) -> ElementId {
        let mut id = element.id();
        if self.contains(id) {
            let taken = id;
            id = element.reassign_id();
            debug!(taken:% = taken, id:% = id; "Element id already in use, minted a new one");
        }
        trace!(id:% = id, kind = element.kind().name(); "Adding element");
        self.elements.push(element);
        id
    }

    /// Removes the element with the given id and returns it.
    ///
    /// Removing an id that is not in the document is a no-op and returns `None`.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let Some(index) = self.position_of(id) else {
            debug!(id:% = id; "Remove requested for an element not in the document");
            return None;
        };
        Some(self.elements.remove(index))
    }

    /// Replaces the element with the given id by `updated`, in place.
    ///
    /// The stored element keeps `id` and its position in the element list;
    /// every other field comes from `updated`. Returns `false` if no element
    /// has that id.
    pub fn replace_element(&mut self, id: ElementId, updated: Element) -> bool {
        match self.element_mut(id) {
            Some(slot) => {
                slot.assign_content(updated);
                true
            }
            None => false,
        }
    }

    /// Appends a duplicate of the element with the given id (new id, offset
    /// position) and returns the duplicate's id.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let copy = self.element(id)?.duplicate();
        Some(self.add_element(copy))
    }

    /// Sets the paint order of one element. Returns `false` if no element has that id.
    pub fn set_z_index(&mut self, id: ElementId, z_index: i32) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.set_z_index(z_index);
                true
            }
            None => false,
        }
    }

    /// Z-index the editor assigns to a newly created element: the current element count.
    pub fn next_z_index(&self) -> i32 {
        i32::try_from(self.elements.len()).unwrap_or(i32::MAX)
    }

    /// Elements in paint order: ascending z-index, ties kept in insertion order.
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        // `sort_by_key` is stable, which provides the insertion-order tie-break.
        ordered.sort_by_key(|element| element.z_index());
        ordered
    }

    fn position_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{element::ShapeKind, geometry::Point};

    #[test]
    fn test_new_document_defaults() {
        let doc = Document::new();
        assert_eq!(doc.name(), "Untitled Stamp");
        assert_eq!(doc.canvas(), Size::new(400.0, 300.0));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_add_and_lookup() {
        let mut doc = Document::new();
        let text = doc.add_element(Element::text());
        let rect = doc.add_element(Element::rectangle());

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.elements()[0].id(), text);
        assert_eq!(doc.elements()[1].id(), rect);
        assert!(doc.element(text).unwrap().as_text().is_some());
        assert!(doc.contains(rect));
    }

    #[test]
    fn test_add_clone_of_stored_element_gets_new_id() {
        let mut doc = Document::new();
        let original = doc.add_element(Element::circle().with_position(Point::new(5.0, 5.0)));
        let existing = doc.element(original).unwrap().clone();

        let added = doc.add_element(existing);

        assert_ne!(added, original);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.elements()[0].id(), original);
        assert_eq!(doc.elements()[1].id(), added);
        assert_eq!(doc.element(added).unwrap().position(), Point::new(5.0, 5.0));

        assert!(doc.remove_element(original).is_some());
        assert!(doc.contains(added));
    }

    #[test]
    fn test_canvas_stays_positive() {
        let mut doc = Document::new().with_canvas(Size::new(500.0, 250.0));

        doc.set_canvas(Size::new(400.0, 0.0));
        assert_eq!(doc.canvas(), Size::new(400.0, 250.0));

        doc.set_canvas(Size::new(-1.0, f32::NAN));
        assert_eq!(doc.canvas(), Size::new(400.0, 250.0));

        doc.set_canvas(Size::new(f32::INFINITY, 0.5));
        assert_eq!(doc.canvas(), Size::new(400.0, 0.5));
        assert!(doc.canvas().is_positive());

        let flat = Document::new().with_canvas(Size::new(400.0, 0.0));
        assert_eq!(flat.canvas(), DEFAULT_CANVAS_SIZE);
    }

    #[test]
    fn test_remove_element() {
        let mut doc = Document::new();
        let a = doc.add_element(Element::text());
        let b = doc.add_element(Element::circle());

        let removed = doc.remove_element(a).unwrap();
        assert_eq!(removed.id(), a);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.elements()[0].id(), b);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut doc = Document::new();
        doc.add_element(Element::text());
        let before = doc.clone();

        assert!(doc.remove_element(ElementId::new()).is_none());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_replace_element_keeps_id_and_slot() {
        let mut doc = Document::new();
        let first = doc.add_element(Element::rectangle());
        let second = doc.add_element(Element::text());

        let updated = Element::circle().with_position(Point::new(30.0, 40.0));
        assert!(doc.replace_element(first, updated));

        let stored = &doc.elements()[0];
        assert_eq!(stored.id(), first);
        assert_eq!(stored.as_shape().unwrap().kind(), ShapeKind::Circle);
        assert_eq!(stored.position(), Point::new(30.0, 40.0));
        assert_eq!(doc.elements()[1].id(), second);
    }

    #[test]
    fn test_replace_absent_returns_false() {
        let mut doc = Document::new();
        assert!(!doc.replace_element(ElementId::new(), Element::text()));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_duplicate_element_appends_offset_copy() {
        let mut doc = Document::new();
        let source = doc.add_element(Element::rectangle().with_position(Point::new(50.0, 50.0)));

        let copy = doc.duplicate_element(source).unwrap();

        assert_ne!(copy, source);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.element(copy).unwrap().position(), Point::new(60.0, 60.0));
        assert!(doc.duplicate_element(ElementId::new()).is_none());
    }

    #[test]
    fn test_clone_is_deep_and_keeps_ids() {
        let mut doc = Document::new().with_name("Seal");
        let id = doc.add_element(Element::text());

        let snapshot = doc.clone();
        doc.element_mut(id)
            .unwrap()
            .as_text_mut()
            .unwrap()
            .set_text("Changed");

        assert_eq!(snapshot.element(id).unwrap().as_text().unwrap().text(), "Text");
        assert_eq!(snapshot.elements()[0].id(), id);
        assert_eq!(snapshot.name(), "Seal");
    }

    #[test]
    fn test_paint_order_sorts_by_z_then_insertion() {
        let mut doc = Document::new();
        let a = doc.add_element(Element::text().with_z_index(2));
        let b = doc.add_element(Element::rectangle().with_z_index(0));
        let c = doc.add_element(Element::circle().with_z_index(2));
        let d = doc.add_element(Element::line().with_z_index(-1));

        let order: Vec<ElementId> = doc.paint_order().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![d, b, a, c]);
    }

    #[test]
    fn test_set_z_index_reorders() {
        let mut doc = Document::new();
        let a = doc.add_element(Element::text());
        let b = doc.add_element(Element::rectangle());

        assert!(doc.set_z_index(a, 5));
        let order: Vec<ElementId> = doc.paint_order().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![b, a]);
        assert!(!doc.set_z_index(ElementId::new(), 1));
    }

    #[test]
    fn test_next_z_index_counts_elements() {
        let mut doc = Document::new();
        assert_eq!(doc.next_z_index(), 0);
        doc.add_element(Element::text());
        doc.add_element(Element::line());
        assert_eq!(doc.next_z_index(), 2);
    }
}
