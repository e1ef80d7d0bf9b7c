//! Stamp elements: the visual primitives a document is made of.
//!
//! # Overview
//!
//! - [`Element`] - Shared geometry (position, size, rotation, paint order) plus an [`ElementKind`]
//! - [`ElementKind`] - Either [`TextContent`] or [`ShapeContent`]
//! - [`TextAlignment`], [`ShapeKind`] - Variant-specific enumerations
//!
//! Two kinds of copy exist and they are deliberately distinct:
//!
//! - [`Clone`] produces a verbatim copy that keeps the [`ElementId`]. Document
//!   snapshots are built from it.
//! - [`Element::duplicate`] mints a new id and offsets the copy by
//!   [`DUPLICATE_OFFSET`] on both axes so it does not hide its source.
//!
//! # Quick Start
//!
//! ```
//! # use nexostamp_core::element::{Element, ShapeKind};
//! # use nexostamp_core::geometry::Point;
//! let circle = Element::circle().with_position(Point::new(50.0, 50.0));
//! assert_eq!(circle.as_shape().unwrap().kind(), ShapeKind::Circle);
//!
//! let copy = circle.duplicate();
//! assert_ne!(copy.id(), circle.id());
//! assert_eq!(copy.position(), Point::new(60.0, 60.0));
//! ```

use std::{fmt, str::FromStr};

use crate::{
    geometry::{Bounds, Point, Size, finite_or},
    identifier::ElementId,
};

/// Offset applied on both axes by [`Element::duplicate`], in document units.
pub const DUPLICATE_OFFSET: f32 = 10.0;

/// Default size of a text element.
pub const DEFAULT_TEXT_SIZE: Size = Size::new(200.0, 50.0);

/// Default size of a rectangle or circle.
pub const DEFAULT_SHAPE_SIZE: Size = Size::new(100.0, 100.0);

/// Default size of a line: a horizontal run with no height.
pub const DEFAULT_LINE_SIZE: Size = Size::new(100.0, 0.0);

// =============================================================================
// Enumerations
// =============================================================================

/// Horizontal alignment of text inside its element box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    #[default]
    Start,
    Center,
    End,
}

impl TextAlignment {
    /// Returns the canonical name of this alignment
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Center => "Center",
            Self::End => "End",
        }
    }
}

impl FromStr for TextAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "left" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" | "right" => Ok(Self::End),
            _ => Err(format!(
                "invalid text alignment `{s}`, valid values: start, center, end"
            )),
        }
    }
}

impl fmt::Display for TextAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometric kind of a shape element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    /// An ellipse inscribed in the element box.
    Circle,
    /// A stroke from the box's top-left `(0, 0)` to `(width, height)` in local space.
    Line,
}

impl ShapeKind {
    /// Returns the canonical name of this shape kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Line => "Line",
        }
    }

    /// Size given to a freshly created element of this kind
    pub fn default_size(self) -> Size {
        match self {
            Self::Rectangle | Self::Circle => DEFAULT_SHAPE_SIZE,
            Self::Line => DEFAULT_LINE_SIZE,
        }
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "line" => Ok(Self::Line),
            _ => Err(format!(
                "invalid shape kind `{s}`, valid values: rectangle, circle, line"
            )),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Variant content
// =============================================================================

/// Text-specific properties of an element.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Text | `"Text"` |
/// | Font family | `"Arial"` |
/// | Font size | `24` points |
/// | Bold / italic | `false` |
/// | Alignment | [`TextAlignment::Start`] |
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    text: String,
    font_family: String,
    font_size: f32,
    bold: bool,
    italic: bool,
    alignment: TextAlignment,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: String::from("Text"),
            font_family: String::from("Arial"),
            font_size: 24.0,
            bold: false,
            italic: false,
            alignment: TextAlignment::Start,
        }
    }
}

impl TextContent {
    /// Creates text content with the given string and default styling
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the displayed string
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the font family name, e.g. `"Arial"`
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font size in points
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns true if the text is drawn bold
    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Returns true if the text is drawn italic
    pub fn italic(&self) -> bool {
        self.italic
    }

    /// Returns the horizontal alignment inside the element box
    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    /// Replaces the displayed string
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replaces the font family name
    pub fn set_font_family(&mut self, font_family: impl Into<String>) {
        self.font_family = font_family.into();
    }

    /// Sets the font size in points.
    ///
    /// Values that are not finite and strictly positive are ignored and the
    /// current size is kept.
    pub fn set_font_size(&mut self, font_size: f32) {
        if font_size.is_finite() && font_size > 0.0 {
            self.font_size = font_size;
        }
    }

    /// Sets whether the text is drawn bold
    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Sets whether the text is drawn italic
    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    /// Sets the horizontal alignment
    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
    }

    /// Builder form of [`TextContent::set_font_family`]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.set_font_family(font_family);
        self
    }

    /// Builder form of [`TextContent::set_font_size`]
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.set_font_size(font_size);
        self
    }

    /// Builder form of [`TextContent::set_bold`]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.set_bold(bold);
        self
    }

    /// Builder form of [`TextContent::set_italic`]
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.set_italic(italic);
        self
    }

    /// Builder form of [`TextContent::set_alignment`]
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.set_alignment(alignment);
        self
    }
}

/// Shape-specific properties of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeContent {
    kind: ShapeKind,
    stroke_thickness: f32,
}

impl ShapeContent {
    /// Default stroke thickness in document units
    pub const DEFAULT_STROKE_THICKNESS: f32 = 2.0;

    /// Creates shape content of the given kind with the default stroke
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            stroke_thickness: Self::DEFAULT_STROKE_THICKNESS,
        }
    }

    /// Returns the geometric kind of the shape
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns the stroke thickness in document units
    pub fn stroke_thickness(&self) -> f32 {
        self.stroke_thickness
    }

    /// Changes the geometric kind, keeping the stroke
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
    }

    /// Sets the stroke thickness.
    ///
    /// Negative values are clamped to zero. Non-finite values are ignored and
    /// the current thickness is kept.
    pub fn set_stroke_thickness(&mut self, stroke_thickness: f32) {
        if stroke_thickness.is_finite() {
            self.stroke_thickness = stroke_thickness.max(0.0);
        }
    }

    /// Builder form of [`ShapeContent::set_stroke_thickness`]
    pub fn with_stroke_thickness(mut self, stroke_thickness: f32) -> Self {
        self.set_stroke_thickness(stroke_thickness);
        self
    }
}

impl Default for ShapeContent {
    fn default() -> Self {
        Self::new(ShapeKind::default())
    }
}

/// The variant part of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(TextContent),
    Shape(ShapeContent),
}

impl ElementKind {
    /// Size given to a freshly created element of this kind
    pub fn default_size(&self) -> Size {
        match self {
            Self::Text(_) => DEFAULT_TEXT_SIZE,
            Self::Shape(shape) => shape.kind().default_size(),
        }
    }

    /// Short human-readable name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Shape(shape) => match shape.kind() {
                ShapeKind::Rectangle => "rectangle",
                ShapeKind::Circle => "circle",
                ShapeKind::Line => "line",
            },
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// A single visual primitive of a stamp document.
///
/// Geometry is expressed in document units. `rotation` is in degrees,
/// clockwise, pivoting around the element's own center. `z_index` controls
/// paint order; ties are broken by insertion order in the owning document.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    position: Point,
    size: Size,
    rotation: f32,
    z_index: i32,
    kind: ElementKind,
}

impl Element {
    /// Creates an element of the given kind at the origin, with the kind's
    /// default size and a freshly minted id.
    pub fn new(kind: ElementKind) -> Self {
        Self::with_id(ElementId::new(), kind)
    }

    /// Creates an element with a known id, e.g. when restoring a saved document.
    pub fn with_id(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            position: Point::default(),
            size: kind.default_size(),
            rotation: 0.0,
            z_index: 0,
            kind,
        }
    }

    /// A default text element ("Text", 200×50)
    pub fn text() -> Self {
        Self::new(ElementKind::Text(TextContent::default()))
    }

    /// A shape element of the given kind with its default size
    pub fn shape(kind: ShapeKind) -> Self {
        Self::new(ElementKind::Shape(ShapeContent::new(kind)))
    }

    /// A default rectangle (100×100)
    pub fn rectangle() -> Self {
        Self::shape(ShapeKind::Rectangle)
    }

    /// A default circle (100×100)
    pub fn circle() -> Self {
        Self::shape(ShapeKind::Circle)
    }

    /// A default horizontal line (100×0)
    pub fn line() -> Self {
        Self::shape(ShapeKind::Line)
    }

    /// Returns the element's identifier
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Top-left corner in document units
    pub fn position(&self) -> Point {
        self.position
    }

    /// Width and height in document units
    pub fn size(&self) -> Size {
        self.size
    }

    /// Unrotated box of the element in document units
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    /// Rotation in degrees around the element's center
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Paint order; higher values are drawn later
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Returns the variant part of the element
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Returns the variant part of the element for in-place edits
    pub fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    /// Returns the text content, or `None` for a shape
    pub fn as_text(&self) -> Option<&TextContent> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            ElementKind::Shape(_) => None,
        }
    }

    /// Mutable form of [`Element::as_text`]
    pub fn as_text_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.kind {
            ElementKind::Text(text) => Some(text),
            ElementKind::Shape(_) => None,
        }
    }

    /// Returns the shape content, or `None` for text
    pub fn as_shape(&self) -> Option<&ShapeContent> {
        match &self.kind {
            ElementKind::Shape(shape) => Some(shape),
            ElementKind::Text(_) => None,
        }
    }

    /// Mutable form of [`Element::as_shape`]
    pub fn as_shape_mut(&mut self) -> Option<&mut ShapeContent> {
        match &mut self.kind {
            ElementKind::Shape(shape) => Some(shape),
            ElementKind::Text(_) => None,
        }
    }

    /// Moves the element's top-left corner.
    ///
    /// A non-finite coordinate is ignored and that axis keeps its current value.
    pub fn set_position(&mut self, position: Point) {
        self.position = Point::new(
            finite_or(position.x(), self.position.x()),
            finite_or(position.y(), self.position.y()),
        );
    }

    /// Resizes the element.
    ///
    /// A non-finite dimension is ignored and keeps its current value. Zero is
    /// allowed; a horizontal line has no height.
    pub fn set_size(&mut self, size: Size) {
        self.size = Size::new(
            finite_or(size.width(), self.size.width()),
            finite_or(size.height(), self.size.height()),
        );
    }

    /// Sets the rotation in degrees. Non-finite angles are ignored.
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = finite_or(rotation, self.rotation);
    }

    /// Sets the paint order
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Builder form of [`Element::set_position`]
    pub fn with_position(mut self, position: Point) -> Self {
        self.set_position(position);
        self
    }

    /// Builder form of [`Element::set_size`]
    pub fn with_size(mut self, size: Size) -> Self {
        self.set_size(size);
        self
    }

    /// Builder form of [`Element::set_rotation`]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Builder form of [`Element::set_z_index`]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.set_z_index(z_index);
        self
    }

    /// Returns a copy with a new id, offset by [`DUPLICATE_OFFSET`] on both axes.
    ///
    /// Every other field, including size, rotation, z-index and all
    /// variant-specific properties, is copied verbatim.
    pub fn duplicate(&self) -> Self {
        let offset = Point::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
        Self {
            id: ElementId::new(),
            position: self.position.add_point(offset),
            ..self.clone()
        }
    }

    /// Replaces the id with a freshly minted one and returns it.
    pub(crate) fn reassign_id(&mut self) -> ElementId {
        self.id = ElementId::new();
        self.id
    }

    /// Moves `other`'s content into `self`, keeping `self`'s id.
    pub(crate) fn assign_content(&mut self, other: Element) {
        let id = self.id;
        *self = Self { id, ..other };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let element = Element::text();
        let text = element.as_text().unwrap();

        assert_eq!(element.size(), Size::new(200.0, 50.0));
        assert_eq!(element.position(), Point::default());
        assert_eq!(element.rotation(), 0.0);
        assert_eq!(element.z_index(), 0);
        assert_eq!(text.text(), "Text");
        assert_eq!(text.font_family(), "Arial");
        assert_eq!(text.font_size(), 24.0);
        assert!(!text.bold());
        assert!(!text.italic());
        assert_eq!(text.alignment(), TextAlignment::Start);
        assert!(element.as_shape().is_none());
    }

    #[test]
    fn test_shape_defaults() {
        for kind in [ShapeKind::Rectangle, ShapeKind::Circle] {
            let element = Element::shape(kind);
            assert_eq!(element.size(), Size::new(100.0, 100.0));
            let shape = element.as_shape().unwrap();
            assert_eq!(shape.kind(), kind);
            assert_eq!(shape.stroke_thickness(), 2.0);
        }
    }

    #[test]
    fn test_line_has_zero_height() {
        let line = Element::line();
        assert_eq!(line.size(), Size::new(100.0, 0.0));
        assert_eq!(line.as_shape().unwrap().kind(), ShapeKind::Line);
    }

    #[test]
    fn test_duplicate_offsets_and_mints_new_id() {
        let original = Element::new(ElementKind::Text(
            TextContent::new("ACME")
                .with_font_family("Courier New")
                .with_font_size(32.0)
                .with_bold(true)
                .with_alignment(TextAlignment::Center),
        ))
        .with_position(Point::new(12.5, 40.0))
        .with_size(Size::new(180.0, 60.0))
        .with_rotation(15.0)
        .with_z_index(3);

        let copy = original.duplicate();

        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.position(), Point::new(22.5, 50.0));
        assert_eq!(copy.size(), original.size());
        assert_eq!(copy.rotation(), original.rotation());
        assert_eq!(copy.z_index(), original.z_index());
        assert_eq!(copy.kind(), original.kind());
    }

    #[test]
    fn test_duplicate_shape_copies_stroke() {
        let original = Element::new(ElementKind::Shape(
            ShapeContent::new(ShapeKind::Line).with_stroke_thickness(5.0),
        ));
        let copy = original.duplicate();

        assert_eq!(copy.as_shape(), original.as_shape());
        assert_eq!(copy.size(), original.size());
    }

    #[test]
    fn test_clone_keeps_id() {
        let original = Element::rectangle();
        let copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.id(), original.id());
    }

    #[test]
    fn test_with_id_uses_given_id() {
        let id = ElementId::new();
        let element = Element::with_id(id, ElementKind::Shape(ShapeContent::new(ShapeKind::Line)));
        assert_eq!(element.id(), id);
        assert_eq!(element.size(), DEFAULT_LINE_SIZE);
    }

    #[test]
    fn test_assign_content_keeps_id() {
        let mut target = Element::rectangle();
        let target_id = target.id();
        let replacement = Element::circle().with_position(Point::new(5.0, 5.0));

        target.assign_content(replacement);

        assert_eq!(target.id(), target_id);
        assert_eq!(target.as_shape().unwrap().kind(), ShapeKind::Circle);
        assert_eq!(target.position(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_stroke_thickness_is_never_negative() {
        let mut shape = ShapeContent::default();
        shape.set_stroke_thickness(-3.0);
        assert_eq!(shape.stroke_thickness(), 0.0);
    }

    #[test]
    fn test_stroke_thickness_ignores_non_finite() {
        let mut shape = ShapeContent::default().with_stroke_thickness(4.0);
        shape.set_stroke_thickness(f32::INFINITY);
        assert_eq!(shape.stroke_thickness(), 4.0);
        shape.set_stroke_thickness(f32::NAN);
        assert_eq!(shape.stroke_thickness(), 4.0);
        shape.set_stroke_thickness(0.0);
        assert_eq!(shape.stroke_thickness(), 0.0);
    }

    #[test]
    fn test_font_size_stays_positive() {
        let mut text = TextContent::default();
        for rejected in [0.0, -0.0, -12.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            text.set_font_size(rejected);
            assert_eq!(text.font_size(), 24.0, "accepted font size {rejected}");
        }

        text.set_font_size(f32::MIN_POSITIVE);
        assert_eq!(text.font_size(), f32::MIN_POSITIVE);
        assert_eq!(TextContent::default().with_font_size(-1.0).font_size(), 24.0);
    }

    #[test]
    fn test_geometry_setters_ignore_non_finite() {
        let mut element = Element::rectangle()
            .with_position(Point::new(10.0, 20.0))
            .with_rotation(30.0);

        element.set_position(Point::new(f32::NAN, 25.0));
        assert_eq!(element.position(), Point::new(10.0, 25.0));
        element.set_position(Point::new(-5.0, f32::NEG_INFINITY));
        assert_eq!(element.position(), Point::new(-5.0, 25.0));

        element.set_size(Size::new(f32::INFINITY, 0.0));
        assert_eq!(element.size(), Size::new(100.0, 0.0));

        element.set_rotation(f32::NAN);
        assert_eq!(element.rotation(), 30.0);
        element.set_rotation(-720.0);
        assert_eq!(element.rotation(), -720.0);
    }

    #[test]
    fn test_reassign_id() {
        let mut element = Element::circle();
        let original = element.id();

        let minted = element.reassign_id();

        assert_ne!(minted, original);
        assert_eq!(element.id(), minted);
    }

    #[test]
    fn test_bounds_follow_position_and_size() {
        let element = Element::rectangle().with_position(Point::new(10.0, 20.0));
        let bounds = element.bounds();
        assert_eq!(bounds.min_point(), Point::new(10.0, 20.0));
        assert_eq!(bounds.max_x(), 110.0);
        assert_eq!(bounds.max_y(), 120.0);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("circle".parse::<ShapeKind>(), Ok(ShapeKind::Circle));
        assert_eq!("Line".parse::<ShapeKind>(), Ok(ShapeKind::Line));
        assert!("triangle".parse::<ShapeKind>().is_err());

        assert_eq!("left".parse::<TextAlignment>(), Ok(TextAlignment::Start));
        assert_eq!("Center".parse::<TextAlignment>(), Ok(TextAlignment::Center));
        assert_eq!("right".parse::<TextAlignment>(), Ok(TextAlignment::End));
        assert!("justify".parse::<TextAlignment>().is_err());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Element::text().kind().name(), "text");
        assert_eq!(Element::line().kind().name(), "line");
        assert_eq!(ShapeKind::Circle.to_string(), "Circle");
        assert_eq!(TextAlignment::End.to_string(), "End");
    }
}
