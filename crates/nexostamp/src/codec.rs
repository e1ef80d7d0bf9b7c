//! Serialization codec for stamp documents.
//!
//! [`encode`] turns a [`Document`] into the textual `.nxs` representation and
//! [`decode`] turns such text back into a [`Document`]. Both are pure: reading
//! and writing files is layered on top in [`crate::file`].
//!
//! # Format
//!
//! A pretty-printed JSON object with `Name`, `CanvasWidth`, `CanvasHeight` and
//! an `Elements` array. Each element is a self-describing object holding the
//! shared fields (`Id`, `X`, `Y`, `Width`, `Height`, `Rotation`, `ZIndex`) and
//! the fields of its variant:
//!
//! ```json
//! {
//!   "Kind": "Text",
//!   "Id": "0d6f4b0e-8b7c-4f5e-9d0a-2b1c3d4e5f60",
//!   "X": 50.0,
//!   "Y": 50.0,
//!   "Width": 200.0,
//!   "Height": 50.0,
//!   "Rotation": 0.0,
//!   "ZIndex": 0,
//!   "Text": "Text",
//!   "FontFamily": "Arial",
//!   "FontSize": 24.0,
//!   "Bold": false,
//!   "Italic": false,
//!   "TextAlignment": "Start"
//! }
//! ```
//!
//! # Element classification
//!
//! The encoder always writes a `Kind` discriminator. When reading, `Kind` wins
//! if present. Files without it are classified structurally: a `Text` or
//! `FontFamily` key means text, otherwise a `ShapeType` key means shape,
//! otherwise the element is rejected with [`DecodeError::UnknownElementKind`].
//! Any element failure aborts the whole decode; partial documents are never
//! returned.

mod wire;

use std::collections::HashSet;

use log::{debug, info, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use nexostamp_core::{
    document::Document,
    element::{Element, ElementKind, ShapeContent, TextContent},
    geometry::{Point, Size},
    identifier::ElementId,
};

use wire::{
    BaseRecord, DocumentRecord, ElementRecord, EncodedElement, RawDocument, ShapeRecord,
    TextRecord, WireAlignment, WireShapeKind,
};

/// Errors returned by [`decode`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not JSON, or its top level does not have the document shape.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An element could not be classified as text or shape.
    #[error("element {index}: unknown element kind")]
    UnknownElementKind { index: usize },

    /// An element was classified but its fields could not be read.
    #[error("element {index}: {message}")]
    MalformedElement { index: usize, message: String },

    /// A field was read but holds a value the model does not allow.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Two elements share an id.
    #[error("duplicate element id {id}")]
    DuplicateId { id: ElementId },
}

/// Error returned by [`encode`] if the serializer fails.
#[derive(Debug, Error)]
#[error("failed to encode document: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Which variant an element record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Text,
    Shape,
}

/// Encodes a document as pretty-printed `.nxs` JSON.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialization fails.
pub fn encode(document: &Document) -> Result<String, EncodeError> {
    let record = DocumentRecord {
        name: document.name().to_string(),
        canvas_width: document.canvas().width(),
        canvas_height: document.canvas().height(),
        elements: document.elements().iter().map(encode_element).collect(),
    };

    let text = serde_json::to_string_pretty(&record)?;
    debug!(name = document.name(), elements = document.len(); "Encoded document");
    Ok(text)
}

/// Decodes `.nxs` text into a document.
///
/// Missing optional fields take the construction defaults of the model and a
/// missing element id is replaced by a fresh one. Unknown keys are ignored.
///
/// # Errors
///
/// - [`DecodeError::Malformed`] for invalid JSON or a top level that is not a document
/// - [`DecodeError::UnknownElementKind`] for an element that is neither text nor shape
/// - [`DecodeError::MalformedElement`] for an element whose fields have the wrong types
/// - [`DecodeError::InvalidValue`] for out-of-range values (non-positive canvas or
///   font size, negative stroke thickness, unparsable id)
/// - [`DecodeError::DuplicateId`] when two elements share an id
pub fn decode(text: &str) -> Result<Document, DecodeError> {
    let raw: RawDocument = serde_json::from_str(text)?;

    let canvas = Size::new(raw.canvas_width, raw.canvas_height);
    if !canvas.is_positive() {
        return Err(DecodeError::InvalidValue {
            field: String::from("CanvasWidth/CanvasHeight"),
            reason: format!(
                "canvas must be positive, got {}x{}",
                raw.canvas_width, raw.canvas_height
            ),
        });
    }

    let mut document = Document::new().with_name(raw.name).with_canvas(canvas);
    let mut seen = HashSet::with_capacity(raw.elements.len());

    for (index, value) in raw.elements.into_iter().enumerate() {
        let element = decode_element(index, value)?;
        if !seen.insert(element.id()) {
            return Err(DecodeError::DuplicateId { id: element.id() });
        }
        document.add_element(element);
    }

    info!(name = document.name(), elements = document.len(); "Decoded document");
    Ok(document)
}

fn encode_element(element: &Element) -> EncodedElement {
    let base = BaseRecord {
        id: Some(element.id().to_string()),
        x: element.position().x(),
        y: element.position().y(),
        width: Some(element.size().width()),
        height: Some(element.size().height()),
        rotation: element.rotation(),
        z_index: element.z_index(),
    };

    match element.kind() {
        ElementKind::Text(text) => EncodedElement::Text(ElementRecord {
            kind: Some(wire::TEXT_KIND.to_string()),
            base,
            body: TextRecord {
                text: text.text().to_string(),
                font_family: text.font_family().to_string(),
                font_size: text.font_size(),
                bold: text.bold(),
                italic: text.italic(),
                text_alignment: WireAlignment(text.alignment()),
            },
        }),
        ElementKind::Shape(shape) => EncodedElement::Shape(ElementRecord {
            kind: Some(wire::SHAPE_KIND.to_string()),
            base,
            body: ShapeRecord {
                shape_type: WireShapeKind(shape.kind()),
                stroke_thickness: shape.stroke_thickness(),
            },
        }),
    }
}

fn decode_element(index: usize, value: Value) -> Result<Element, DecodeError> {
    let Value::Object(map) = value else {
        return Err(DecodeError::MalformedElement {
            index,
            message: String::from("element is not an object"),
        });
    };

    let malformed = |err: serde_json::Error| DecodeError::MalformedElement {
        index,
        message: err.to_string(),
    };

    match classify(index, &map)? {
        RecordKind::Text => {
            let record: ElementRecord<TextRecord> =
                serde_json::from_value(Value::Object(map)).map_err(malformed)?;
            text_element(index, record)
        }
        RecordKind::Shape => {
            let record: ElementRecord<ShapeRecord> =
                serde_json::from_value(Value::Object(map)).map_err(malformed)?;
            shape_element(index, record)
        }
    }
}

/// Decides the variant of an element record.
fn classify(index: usize, map: &Map<String, Value>) -> Result<RecordKind, DecodeError> {
    if let Some(kind) = map.get(wire::KIND_KEY) {
        return match kind.as_str() {
            Some(wire::TEXT_KIND) => Ok(RecordKind::Text),
            Some(wire::SHAPE_KIND) => Ok(RecordKind::Shape),
            _ => {
                warn!(index, kind:% = kind; "Unrecognised element kind");
                Err(DecodeError::UnknownElementKind { index })
            }
        };
    }

    let kind = if wire::TEXT_MARKERS.iter().any(|key| map.contains_key(*key)) {
        RecordKind::Text
    } else if map.contains_key(wire::SHAPE_MARKER) {
        RecordKind::Shape
    } else {
        warn!(index; "Element has no kind and no recognisable fields");
        return Err(DecodeError::UnknownElementKind { index });
    };

    debug!(index, kind:? = kind; "Classified untagged element by its fields");
    Ok(kind)
}

fn text_element(index: usize, record: ElementRecord<TextRecord>) -> Result<Element, DecodeError> {
    let body = record.body;
    if !(body.font_size.is_finite() && body.font_size > 0.0) {
        return Err(DecodeError::InvalidValue {
            field: format!("Elements[{index}].FontSize"),
            reason: format!("font size must be positive, got {}", body.font_size),
        });
    }

    let content = TextContent::new(body.text)
        .with_font_family(body.font_family)
        .with_font_size(body.font_size)
        .with_bold(body.bold)
        .with_italic(body.italic)
        .with_alignment(body.text_alignment.0);

    restore_element(index, record.base, ElementKind::Text(content))
}

fn shape_element(index: usize, record: ElementRecord<ShapeRecord>) -> Result<Element, DecodeError> {
    let body = record.body;
    if !(body.stroke_thickness.is_finite() && body.stroke_thickness >= 0.0) {
        return Err(DecodeError::InvalidValue {
            field: format!("Elements[{index}].StrokeThickness"),
            reason: format!(
                "stroke thickness must not be negative, got {}",
                body.stroke_thickness
            ),
        });
    }

    let content = ShapeContent::new(body.shape_type.0).with_stroke_thickness(body.stroke_thickness);
    restore_element(index, record.base, ElementKind::Shape(content))
}

/// Builds the element from its shared fields once the variant is known.
fn restore_element(
    index: usize,
    base: BaseRecord,
    kind: ElementKind,
) -> Result<Element, DecodeError> {
    let id = match base.id {
        Some(id) => id.parse::<ElementId>().map_err(|err| DecodeError::InvalidValue {
            field: format!("Elements[{index}].Id"),
            reason: err.to_string(),
        })?,
        None => {
            debug!(index; "Element has no id, minting one");
            ElementId::new()
        }
    };

    let default_size = kind.default_size();
    let size = Size::new(
        base.width.unwrap_or(default_size.width()),
        base.height.unwrap_or(default_size.height()),
    );

    Ok(Element::with_id(id, kind)
        .with_position(Point::new(base.x, base.y))
        .with_size(size)
        .with_rotation(base.rotation)
        .with_z_index(base.z_index))
}
