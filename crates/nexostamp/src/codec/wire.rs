//! On-disk record types for the `.nxs` JSON format.
//!
//! Keys use PascalCase to stay readable by files written by earlier
//! NexoStamp releases. Those files carry no `Kind` discriminator and store
//! enumerations as integer codes; both are accepted here.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::Value;

use nexostamp_core::{
    document::{DEFAULT_CANVAS_SIZE, DEFAULT_NAME},
    element::{ShapeContent, ShapeKind, TextAlignment, TextContent},
};

/// Discriminator key written on every element.
pub(super) const KIND_KEY: &str = "Kind";
pub(super) const TEXT_KIND: &str = "Text";
pub(super) const SHAPE_KIND: &str = "Shape";

/// Keys whose presence marks an untagged element as text.
pub(super) const TEXT_MARKERS: [&str; 2] = ["Text", "FontFamily"];
/// Key whose presence marks an untagged element as a shape.
pub(super) const SHAPE_MARKER: &str = "ShapeType";

/// Top-level record. `E` is [`Value`] when reading, so each element can be
/// classified before it is parsed, and [`EncodedElement`] when writing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DocumentRecord<E> {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f32,
    #[serde(default = "Vec::new")]
    pub elements: Vec<E>,
}

/// Fields shared by every element.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct BaseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub z_index: i32,
}

/// One element: discriminator, shared fields and variant body side by side.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ElementRecord<B> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub base: BaseRecord,
    #[serde(flatten)]
    pub body: B,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct TextRecord {
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub text_alignment: WireAlignment,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ShapeRecord {
    #[serde(default)]
    pub shape_type: WireShapeKind,
    #[serde(default = "default_stroke_thickness")]
    pub stroke_thickness: f32,
}

/// Element as written by the encoder.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum EncodedElement {
    Text(ElementRecord<TextRecord>),
    Shape(ElementRecord<ShapeRecord>),
}

// =============================================================================
// Enumerations with legacy integer codes
// =============================================================================

/// Accepts either a name or a legacy integer code.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Name(String),
    Code(u64),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct WireShapeKind(pub ShapeKind);

impl Serialize for WireShapeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for WireShapeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kind = match EnumRepr::deserialize(deserializer)? {
            EnumRepr::Name(name) => name.parse().map_err(D::Error::custom)?,
            EnumRepr::Code(code) => {
                warn!(code; "Reading legacy numeric shape type");
                match code {
                    0 => ShapeKind::Rectangle,
                    1 => ShapeKind::Circle,
                    2 => ShapeKind::Line,
                    _ => return Err(D::Error::custom(format!("unknown shape type code {code}"))),
                }
            }
        };
        Ok(Self(kind))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct WireAlignment(pub TextAlignment);

impl Serialize for WireAlignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for WireAlignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let alignment = match EnumRepr::deserialize(deserializer)? {
            EnumRepr::Name(name) if name.eq_ignore_ascii_case("justify") => {
                warn!("Justified text is not supported, reading it as start-aligned");
                TextAlignment::Start
            }
            EnumRepr::Name(name) => name.parse().map_err(D::Error::custom)?,
            EnumRepr::Code(code) => {
                warn!(code; "Reading legacy numeric text alignment");
                match code {
                    0 | 3 => TextAlignment::Start,
                    1 => TextAlignment::End,
                    2 => TextAlignment::Center,
                    _ => {
                        return Err(D::Error::custom(format!(
                            "unknown text alignment code {code}"
                        )));
                    }
                }
            }
        };
        Ok(Self(alignment))
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn default_name() -> String {
    String::from(DEFAULT_NAME)
}

fn default_canvas_width() -> f32 {
    DEFAULT_CANVAS_SIZE.width()
}

fn default_canvas_height() -> f32 {
    DEFAULT_CANVAS_SIZE.height()
}

fn default_text() -> String {
    TextContent::default().text().to_string()
}

fn default_font_family() -> String {
    TextContent::default().font_family().to_string()
}

fn default_font_size() -> f32 {
    TextContent::default().font_size()
}

fn default_stroke_thickness() -> f32 {
    ShapeContent::DEFAULT_STROKE_THICKNESS
}

/// Convenience alias for the reading side.
pub(super) type RawDocument = DocumentRecord<Value>;
