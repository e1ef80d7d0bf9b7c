//! NexoStamp print preview.
//!
//! Renders a [`PrintLayout`](nexostamp::layout::PrintLayout) to SVG so hosts
//! can show, and users can check, exactly what a print job will put on the
//! page before it reaches a printer.
//!
//! # Examples
//!
//! ```
//! use nexostamp::{document::Document, element::Element, layout};
//! use nexostamp_render::{SvgRenderer, style::StyleConfig};
//!
//! let mut doc = Document::new();
//! doc.add_element(Element::circle());
//!
//! let plan = layout::layout(&doc, 2, 800.0, 300.0).unwrap();
//! let renderer = SvgRenderer::new(&StyleConfig::default()).unwrap();
//! let svg = renderer.render_to_string(&plan);
//! assert!(svg.contains("<ellipse"));
//! ```

pub mod color;
pub mod style;

mod preview;

pub use preview::SvgRenderer;

use thiserror::Error;

/// Errors raised while preparing or writing a preview.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid {field} color: {message}")]
    InvalidColor {
        field: &'static str,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
