//! NexoStamp Core Types and Definitions
//!
//! This crate provides the data model of a NexoStamp stamp design. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Identifiers**: Opaque element identifiers ([`identifier::ElementId`])
//! - **Elements**: Text and shape primitives ([`element`] module)
//! - **Document**: The ordered element aggregate with canvas metadata ([`document::Document`])
//! - **Selection**: Editor-side selection state kept out of the document ([`selection::Selection`])
//!
//! The model carries no color and performs no drawing; rendering belongs to
//! whichever collaborator consumes a print layout.

pub mod document;
pub mod element;
pub mod geometry;
pub mod identifier;
pub mod selection;
