//! NexoStamp - the document engine behind a stamp design editor.
//!
//! A stamp is a small [`Document`](document::Document) of text and shape
//! elements on a fixed canvas. This crate adds everything an editor needs on
//! top of the data model in `nexostamp-core`:
//!
//! - [`codec`] and [`file`]: the `.nxs` JSON format, including files written
//!   by earlier releases.
//! - [`history`] and [`session`]: snapshot undo/redo and the live editing
//!   session that drives it.
//! - [`layout`] and [`print`]: fitting N copies of a stamp onto one page.
//! - [`config`]: TOML configuration for print defaults.
//!
//! The library never installs a logger; hosts choose one for the [`log`]
//! facade.
//!
//! # Examples
//!
//! ```
//! use nexostamp::{codec, layout, session::Session};
//! use nexostamp::element::ShapeKind;
//!
//! let mut session = Session::new();
//! session.add_text();
//! session.add_shape(ShapeKind::Circle);
//!
//! let json = codec::encode(session.document()).unwrap();
//! let restored = codec::decode(&json).unwrap();
//! assert_eq!(&restored, session.document());
//!
//! let plan = layout::layout(&restored, 4, 400.0, 300.0).unwrap();
//! assert_eq!(plan.placements().len(), 8);
//! ```

pub mod codec;
pub mod config;
pub mod file;
pub mod history;
pub mod layout;
pub mod print;
pub mod session;

mod error;

pub use nexostamp_core::{document, element, geometry, identifier, selection};

pub use error::StampError;
