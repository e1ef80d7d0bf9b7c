//! Error types for NexoStamp operations.
//!
//! This module provides the top-level error type [`StampError`], which wraps
//! the per-concern errors of the engine so hosts can use a single `?` chain
//! across loading, editing, layout and saving.

use std::io;

use thiserror::Error;

use crate::{
    codec::{DecodeError, EncodeError},
    config::ConfigError,
    layout::LayoutError,
};

/// The main error type for NexoStamp operations.
///
/// Every variant is recoverable: the caller can retry with corrected input.
#[derive(Debug, Error)]
pub enum StampError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
