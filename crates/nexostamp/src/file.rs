//! Reading and writing `.nxs` stamp files.
//!
//! These are thin I/O wrappers over [`crate::codec`]. A missing or unreadable
//! file surfaces as [`StampError::Io`]; only content problems become
//! [`StampError::Decode`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use nexostamp_core::document::Document;

use crate::{StampError, codec};

/// File extension of stamp documents, without the dot.
pub const STAMP_EXTENSION: &str = "nxs";

/// Encodes `document` and writes it to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`StampError::Encode`] if the document cannot be encoded and
/// [`StampError::Io`] if the file cannot be written.
pub fn save_document(document: &Document, path: impl AsRef<Path>) -> Result<(), StampError> {
    let path = path.as_ref();
    let content = codec::encode(document)?;
    fs::write(path, content)?;

    info!(
        path:% = path.display(),
        name = document.name(),
        elements = document.len();
        "Saved document"
    );
    Ok(())
}

/// Reads and decodes the document stored at `path`.
///
/// # Errors
///
/// Returns [`StampError::Io`] if the file is missing or unreadable and
/// [`StampError::Decode`] if its content is not a valid stamp document.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, StampError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let document = codec::decode(&content)?;

    info!(
        path:% = path.display(),
        name = document.name(),
        elements = document.len();
        "Loaded document"
    );
    Ok(document)
}

/// Appends the `.nxs` extension unless `path` already carries it.
pub fn with_stamp_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(STAMP_EXTENSION));

    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(STAMP_EXTENSION);
        PathBuf::from(name)
    }
}
