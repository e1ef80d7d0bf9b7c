//! Element identifiers.
//!
//! This module provides the [`ElementId`] type, an opaque token minted once per
//! element and never changed afterwards.

use std::{fmt, str::FromStr};

use uuid::Uuid;

/// Opaque, globally unique identifier of a stamp element.
///
/// Identifiers are random v4 UUIDs. They are formatted and parsed as the
/// hyphenated UUID string, which is also how they appear in `.nxs` files.
///
/// # Examples
///
/// ```
/// use nexostamp_core::identifier::ElementId;
///
/// let id = ElementId::new();
/// let parsed: ElementId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// assert_ne!(id, ElementId::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Mints a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ElementId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ElementId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
