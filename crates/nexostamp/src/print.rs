//! Print jobs.
//!
//! A [`PrintJob`] bundles what a printing host needs besides the device
//! itself: the document, the number of copies per page, the margin and the
//! job title shown in the spooler. The host supplies the printable area and
//! receives a [`PrintLayout`] to rasterize.

use log::info;

use nexostamp_core::{document::Document, geometry::Size};

use crate::{
    StampError,
    config::PrintConfig,
    layout::{PrintLayout, PrintLayoutEngine},
};

/// Prefix of every spooler job title.
pub const JOB_TITLE_PREFIX: &str = "NexoStamp";

/// One print request for a document.
#[derive(Debug, Clone)]
pub struct PrintJob<'a> {
    document: &'a Document,
    copies: u32,
    engine: PrintLayoutEngine,
}

impl<'a> PrintJob<'a> {
    /// Creates a job printing one copy with the default margin.
    pub fn new(document: &'a Document) -> Self {
        Self::with_config(document, &PrintConfig::default())
    }

    /// Creates a job using the copies and margin from `config`.
    pub fn with_config(document: &'a Document, config: &PrintConfig) -> Self {
        Self {
            document,
            copies: config.copies(),
            engine: config.layout_engine(),
        }
    }

    /// Sets the number of copies per page.
    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies;
        self
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Job title shown by the print spooler
    pub fn title(&self) -> String {
        format!("{JOB_TITLE_PREFIX} - {}", self.document.name())
    }

    /// Lays the job out on a printable area of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::Layout`] when the layout is infeasible.
    pub fn layout(&self, surface: Size) -> Result<PrintLayout<'a>, StampError> {
        info!(
            title = self.title(),
            copies = self.copies,
            surface:? = surface;
            "Preparing print job"
        );
        Ok(self.engine.layout(self.document, self.copies, surface)?)
    }
}
