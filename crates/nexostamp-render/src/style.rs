//! Preview styling.
//!
//! Stamps are previewed as white ink on a black stamp face, laid out on a
//! white page. [`StyleConfig`] deserializes from the host's configuration,
//! e.g. a `[style]` TOML table:
//!
//! ```toml
//! [style]
//! page = "#f5f5f5"
//! background = "navy"
//! foreground = "white"
//! ```

use serde::Deserialize;

use crate::{RenderError, color::Color};

/// Color strings for the three layers of a preview.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyleConfig {
    /// Page behind the grid.
    #[serde(default = "default_page")]
    page: String,

    /// Stamp face filling each cell.
    #[serde(default = "default_background")]
    background: String,

    /// Ink used for every element.
    #[serde(default = "default_foreground")]
    foreground: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            page: default_page(),
            background: default_background(),
            foreground: default_foreground(),
        }
    }
}

impl StyleConfig {
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = page.into();
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn with_foreground(mut self, foreground: impl Into<String>) -> Self {
        self.foreground = foreground.into();
        self
    }

    /// Returns the parsed page [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidColor`] if the string is not a CSS color.
    pub fn page_color(&self) -> Result<Color, RenderError> {
        parse("page", &self.page)
    }

    /// Returns the parsed stamp face [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidColor`] if the string is not a CSS color.
    pub fn background_color(&self) -> Result<Color, RenderError> {
        parse("background", &self.background)
    }

    /// Returns the parsed ink [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidColor`] if the string is not a CSS color.
    pub fn foreground_color(&self) -> Result<Color, RenderError> {
        parse("foreground", &self.foreground)
    }
}

fn parse(field: &'static str, value: &str) -> Result<Color, RenderError> {
    Color::new(value).map_err(|message| RenderError::InvalidColor { field, message })
}

fn default_page() -> String {
    String::from("white")
}

fn default_background() -> String {
    String::from("black")
}

fn default_foreground() -> String {
    String::from("white")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let style = StyleConfig::default();
        assert!(style.page_color().is_ok());
        assert!(style.background_color().is_ok());
        assert!(style.foreground_color().is_ok());
    }

    #[test]
    fn test_invalid_color_names_field() {
        let style = StyleConfig::default().with_foreground("sparkly");
        let err = style.foreground_color().unwrap_err();
        assert!(matches!(err, RenderError::InvalidColor { field: "foreground", .. }));
    }

    #[test]
    fn test_builders() {
        let style = StyleConfig::default()
            .with_page("#eee")
            .with_background("navy");
        assert_eq!(style.page, "#eee");
        assert_eq!(style.background, "navy");
        assert_eq!(style.foreground, "white");
    }
}
