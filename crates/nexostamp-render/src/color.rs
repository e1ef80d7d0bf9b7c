//! Colors for the print preview.
//!
//! [`Color`] wraps [`DynamicColor`] from the `color` crate so styles can be
//! written as any CSS color string.

use std::{fmt, str::FromStr};

use color::{DynamicColor, palette::css};

/// A CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#000"`, `"rgb(0, 0, 0)"` or `"black"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nexostamp_render::color::Color;
    ///
    /// assert!(Color::new("#1a1a1a").is_ok());
    /// assert!(Color::new("ink").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    pub fn white() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(css::WHITE),
        }
    }

    pub fn black() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(css::BLACK),
        }
    }

    /// Alpha component, from 0.0 (transparent) to 1.0 (opaque)
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("rgba(0, 0, 0, 0.5)").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_named_constructors_match_parsed() {
        assert_eq!(
            Color::white().color.components,
            Color::new("white").unwrap().color.components
        );
        assert_eq!(
            Color::black().color.components,
            Color::new("black").unwrap().color.components
        );
    }

    #[test]
    fn test_alpha() {
        assert_eq!(Color::black().alpha(), 1.0);
        assert_eq!(Color::new("rgba(0, 0, 0, 0.5)").unwrap().alpha(), 0.5);
    }
}
