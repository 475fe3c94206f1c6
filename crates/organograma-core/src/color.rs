//! Color handling for organograma charts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for working with colors
//! in edge and node styling.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use serde::{Serialize, Serializer};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#3b82f6", "rgb(59, 130, 246)", "gray", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use organograma_core::color::Color;
    ///
    /// let blue = Color::new("#3b82f6").unwrap();
    /// let gray = Color::new("#bbb").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns a sanitized, ID-safe string representation of this color.
    ///
    /// The result is usable as an SVG ID fragment (marker and filter ids). It
    /// contains only alphanumeric characters and underscores and always starts
    /// with a letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use organograma_core::color::Color;
    ///
    /// let color = Color::new("#10b981").unwrap();
    /// let id_str = color.to_id_safe_string();
    /// assert!(id_str.chars().all(|c| c.is_alphanumeric() || c == '_'));
    /// ```
    pub fn to_id_safe_string(self) -> String {
        let mut sanitized: String = self
            .to_string()
            .replace('#', "hex")
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();

        if !sanitized.chars().next().is_some_and(|c| c.is_alphabetic()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use organograma_core::color::Color;
    ///
    /// let faded = Color::new("#bbb").unwrap().with_alpha(0.3);
    /// assert!((faded.alpha() - 0.3).abs() < 0.001);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#3b82f6").is_ok());
        assert!(Color::new("#bbb").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_string(), "black");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("#10b981").unwrap();
        assert!((color.alpha() - 1.0).abs() < 0.001);

        let faded = color.with_alpha(0.3);
        assert!((faded.alpha() - 0.3).abs() < 0.001);
        assert_ne!(color, faded);
    }

    #[test]
    fn test_color_to_id_safe_string() {
        let safe_id = Color::new("#3b82f6").unwrap().to_id_safe_string();
        assert!(safe_id.chars().all(|c| c.is_alphanumeric() || c == '_'));
        assert!(safe_id.chars().next().unwrap().is_alphabetic());
    }

    #[test]
    fn test_distinct_colors_have_distinct_ids() {
        let blue = Color::new("#3b82f6").unwrap().to_id_safe_string();
        let green = Color::new("#10b981").unwrap().to_id_safe_string();
        assert_ne!(blue, green);
    }

    #[test]
    fn test_color_serializes_as_display_string() {
        let color = Color::new("#bbb").unwrap();
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, format!("\"{color}\""));
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let blue1 = Color::new("#3b82f6").unwrap();
        let blue2 = Color::new("#3b82f6").unwrap();
        let green = Color::new("#10b981").unwrap();

        assert_eq!(blue1, blue2);
        assert_ne!(blue1, green);

        let mut set = HashSet::new();
        set.insert(blue1);
        assert!(set.contains(&blue2));
        assert!(!set.contains(&green));
    }
}
