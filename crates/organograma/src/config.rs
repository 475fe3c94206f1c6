//! Configuration types for organogram layout and styling.
//!
//! All types implement [`serde::Deserialize`] with a default for every field,
//! so a partial TOML file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout, style and selection settings.
//! - [`LayoutConfig`] - Node box dimensions and spacing used by the layout engine.
//! - [`StyleConfig`] - Edge palette, node fills and background color.
//! - [`SelectionConfig`] - What happens to the selection when the chart input changes.
//!
//! # Example
//!
//! ```
//! # use organograma::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width(), 180.0);
//! assert!(config.style().edge_palette().is_ok());
//! ```

use serde::Deserialize;

use organograma_core::color::Color;

use crate::highlight::{EdgePalette, SelectionPolicy};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Selection configuration section.
    #[serde(default)]
    selection: SelectionConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, selection: SelectionConfig) -> Self {
        Self {
            layout,
            style,
            selection,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the selection configuration.
    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// Checks every section for values the pipeline cannot honor.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.edge_palette()?;
        self.style.company_fill()?;
        self.style.partner_fill()?;
        self.style.background_color()?;
        Ok(())
    }
}

/// Node box dimensions and spacing for the layered layout.
///
/// Defaults: 180×80 boxes, 50 between boxes in a row, 80 between rows,
/// margin 10, and the root pinned 100 above the topmost row center.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    horizontal_gap: f32,
    vertical_gap: f32,
    margin: f32,
    root_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 80.0,
            horizontal_gap: 50.0,
            vertical_gap: 80.0,
            margin: 10.0,
            root_offset: 100.0,
        }
    }
}

impl LayoutConfig {
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Returns the gap between neighboring boxes of the same row.
    pub fn horizontal_gap(&self) -> f32 {
        self.horizontal_gap
    }

    /// Returns the gap between consecutive rows.
    pub fn vertical_gap(&self) -> f32 {
        self.vertical_gap
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Returns how far above the topmost row center the root box starts.
    pub fn root_offset(&self) -> f32 {
        self.root_offset
    }

    /// Checks that dimensions are positive and the root stays above every row.
    ///
    /// # Errors
    ///
    /// Returns a message describing the offending field.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("layout.{name} must be a positive number, got {value}"));
            }
        }

        for (name, value) in [
            ("horizontal_gap", self.horizontal_gap),
            ("vertical_gap", self.vertical_gap),
            ("margin", self.margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("layout.{name} must be zero or positive, got {value}"));
            }
        }

        // The root box top must sit above every other box top (center - half height).
        if !(self.root_offset.is_finite() && self.root_offset > self.node_height / 2.0) {
            return Err(format!(
                "layout.root_offset must be greater than half the node height ({}), got {}",
                self.node_height / 2.0,
                self.root_offset
            ));
        }

        Ok(())
    }
}

/// Visual styling configuration.
///
/// Colors are CSS color strings; they are parsed when requested.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    company_edge_color: String,
    partner_edge_color: String,
    neutral_edge_color: String,
    company_fill: String,
    partner_fill: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            company_edge_color: "#3b82f6".to_string(),
            partner_edge_color: "#10b981".to_string(),
            neutral_edge_color: "#bbb".to_string(),
            company_fill: "#ecfdf5".to_string(),
            partner_fill: "#eff6ff".to_string(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the edge palette built from the three edge colors.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first color that fails to parse.
    pub fn edge_palette(&self) -> Result<EdgePalette, String> {
        let parse = |name: &str, value: &str| {
            Color::new(value).map_err(|err| format!("Invalid {name} in config: {err}"))
        };

        Ok(EdgePalette::new(
            parse("company_edge_color", &self.company_edge_color)?,
            parse("partner_edge_color", &self.partner_edge_color)?,
            parse("neutral_edge_color", &self.neutral_edge_color)?,
        ))
    }

    /// Returns the fill color of company boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn company_fill(&self) -> Result<Color, String> {
        Color::new(&self.company_fill).map_err(|err| format!("Invalid company_fill in config: {err}"))
    }

    /// Returns the fill color of partner boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn partner_fill(&self) -> Result<Color, String> {
        Color::new(&self.partner_fill).map_err(|err| format!("Invalid partner_fill in config: {err}"))
    }
}

/// Selection behavior configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SelectionConfig {
    /// Policy applied to the current selection when the input graph changes.
    #[serde(default)]
    on_change: SelectionPolicy,
}

impl SelectionConfig {
    pub fn new(on_change: SelectionPolicy) -> Self {
        Self { on_change }
    }

    /// Returns the policy applied when the chart input changes.
    pub fn on_change(&self) -> SelectionPolicy {
        self.on_change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.node_width(), 180.0);
        assert_eq!(layout.node_height(), 80.0);
        assert_eq!(layout.horizontal_gap(), 50.0);
        assert_eq!(layout.vertical_gap(), 80.0);
        assert_eq!(layout.margin(), 10.0);
        assert_eq!(layout.root_offset(), 100.0);
    }

    #[test]
    fn test_root_offset_must_clear_half_height() {
        let layout = LayoutConfig {
            root_offset: 40.0,
            ..LayoutConfig::default()
        };
        let err = layout.validate().unwrap_err();
        assert!(err.contains("root_offset"));

        let layout = LayoutConfig {
            root_offset: 40.5,
            ..LayoutConfig::default()
        };
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_invalid_palette_color() {
        let style = StyleConfig {
            partner_edge_color: "not-a-color".to_string(),
            ..StyleConfig::default()
        };
        let err = style.edge_palette().unwrap_err();
        assert!(err.contains("partner_edge_color"));
    }

    #[test]
    fn test_background_color_optional() {
        let style = StyleConfig::default();
        assert_eq!(style.background_color(), Ok(None));
    }
}
