//! Stroke and line-style definitions.
//!
//! - [`StrokeDefinition`]: color (with opacity carried as alpha), width and pattern
//! - [`StrokeStyle`]: line patterns (solid or dashed)
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#3b82f6"`, `0.3` |
//! | `width` | `stroke-width` | `2.5` |
//! | `style` | `stroke-dasharray` | `"5,5"` |

use serde::Serialize;

use crate::color::Color;

/// Defines the visual pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line with equal dash and gap lengths (5px dash, 5px gap)
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// A stroke definition for rendering edges and node outlines.
///
/// Opacity is not a separate field: it is the alpha channel of `color`.
///
/// # Examples
///
/// ```
/// use organograma_core::draw::StrokeDefinition;
/// use organograma_core::color::Color;
///
/// let faded = StrokeDefinition::new(Color::new("#bbb").unwrap().with_alpha(0.3), 1.5);
/// assert!((faded.opacity() - 0.3).abs() < 0.001);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke opacity (the color's alpha).
    pub fn opacity(&self) -> f32 {
        self.color.alpha()
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Sets the stroke style.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use organograma_core::draw::StrokeDefinition;
/// use organograma_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("#3b82f6").unwrap(), 2.5);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 0)
///     .set("x2", 0)
///     .set("y2", 100);
///
/// let line = organograma_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.opacity())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stroke_is_solid() {
        let mut stroke = StrokeDefinition::new(Color::default(), 1.0);
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);

        stroke.set_style(StrokeStyle::Dashed);
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);
    }

    #[test]
    fn test_stroke_opacity_follows_alpha() {
        let color = Color::new("#bbb").unwrap();
        assert!((StrokeDefinition::new(color, 1.0).opacity() - 1.0).abs() < 0.001);
        assert!((StrokeDefinition::new(color.with_alpha(0.3), 1.0).opacity() - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_stroke_style_dasharray() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value(), Some("5,5"));
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        use svg::node::element::Line;

        let mut stroke = StrokeDefinition::new(Color::new("red").unwrap(), 2.0);
        stroke.set_style(StrokeStyle::Dashed);
        let line = crate::apply_stroke!(Line::new(), &stroke).to_string();

        assert!(line.contains("stroke-width=\"2\""));
        assert!(line.contains("stroke-dasharray=\"5,5\""));
        assert!(line.contains("stroke-opacity=\"1\""));
    }
}
