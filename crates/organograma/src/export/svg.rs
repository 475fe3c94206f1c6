//! SVG rendering of organograms.

use std::collections::BTreeMap;

use log::{debug, info};
use svg::{
    Document,
    node::element::{
        Animate, Definitions, Filter, FilterEffectDropShadow, Group, Line, Marker, Path,
        Rectangle, Text,
    },
};

use organograma_core::{
    apply_stroke,
    color::Color,
    draw::{StrokeDefinition, StrokeStyle},
    geometry::Point,
    identifier::NodeKind,
};

use super::{Error, Exporter};
use crate::{
    chart::OrgChart,
    highlight::{EdgePalette, Emphasis, StyledEdge},
    layout::{PositionedGraph, PositionedNode},
    structure::EdgeKind,
};

/// Space kept around the outermost node boxes.
const PADDING: f32 = 20.0;

/// Builder for [`SvgExporter`].
#[derive(Debug, Clone, Default)]
pub struct SvgBuilder {
    palette: Option<EdgePalette>,
    company_fill: Option<Color>,
    partner_fill: Option<Color>,
    background: Option<Color>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the colors used for connected and idle edges
    pub fn with_palette(mut self, palette: EdgePalette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Set the fill colors of company and partner boxes
    pub fn with_fills(mut self, company: Color, partner: Color) -> Self {
        self.company_fill = Some(company);
        self.partner_fill = Some(partner);
        self
    }

    /// Set the background color; no background is painted by default
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Build the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a default fill color cannot be parsed.
    pub fn build(self) -> Result<SvgExporter, Error> {
        let parse = |color: &str| Color::new(color).map_err(Error::Render);

        Ok(SvgExporter {
            palette: self.palette.unwrap_or_default(),
            company_fill: self.company_fill.map_or_else(|| parse("#ecfdf5"), Ok)?,
            partner_fill: self.partner_fill.map_or_else(|| parse("#eff6ff"), Ok)?,
            background: self.background,
        })
    }
}

/// Renders a chart to a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    palette: EdgePalette,
    company_fill: Color,
    partner_fill: Color,
    background: Option<Color>,
}

impl SvgExporter {
    fn fill(&self, kind: NodeKind) -> Color {
        match kind {
            NodeKind::Company => self.company_fill,
            NodeKind::Partner => self.partner_fill,
        }
    }

    fn render_document(&self, chart: &OrgChart) -> Result<Document, Error> {
        let graph = chart.graph();
        let bounds = graph
            .bounds()
            .ok_or_else(|| Error::Render("chart has no nodes".to_string()))?
            .expand(PADDING);

        let mut styled = chart.styled_edges(&self.palette);
        // Stable: equal z-index keeps edge order
        styled.sort_by_key(|styled| styled.style().z_index());

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height())
            .add(self.definitions(&styled));

        if let Some(background) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", background),
            );
        }

        let mut edges = Group::new().set("class", "edges");
        for styled_edge in &styled {
            if let Some(line) = self.render_edge(graph, styled_edge) {
                edges = edges.add(line);
            }
        }

        let mut nodes = Group::new().set("class", "nodes");
        for node in graph.nodes() {
            nodes = nodes.add(self.render_node(node, chart.emphasis(node.id())));
        }

        Ok(doc.add(edges).add(nodes))
    }

    /// Arrow markers for every marker color, and one glow filter per glow color.
    fn definitions(&self, styled: &[StyledEdge]) -> Definitions {
        let mut marker_colors = BTreeMap::new();
        let mut glow_colors = BTreeMap::new();
        for styled_edge in styled {
            let style = styled_edge.style();
            marker_colors.insert(style.marker_color().to_id_safe_string(), style.marker_color());
            if let Some(glow) = style.glow() {
                glow_colors.insert(glow.color().to_id_safe_string(), glow);
            }
        }

        let mut defs = Definitions::new();
        for (id, color) in &marker_colors {
            defs = defs.add(
                Marker::new()
                    .set("id", format!("arrow-{id}"))
                    .set("viewBox", "0 0 10 10")
                    .set("refX", 9)
                    .set("refY", 5)
                    .set("markerWidth", 6)
                    .set("markerHeight", 6)
                    .set("orient", "auto")
                    .add(
                        Path::new()
                            .set("d", "M 0 0 L 10 5 L 0 10 z")
                            .set("fill", color),
                    ),
            );
        }

        for (id, glow) in &glow_colors {
            defs = defs.add(
                Filter::new()
                    .set("id", format!("glow-{id}"))
                    .set("x", "-50%")
                    .set("y", "-50%")
                    .set("width", "200%")
                    .set("height", "200%")
                    .add(
                        FilterEffectDropShadow::new()
                            .set("dx", 0)
                            .set("dy", 0)
                            .set("stdDeviation", glow.radius() / 2.0)
                            .set("flood-color", &glow.color()),
                    ),
            );
        }

        defs
    }

    fn render_edge(&self, graph: &PositionedGraph, styled: &StyledEdge) -> Option<Line> {
        let edge = styled.edge();
        let style = styled.style();
        let (Some(source), Some(target)) = (graph.node(edge.source()), graph.node(edge.target()))
        else {
            debug!(edge_id = edge.id(); "Skipping edge with unplaced endpoint");
            return None;
        };

        let (start, end) = attachment_points(source, target);

        let mut stroke = style.stroke().clone();
        if style.animated() {
            stroke.set_style(StrokeStyle::Dashed);
        }

        let mut line = Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("data-id", edge.id())
            .set(
                "marker-end",
                format!("url(#arrow-{})", style.marker_color().to_id_safe_string()),
            );
        line = apply_stroke!(line, &stroke);

        if let Some(glow) = style.glow() {
            line = line.set(
                "filter",
                format!("url(#glow-{})", glow.color().to_id_safe_string()),
            );
        }

        if style.animated() {
            line = line.add(
                Animate::new()
                    .set("attributeName", "stroke-dashoffset")
                    .set("from", 10)
                    .set("to", 0)
                    .set("dur", "0.5s")
                    .set("repeatCount", "indefinite"),
            );
        }

        Some(line)
    }

    fn render_node(&self, node: &PositionedNode, emphasis: Emphasis) -> Group {
        let bounds = node.bounds();
        let outline = match emphasis {
            Emphasis::Selected => StrokeDefinition::new(outline_color(&self.palette, node.kind()), 3.0),
            Emphasis::Neighbor => StrokeDefinition::new(outline_color(&self.palette, node.kind()), 2.0),
            Emphasis::Normal => StrokeDefinition::new(self.palette.neutral(), 1.0),
        };

        let rect = Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", 8)
            .set("fill", &self.fill(node.kind()));
        let rect = apply_stroke!(rect, &outline);

        let center_x = bounds.min_x() + bounds.width() / 2.0;
        let center_y = bounds.min_y() + bounds.height() / 2.0;
        let caption = match node.kind() {
            NodeKind::Company => "Empresa",
            NodeKind::Partner => "Sócio",
        };

        Group::new()
            .set("data-id", node.id().to_string())
            .set("class", format!("node {}", node.kind()))
            .add(rect)
            .add(
                Text::new(caption)
                    .set("x", center_x)
                    .set("y", center_y - 12.0)
                    .set("text-anchor", "middle")
                    .set("font-family", "sans-serif")
                    .set("font-size", 11)
                    .set("fill", "#6b7280"),
            )
            .add(
                Text::new(node.label())
                    .set("x", center_x)
                    .set("y", center_y + 10.0)
                    .set("text-anchor", "middle")
                    .set("font-family", "sans-serif")
                    .set("font-size", 14),
            )
    }
}

/// Outline color for an emphasized node: the color of the edges it originates.
fn outline_color(palette: &EdgePalette, kind: NodeKind) -> Color {
    match kind {
        NodeKind::Company => palette.for_kind(EdgeKind::CompanyToPartner),
        NodeKind::Partner => palette.for_kind(EdgeKind::PartnerToCompany),
    }
}

/// Line endpoints between two boxes: bottom of the upper box to top of the lower one.
fn attachment_points(source: &PositionedNode, target: &PositionedNode) -> (Point, Point) {
    let (source_bounds, target_bounds) = (source.bounds(), target.bounds());
    if source_bounds.min_y() <= target_bounds.min_y() {
        (source_bounds.bottom_center(), target_bounds.top_center())
    } else {
        (source_bounds.top_center(), target_bounds.bottom_center())
    }
}

impl Exporter for SvgExporter {
    fn export(&self, chart: &OrgChart) -> Result<String, Error> {
        let doc = self.render_document(chart)?;
        info!(nodes = chart.graph().nodes().len(); "SVG rendered");
        Ok(doc.to_string())
    }
}
