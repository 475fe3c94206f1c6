//! Interactive highlighting.
//!
//! This module holds the single piece of mutable UI state, the [`Selection`],
//! and the pure functions that derive edge styles and node emphasis from it.
//! Styles are recomputed on every call; nothing is cached between renders.
//!
//! # Edge styling
//!
//! An edge is *connected* when a node is selected and that node is one of the
//! edge's endpoints.
//!
//! | Property | Connected | Not connected |
//! |----------|-----------|---------------|
//! | stroke color | by edge kind | neutral |
//! | opacity | 1.0 | 0.3 |
//! | stroke width | 2.5 | 1.5 |
//! | animated | yes | no |
//! | glow | 4px drop shadow in the stroke color | none |
//! | arrow color | by edge kind | neutral |
//! | z-index | 1000 | 0 |

use log::debug;
use serde::{Deserialize, Serialize};

use organograma_core::{color::Color, draw::StrokeDefinition, identifier::NodeId};

use crate::structure::{EdgeKind, GraphEdge};

const CONNECTED_WIDTH: f32 = 2.5;
const IDLE_WIDTH: f32 = 1.5;
const IDLE_OPACITY: f32 = 0.3;
const GLOW_RADIUS: f32 = 4.0;
const CONNECTED_Z_INDEX: i32 = 1000;
const IDLE_Z_INDEX: i32 = 0;

/// At most one selected node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NodeId>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a click on `id`.
    ///
    /// Clicking the selected node clears the selection; clicking any other
    /// node selects it instead.
    pub fn toggle(&mut self, id: NodeId) {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        debug!(selected:? = self.selected.map(|id| id.to_string()); "Selection changed");
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected == Some(id)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Applies `policy` after the chart input changed.
    ///
    /// `contains` reports whether a node id exists in the new graph.
    pub fn apply_policy(&mut self, policy: SelectionPolicy, contains: impl Fn(NodeId) -> bool) {
        match (policy, self.selected) {
            (SelectionPolicy::Keep, _) | (_, None) => {}
            (SelectionPolicy::Clear, Some(_)) => self.clear(),
            (SelectionPolicy::ClearIfMissing, Some(id)) => {
                if !contains(id) {
                    self.clear();
                }
            }
        }
    }
}

/// What happens to the selection when the chart input changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Keep the selection as is, even if the node no longer exists.
    #[default]
    Keep,
    /// Always clear the selection.
    Clear,
    /// Clear the selection only when the selected node is not in the new graph.
    ClearIfMissing,
}

/// Fixed colors used by edge styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePalette {
    company: Color,
    partner: Color,
    neutral: Color,
}

impl EdgePalette {
    /// Creates a palette from the company-sourced, partner-sourced and idle colors.
    pub fn new(company: Color, partner: Color, neutral: Color) -> Self {
        Self {
            company,
            partner,
            neutral,
        }
    }

    /// Returns the color of a connected edge of the given kind.
    pub fn for_kind(&self, kind: EdgeKind) -> Color {
        match kind {
            EdgeKind::CompanyToPartner => self.company,
            EdgeKind::PartnerToCompany => self.partner,
        }
    }

    /// Returns the color of edges not connected to the selection.
    pub fn neutral(&self) -> Color {
        self.neutral
    }
}

impl Default for EdgePalette {
    fn default() -> Self {
        Self::new(
            Color::new("#3b82f6").expect("valid palette color"),
            Color::new("#10b981").expect("valid palette color"),
            Color::new("#bbb").expect("valid palette color"),
        )
    }
}

/// A drop-shadow glow around an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glow {
    color: Color,
    radius: f32,
}

impl Glow {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Visual style of one edge for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStyle {
    connected: bool,
    stroke: StrokeDefinition,
    animated: bool,
    glow: Option<Glow>,
    marker_color: Color,
    z_index: i32,
}

impl EdgeStyle {
    /// Returns true if the edge touches the selected node.
    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn opacity(&self) -> f32 {
        self.stroke.opacity()
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    pub fn glow(&self) -> Option<Glow> {
        self.glow
    }

    /// Returns the color of the arrowhead at the target end.
    pub fn marker_color(&self) -> Color {
        self.marker_color
    }

    /// Returns the stacking order; higher values paint on top.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }
}

/// An edge paired with its derived style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledEdge {
    edge: GraphEdge,
    style: EdgeStyle,
}

impl StyledEdge {
    pub fn edge(&self) -> &GraphEdge {
        &self.edge
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }
}

/// Derives the style of `edge` for `selection`.
pub fn style_edge(edge: &GraphEdge, selection: &Selection, palette: &EdgePalette) -> EdgeStyle {
    let connected = selection.selected().is_some_and(|id| edge.touches(id));

    if connected {
        let color = palette.for_kind(edge.kind());
        EdgeStyle {
            connected,
            stroke: StrokeDefinition::new(color, CONNECTED_WIDTH),
            animated: true,
            glow: Some(Glow {
                color,
                radius: GLOW_RADIUS,
            }),
            marker_color: color,
            z_index: CONNECTED_Z_INDEX,
        }
    } else {
        let neutral = palette.neutral();
        EdgeStyle {
            connected,
            stroke: StrokeDefinition::new(neutral.with_alpha(IDLE_OPACITY), IDLE_WIDTH),
            animated: false,
            glow: None,
            marker_color: neutral,
            z_index: IDLE_Z_INDEX,
        }
    }
}

/// Derives styles for every edge, preserving order.
pub fn style_edges<'a>(
    edges: impl IntoIterator<Item = &'a GraphEdge>,
    selection: &Selection,
    palette: &EdgePalette,
) -> Vec<StyledEdge> {
    edges
        .into_iter()
        .map(|edge| StyledEdge {
            edge: *edge,
            style: style_edge(edge, selection, palette),
        })
        .collect()
}

/// How a node relates to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// The node is the selection.
    Selected,
    /// The node shares an edge with the selection.
    Neighbor,
    /// No selection, or the node is unrelated to it.
    Normal,
}

/// Derives the emphasis of node `id` from the edge set and selection.
pub fn node_emphasis<'a>(
    id: NodeId,
    edges: impl IntoIterator<Item = &'a GraphEdge>,
    selection: &Selection,
) -> Emphasis {
    let Some(selected) = selection.selected() else {
        return Emphasis::Normal;
    };

    if selected == id {
        Emphasis::Selected
    } else if edges
        .into_iter()
        .any(|edge| edge.touches(selected) && edge.touches(id))
    {
        Emphasis::Neighbor
    } else {
        Emphasis::Normal
    }
}
