//! Layered layout for organograms.
//!
//! The [`Engine`] assigns every node a top-left position. Ranking and crossing
//! minimization are delegated to `rust-sugiyama` (see the `sugiyama`
//! submodule); this module only turns the resulting grid cells into pixel
//! coordinates and pins the root company above every other row.
//!
//! # Grid to pixels
//!
//! For a node in column `slot` of row `rank`:
//!
//! ```text
//! center.x = margin + slot * (width + horizontal_gap) + width / 2
//! center.y = margin + rank * (height + vertical_gap) + height / 2
//! top_left = center - (width / 2, height / 2)
//! ```
//!
//! The root's top is instead placed at `min(center.y) - root_offset`, where the
//! minimum runs over *all* nodes, so the root is on top even when the layered
//! algorithm ranked it below a back-referencing partner.
//!
//! Layout is recomputed from scratch on each call and is deterministic for a
//! given graph.

mod fallback;
mod sugiyama;

use log::{debug, info, trace, warn};
use serde::Serialize;

use organograma_core::{
    geometry::{Bounds, Point, Size},
    identifier::{NodeId, NodeKind},
};

use crate::{
    config::LayoutConfig,
    structure::{GraphEdge, GraphNode, OrgGraph},
};

/// A grid cell assigned to a node before conversion to pixels.
///
/// `slot` may be fractional: the layered algorithm centers parents over their
/// children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cell {
    slot: f32,
    rank: usize,
}

impl Cell {
    pub(crate) fn new(slot: f32, rank: usize) -> Self {
        Self { slot, rank }
    }

    pub(crate) fn slot(self) -> f32 {
        self.slot
    }

    pub(crate) fn rank(self) -> usize {
        self.rank
    }
}

/// A node with its computed position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    node: GraphNode,
    position: Point,
    size: Size,
    draggable: bool,
}

impl PositionedNode {
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn label(&self) -> &str {
        self.node.label()
    }

    /// Returns the top-left corner of the node box.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns whether the host may drag this node. Always false.
    pub fn draggable(&self) -> bool {
        self.draggable
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }
}

/// An organogram with positions attached to every node.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedGraph {
    root: NodeId,
    nodes: Vec<PositionedNode>,
    edges: Vec<GraphEdge>,
}

impl PositionedGraph {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns positioned nodes in the graph's insertion order.
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns the union of all node boxes, or `None` for an empty graph.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .iter()
            .map(PositionedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

/// Snapshot of node positions keyed by id, for comparisons in tests and hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionSet(Vec<(NodeId, Point)>);

impl From<&PositionedGraph> for PositionSet {
    fn from(graph: &PositionedGraph) -> Self {
        Self(
            graph
                .nodes()
                .iter()
                .map(|node| (node.id(), node.position()))
                .collect(),
        )
    }
}

/// Gap kept between the root's top and the topmost row when the configured
/// offset is too small.
const MIN_ROOT_CLEARANCE: f32 = 10.0;

/// The layered layout engine.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Size of every node box
    node_size: Size,

    /// Gap between neighboring boxes of one row
    horizontal_gap: f32,

    /// Gap between rows
    vertical_gap: f32,

    /// Margin before the first row and column
    margin: f32,

    /// Distance from the topmost row center to the root's top edge
    root_offset: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new engine with the default box size and spacing.
    pub fn new() -> Self {
        Self::from(&LayoutConfig::default())
    }

    /// Set the gap between neighboring boxes in a row
    pub fn set_horizontal_gap(&mut self, gap: f32) -> &mut Self {
        self.horizontal_gap = gap;
        self
    }

    /// Set the gap between rows
    pub fn set_vertical_gap(&mut self, gap: f32) -> &mut Self {
        self.vertical_gap = gap;
        self
    }

    /// Lays out `graph` with its own root pinned on top.
    pub fn layout(&self, graph: &OrgGraph) -> PositionedGraph {
        self.layout_with_root(graph, graph.root())
    }

    /// Lays out `graph`, pinning `root` above every other node.
    ///
    /// If `root` is not a node of the graph no node is pinned.
    pub fn layout_with_root(&self, graph: &OrgGraph, root: NodeId) -> PositionedGraph {
        info!(nodes = graph.node_count(), edges = graph.edge_count(); "Calculating organogram layout");

        let cells = sugiyama::cells(graph, root).unwrap_or_else(|| fallback::cells(graph, root));

        let centers: Vec<Point> = cells.iter().map(|cell| self.center(*cell)).collect();
        let min_center_y = centers
            .iter()
            .map(|center| center.y())
            .fold(f32::INFINITY, f32::min);
        let half = self.node_size.half_extent();
        let root_offset = self.effective_root_offset();

        let nodes: Vec<PositionedNode> = graph
            .nodes()
            .zip(centers)
            .map(|(node, center)| {
                let mut position = center.sub_point(half);
                if node.id() == root {
                    position = position.with_y(min_center_y - root_offset);
                    debug!(root:% = root, x = position.x(), y = position.y(); "Pinned root above topmost row");
                }
                trace!(node_id:% = node.id(), x = position.x(), y = position.y(); "Positioned node");

                PositionedNode {
                    node: node.clone(),
                    position,
                    size: self.node_size,
                    draggable: false,
                }
            })
            .collect();

        PositionedGraph {
            root,
            nodes,
            edges: graph.edges().copied().collect(),
        }
    }

    /// The root's top must sit strictly above every other top edge, which lies
    /// at least half a box height above its row center.
    fn effective_root_offset(&self) -> f32 {
        let half_height = self.node_size.height() / 2.0;
        if self.root_offset.is_finite() && self.root_offset > half_height {
            self.root_offset
        } else {
            let clamped = half_height + MIN_ROOT_CLEARANCE;
            warn!(
                root_offset = self.root_offset,
                clamped = clamped;
                "Root offset does not clear the topmost row, clamping"
            );
            clamped
        }
    }

    fn center(&self, cell: Cell) -> Point {
        let column_pitch = self.node_size.width() + self.horizontal_gap;
        let row_pitch = self.node_size.height() + self.vertical_gap;
        let half = self.node_size.half_extent();

        Point::new(
            self.margin + cell.slot() * column_pitch + half.x(),
            self.margin + cell.rank() as f32 * row_pitch + half.y(),
        )
    }
}

impl From<&LayoutConfig> for Engine {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            node_size: Size::new(config.node_width(), config.node_height()),
            horizontal_gap: config.horizontal_gap(),
            vertical_gap: config.vertical_gap(),
            margin: config.margin(),
            root_offset: config.root_offset(),
        }
    }
}
