//! The state of one organogram visualization.
//!
//! [`OrgChart`] ties the pipeline together for a single chart instance: every
//! call to [`OrgChart::set_data`] rebuilds the graph and recomputes the layout
//! from scratch, and clicks toggle the [`Selection`]. Edge styles are derived
//! on request and never stored.

use log::info;

use organograma_core::{identifier::NodeId, semantic::CompanyPartnerGraph};

use crate::{
    highlight::{self, EdgePalette, Emphasis, Selection, SelectionPolicy, StyledEdge},
    layout::{Engine, PositionedGraph},
    structure,
};

/// One organogram instance: positioned graph plus selection.
#[derive(Debug, Clone)]
pub struct OrgChart {
    engine: Engine,
    policy: SelectionPolicy,
    graph: PositionedGraph,
    selection: Selection,
}

impl OrgChart {
    /// Creates a chart for `data`.
    pub fn new(engine: Engine, policy: SelectionPolicy, data: &CompanyPartnerGraph) -> Self {
        let graph = Self::compute(&engine, data);
        Self {
            engine,
            policy,
            graph,
            selection: Selection::new(),
        }
    }

    /// Replaces the chart input, rebuilding and relaying out everything.
    ///
    /// The current selection is then kept or cleared according to the
    /// chart's [`SelectionPolicy`].
    pub fn set_data(&mut self, data: &CompanyPartnerGraph) {
        self.graph = Self::compute(&self.engine, data);
        let graph = &self.graph;
        self.selection
            .apply_policy(self.policy, |id| graph.contains_node(id));
    }

    /// Handles a click on node `id`.
    pub fn click(&mut self, id: NodeId) {
        self.selection.toggle(id);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the positioned graph.
    pub fn graph(&self) -> &PositionedGraph {
        &self.graph
    }

    /// Derives the style of every edge for the current selection.
    pub fn styled_edges(&self, palette: &EdgePalette) -> Vec<StyledEdge> {
        highlight::style_edges(self.graph.edges(), &self.selection, palette)
    }

    /// Derives how node `id` relates to the current selection.
    pub fn emphasis(&self, id: NodeId) -> Emphasis {
        highlight::node_emphasis(id, self.graph.edges(), &self.selection)
    }

    fn compute(engine: &Engine, data: &CompanyPartnerGraph) -> PositionedGraph {
        info!(company_id = data.company_id(); "Building organogram");
        let graph = structure::build_graph(data);
        engine.layout(&graph)
    }
}
