//! Graph construction for organograms.
//!
//! This module turns a [`CompanyPartnerGraph`] into an [`OrgGraph`]: a
//! deduplicated set of company and partner nodes plus the ownership edges
//! between them.
//!
//! # Node identity
//!
//! Nodes are keyed by [`NodeId`]. A company id that recurs anywhere in the
//! input (as the focal company or as a linked company of any partner) maps to
//! one node, and so does a repeated partner id. The first label seen for an id
//! is kept.
//!
//! # Edges
//!
//! - focal company → partner, for every partner
//! - partner → linked company, for every linked company of that partner
//!
//! An edge is identified by its endpoint pair; repeating a pair does not add a
//! second edge. Nodes and edges iterate in insertion order, with the focal
//! company first.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use serde::Serialize;

use organograma_core::{
    identifier::{NodeId, NodeKind},
    semantic::CompanyPartnerGraph,
};

/// A node of the organogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    id: NodeId,
    label: String,
}

impl GraphNode {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.id.kind()
    }

    /// Returns the text shown inside the node box.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Relation carried by an edge, derived from the kind of its source node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// The edge starts at a company and points at one of its partners.
    CompanyToPartner,
    /// The edge starts at a partner and points at a company it is linked to.
    PartnerToCompany,
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    source: NodeId,
    target: NodeId,
}

impl GraphEdge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Returns the edge kind, determined by the source node's kind.
    pub fn kind(&self) -> EdgeKind {
        match self.source.kind() {
            NodeKind::Company => EdgeKind::CompanyToPartner,
            NodeKind::Partner => EdgeKind::PartnerToCompany,
        }
    }

    /// Returns true if `id` is either endpoint of this edge.
    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }

    /// Returns the textual edge id, `<source>-><target>`.
    pub fn id(&self) -> String {
        format!("{}->{}", self.source, self.target)
    }
}

/// A deduplicated company/partner graph rooted at the focal company.
#[derive(Debug, Clone, PartialEq)]
pub struct OrgGraph {
    root: NodeId,
    nodes: IndexMap<NodeId, GraphNode>,
    edges: IndexSet<GraphEdge>,
}

impl OrgGraph {
    /// Creates a graph containing only the root node.
    pub fn new(root: GraphNode) -> Self {
        let root_id = root.id();
        let mut nodes = IndexMap::new();
        nodes.insert(root_id, root);
        Self {
            root: root_id,
            nodes,
            edges: IndexSet::new(),
        }
    }

    /// Adds a node unless one with the same id already exists.
    ///
    /// Returns true if the node was inserted.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.nodes.contains_key(&node.id()) {
            trace!(node_id:% = node.id(); "Node already present, keeping first label");
            return false;
        }
        self.nodes.insert(node.id(), node);
        true
    }

    /// Adds an edge unless the same endpoint pair already exists.
    ///
    /// Both endpoints must already be nodes of the graph; edges with a missing
    /// endpoint are ignored. Returns true if the edge was inserted.
    pub fn add_edge(&mut self, edge: GraphEdge) -> bool {
        if !self.contains_node(edge.source()) || !self.contains_node(edge.target()) {
            debug!(edge_id = edge.id(); "Ignoring edge with unknown endpoint");
            return false;
        }
        self.edges.insert(edge)
    }

    /// Returns the id of the focal company node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the position of a node in insertion order.
    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// Iterates over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Iterates over edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges pointing at `id`.
    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |edge| edge.target() == id)
    }

    /// Edges leaving `id`.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |edge| edge.source() == id)
    }

    /// Nodes sharing an edge with `id`, in either direction, without repeats.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        let neighbors: IndexSet<NodeId> = self
            .edges
            .iter()
            .filter_map(|edge| {
                if edge.source() == id {
                    Some(edge.target())
                } else if edge.target() == id {
                    Some(edge.source())
                } else {
                    None
                }
            })
            .collect();
        neighbors.into_iter()
    }
}

/// Label of the focal company: its own name, else the first non-empty name a
/// partner's holdings give it, else `Empresa <id>`.
fn root_label(data: &CompanyPartnerGraph) -> String {
    data.company_name()
        .filter(|name| !name.is_empty())
        .or_else(|| {
            data.partners()
                .iter()
                .flat_map(|partner| partner.linked_companies())
                .find(|company| company.id() == data.company_id() && !company.name().is_empty())
                .map(|company| company.name())
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("Empresa {}", data.company_id()))
}

/// Builds the organogram graph for `data`.
///
/// This never fails: an input without partners yields a graph holding only
/// the focal company.
pub fn build_graph(data: &CompanyPartnerGraph) -> OrgGraph {
    let root_id = NodeId::company(data.company_id());
    let root_label = root_label(data);

    let mut graph = OrgGraph::new(GraphNode::new(root_id, root_label));

    for partner in data.partners() {
        let partner_id = NodeId::partner(partner.id());
        graph.add_node(GraphNode::new(partner_id, partner.name()));
        graph.add_edge(GraphEdge::new(root_id, partner_id));

        for company in partner.linked_companies() {
            let company_id = NodeId::company(company.id());
            graph.add_node(GraphNode::new(company_id, company.name()));
            graph.add_edge(GraphEdge::new(partner_id, company_id));
        }
    }

    debug!(
        root:% = root_id,
        nodes = graph.node_count(),
        edges = graph.edge_count();
        "Organogram graph built"
    );

    graph
}

#[cfg(test)]
mod tests {
    use organograma_core::semantic::{LinkedCompany, Partner};
    use proptest::prelude::*;

    use super::*;

    fn ids(graph: &OrgGraph) -> Vec<String> {
        graph.nodes().map(|node| node.id().to_string()).collect()
    }

    fn edge_ids(graph: &OrgGraph) -> Vec<String> {
        graph.edges().map(GraphEdge::id).collect()
    }

    #[test]
    fn test_single_partner_scenario() {
        let data = CompanyPartnerGraph::new(5).with_partner(
            Partner::new(10, "Alice").with_linked_company(LinkedCompany::new(7, "Beta Corp")),
        );

        let graph = build_graph(&data);

        assert_eq!(ids(&graph), ["empresa-5", "socio-10", "empresa-7"]);
        assert_eq!(edge_ids(&graph), ["empresa-5->socio-10", "socio-10->empresa-7"]);
        assert_eq!(graph.root(), NodeId::company(5));

        let kinds: Vec<_> = graph.edges().map(GraphEdge::kind).collect();
        assert_eq!(kinds, [EdgeKind::CompanyToPartner, EdgeKind::PartnerToCompany]);
        assert_eq!(graph.node(NodeId::company(7)).unwrap().label(), "Beta Corp");
    }

    #[test]
    fn test_no_partners_yields_root_only() {
        let graph = build_graph(&CompanyPartnerGraph::new(1));

        assert_eq!(ids(&graph), ["empresa-1"]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node(graph.root()).unwrap().label(), "Empresa 1");
    }

    #[test]
    fn test_root_label_uses_company_name() {
        let graph = build_graph(&CompanyPartnerGraph::new(1).with_company_name("Acme"));
        assert_eq!(graph.node(NodeId::company(1)).unwrap().label(), "Acme");
    }

    #[test]
    fn test_root_label_falls_back_to_back_reference() {
        let data = CompanyPartnerGraph::new(1)
            .with_partner(Partner::new(2, "Ana").with_linked_company(LinkedCompany::new(1, "")))
            .with_partner(Partner::new(3, "Bia").with_linked_company(LinkedCompany::new(1, "Acme")))
            .with_partner(Partner::new(4, "Caio").with_linked_company(LinkedCompany::new(1, "Acme SA")));

        let graph = build_graph(&data);
        assert_eq!(graph.node(NodeId::company(1)).unwrap().label(), "Acme");
    }

    #[test]
    fn test_own_name_wins_over_back_reference() {
        let data = CompanyPartnerGraph::new(1)
            .with_company_name("Acme Holding")
            .with_partner(Partner::new(2, "Ana").with_linked_company(LinkedCompany::new(1, "Acme")));

        let graph = build_graph(&data);
        assert_eq!(graph.node(NodeId::company(1)).unwrap().label(), "Acme Holding");
    }

    #[test]
    fn test_shared_linked_company_is_one_node() {
        let data = CompanyPartnerGraph::new(1)
            .with_partner(Partner::new(2, "Ana").with_linked_company(LinkedCompany::new(9, "Shared")))
            .with_partner(
                Partner::new(3, "Bruno").with_linked_company(LinkedCompany::new(9, "Shared Ltda")),
            );

        let graph = build_graph(&data);
        let shared = NodeId::company(9);

        assert_eq!(graph.nodes().filter(|node| node.id() == shared).count(), 1);
        assert_eq!(graph.incoming(shared).count(), 2);
        // First label wins
        assert_eq!(graph.node(shared).unwrap().label(), "Shared");
    }

    #[test]
    fn test_link_back_to_focal_company_reuses_root() {
        let data = CompanyPartnerGraph::new(1)
            .with_partner(Partner::new(2, "Ana").with_linked_company(LinkedCompany::new(1, "Acme")));

        let graph = build_graph(&data);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(edge_ids(&graph), ["empresa-1->socio-2", "socio-2->empresa-1"]);
    }

    #[test]
    fn test_repeated_partner_and_relation_collapse() {
        let data = CompanyPartnerGraph::new(1)
            .with_partner(
                Partner::new(2, "Ana")
                    .with_linked_company(LinkedCompany::new(4, "X"))
                    .with_linked_company(LinkedCompany::new(4, "X")),
            )
            .with_partner(Partner::new(2, "Ana"));

        let graph = build_graph(&data);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_partner_and_company_with_same_key_are_distinct() {
        let data = CompanyPartnerGraph::new(1).with_partner(Partner::new(1, "Self"));
        let graph = build_graph(&data);

        assert_eq!(ids(&graph), ["empresa-1", "socio-1"]);
    }

    #[test]
    fn test_neighbors_and_directions() {
        let data = CompanyPartnerGraph::new(5).with_partner(
            Partner::new(10, "Alice").with_linked_company(LinkedCompany::new(7, "Beta Corp")),
        );
        let graph = build_graph(&data);
        let partner = NodeId::partner(10);

        let neighbors: Vec<_> = graph.neighbors(partner).collect();
        assert_eq!(neighbors, [NodeId::company(5), NodeId::company(7)]);
        assert_eq!(graph.outgoing(partner).count(), 1);
        assert_eq!(graph.incoming(partner).count(), 1);
    }

    #[test]
    fn test_add_edge_requires_known_endpoints() {
        let mut graph = OrgGraph::new(GraphNode::new(NodeId::company(1), "Root"));
        assert!(!graph.add_edge(GraphEdge::new(NodeId::company(1), NodeId::partner(2))));
        assert_eq!(graph.edge_count(), 0);
    }

    fn arb_input() -> impl Strategy<Value = CompanyPartnerGraph> {
        let linked = prop::collection::vec((0u64..6).prop_map(|id| LinkedCompany::new(id, "c")), 0..4);
        let partner = (0u64..6, linked).prop_map(|(id, companies)| {
            companies
                .into_iter()
                .fold(Partner::new(id, "p"), Partner::with_linked_company)
        });
        (0u64..6, prop::collection::vec(partner, 0..6)).prop_map(|(root, partners)| {
            partners
                .into_iter()
                .fold(CompanyPartnerGraph::new(root), CompanyPartnerGraph::with_partner)
        })
    }

    proptest! {
        #[test]
        fn prop_nodes_are_unique_and_edges_reference_nodes(data in arb_input()) {
            let graph = build_graph(&data);

            let unique: IndexSet<NodeId> = graph.nodes().map(GraphNode::id).collect();
            prop_assert_eq!(unique.len(), graph.node_count());
            prop_assert_eq!(graph.nodes().next().map(GraphNode::id), Some(NodeId::company(data.company_id())));

            for edge in graph.edges() {
                prop_assert!(graph.contains_node(edge.source()));
                prop_assert!(graph.contains_node(edge.target()));
            }
        }

        #[test]
        fn prop_shared_company_collects_every_partner_edge(data in arb_input()) {
            let graph = build_graph(&data);

            for node in graph.nodes().filter(|node| node.kind() == NodeKind::Company) {
                let linking_partners: IndexSet<u64> = data
                    .partners()
                    .iter()
                    .filter(|partner| partner.linked_companies().iter().any(|c| c.id() == node.id().key()))
                    .map(Partner::id)
                    .collect();
                let partner_edges = graph
                    .incoming(node.id())
                    .filter(|edge| edge.kind() == EdgeKind::PartnerToCompany)
                    .count();
                prop_assert_eq!(partner_edges, linking_partners.len());
            }
        }
    }
}
