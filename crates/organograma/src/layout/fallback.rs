//! Breadth-first grid assignment.
//!
//! Used when the layered algorithm cannot produce a layout. Ranks are the
//! shortest hop count from the root along edge direction; nodes the root cannot
//! reach share rank 0. Within a rank nodes keep insertion order.

use std::collections::HashMap;

use log::debug;
use petgraph::{algo::dijkstra, graph::DiGraph};

use organograma_core::identifier::NodeId;

use super::Cell;
use crate::structure::OrgGraph;

pub(super) fn cells(graph: &OrgGraph, root: NodeId) -> Vec<Cell> {
    let mut digraph = DiGraph::<NodeId, ()>::with_capacity(graph.node_count(), graph.edge_count());
    let indices: HashMap<NodeId, _> = graph
        .nodes()
        .map(|node| (node.id(), digraph.add_node(node.id())))
        .collect();

    for edge in graph.edges() {
        digraph.add_edge(indices[&edge.source()], indices[&edge.target()], ());
    }

    let depths = indices
        .get(&root)
        .map(|&start| dijkstra(&digraph, start, None, |_| 1usize))
        .unwrap_or_default();

    let mut row_lengths: HashMap<usize, usize> = HashMap::new();
    let cells: Vec<Cell> = graph
        .nodes()
        .map(|node| {
            let rank = depths.get(&indices[&node.id()]).copied().unwrap_or(0);
            let slot = row_lengths.entry(rank).or_insert(0);
            let cell = Cell::new(*slot as f32, rank);
            *slot += 1;
            cell
        })
        .collect();

    debug!(
        ranks = row_lengths.len(),
        nodes = cells.len();
        "Breadth-first layout computed"
    );

    cells
}

#[cfg(test)]
mod tests {
    use organograma_core::semantic::{CompanyPartnerGraph, LinkedCompany, Partner};

    use super::*;
    use crate::structure::build_graph;

    #[test]
    fn test_ranks_by_hop_count() {
        let data = CompanyPartnerGraph::new(1)
            .with_partner(Partner::new(2, "Ana").with_linked_company(LinkedCompany::new(3, "X")))
            .with_partner(Partner::new(4, "Bia").with_linked_company(LinkedCompany::new(3, "X")));
        let graph = build_graph(&data);

        let cells = cells(&graph, graph.root());

        // Insertion order: empresa-1, socio-2, empresa-3, socio-4
        assert_eq!(
            cells,
            [
                Cell::new(0.0, 0),
                Cell::new(0.0, 1),
                Cell::new(0.0, 2),
                Cell::new(1.0, 1),
            ]
        );
    }

    #[test]
    fn test_back_reference_does_not_move_root() {
        let data = CompanyPartnerGraph::new(1)
            .with_partner(Partner::new(2, "Ana").with_linked_company(LinkedCompany::new(1, "Acme")));
        let graph = build_graph(&data);

        let cells = cells(&graph, graph.root());
        assert_eq!(cells[0].rank(), 0);
        assert_eq!(cells[1].rank(), 1);
    }

    #[test]
    fn test_unknown_root_puts_everything_in_rank_zero() {
        let data = CompanyPartnerGraph::new(1).with_partner(Partner::new(2, "Ana"));
        let graph = build_graph(&data);

        let cells = cells(&graph, NodeId::company(42));
        assert!(cells.iter().all(|cell| cell.rank() == 0));
        assert_eq!(cells[1].slot(), 1.0);
    }
}
