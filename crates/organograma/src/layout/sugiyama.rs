//! Grid assignment through `rust-sugiyama`.
//!
//! The library lays out each weakly connected component separately and only
//! knows about nodes that appear in an edge. This module maps its output back
//! to graph nodes:
//!
//! - distinct y values of a component become ranks, oriented so that most
//!   edges point downward;
//! - x values are rescaled so the tightest pair of neighbors in a row is one
//!   column apart;
//! - components are placed left to right, ordered by their first node in
//!   insertion order, and nodes without edges follow as single columns in
//!   rank 0.
//!
//! Edges pointing at the pinned root are left out before delegation: a partner
//! listing the root company among its holdings would otherwise have the cycle
//! broken against the root, ranking the partner above it.

use std::collections::{BTreeMap, HashMap};

use log::{debug, trace, warn};
use rust_sugiyama::configure::Config;

use organograma_core::identifier::NodeId;

use super::Cell;
use crate::structure::OrgGraph;

/// Coordinates closer than this are considered equal.
const EPSILON: f64 = 1e-6;

/// A node position as reported by the library.
#[derive(Debug, Clone, Copy)]
struct RawPosition {
    index: usize,
    x: f64,
    y: f64,
}

/// Computes a grid cell for every node of `graph`, in insertion order.
///
/// Returns `None` if the layout library panics or reports nothing usable.
pub(super) fn cells(graph: &OrgGraph, root: NodeId) -> Option<Vec<Cell>> {
    let mut edge_pairs: Vec<(usize, usize)> = Vec::new();
    for edge in graph.edges() {
        if edge.target() == root {
            trace!(edge_id = edge.id(); "Leaving out back-reference to the root");
            continue;
        }
        if let (Some(source), Some(target)) = (
            graph.node_index(edge.source()),
            graph.node_index(edge.target()),
        ) {
            // Skip self-loops
            if source != target {
                edge_pairs.push((source, target));
            }
        }
    }
    let edges: Vec<(u32, u32)> = edge_pairs
        .iter()
        .map(|&(source, target)| (source as u32, target as u32))
        .collect();

    let mut cells: Vec<Option<Cell>> = vec![None; graph.node_count()];
    let mut next_slot = 0.0_f32;

    if !edges.is_empty() {
        debug!(
            "Applying Sugiyama algorithm to graph with {} nodes and {} edges",
            graph.node_count(),
            edges.len()
        );

        let layouts = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: 1.0,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges, &config)
        });

        let results = match layouts {
            Ok(results) if !results.is_empty() => results,
            Ok(_) => {
                warn!("Rust-sugiyama returned empty layout results");
                return None;
            }
            Err(err) => {
                let message = err
                    .downcast_ref::<String>()
                    .map(String::as_str)
                    .or_else(|| err.downcast_ref::<&str>().copied())
                    .unwrap_or("unknown error");
                warn!(message = message; "Rust-sugiyama layout engine panicked, using breadth-first fallback");
                return None;
            }
        };

        let mut components: Vec<Vec<RawPosition>> = results
            .iter()
            .map(|(coords, _, _)| {
                coords
                    .iter()
                    .map(|&(id, (x, y))| RawPosition {
                        index: id as usize,
                        x: x as f64,
                        y: y as f64,
                    })
                    .filter(|raw| raw.index < cells.len())
                    .collect::<Vec<_>>()
            })
            .filter(|component| !component.is_empty())
            .collect();
        components.sort_by_key(|component| component.iter().map(|raw| raw.index).min());

        for component in &components {
            let width = place_component(component, &edge_pairs, next_slot, &mut cells);
            next_slot += width;
        }
    }

    // Nodes the library never saw: no edges, or only self-loops
    for cell in cells.iter_mut().filter(|cell| cell.is_none()) {
        *cell = Some(Cell::new(next_slot, 0));
        next_slot += 1.0;
    }

    Some(cells.into_iter().flatten().collect())
}

/// Places one component starting at column `offset`; returns the columns it spans.
fn place_component(
    component: &[RawPosition],
    edges: &[(usize, usize)],
    offset: f32,
    cells: &mut [Option<Cell>],
) -> f32 {
    let ranks = ranks_by_y(component, edges);

    let min_x = component.iter().map(|raw| raw.x).fold(f64::INFINITY, f64::min);
    let scale = column_scale(component, &ranks);

    let mut span = 0.0_f32;
    for raw in component {
        let slot = ((raw.x - min_x) * scale) as f32;
        span = span.max(slot);
        cells[raw.index] = Some(Cell::new(offset + slot, ranks[&raw.index]));
    }

    span + 1.0
}

/// Maps each node of a component to a rank, with rank 0 on top.
fn ranks_by_y(component: &[RawPosition], edges: &[(usize, usize)]) -> HashMap<usize, usize> {
    let mut levels: Vec<f64> = component.iter().map(|raw| raw.y).collect();
    levels.sort_by(f64::total_cmp);
    levels.dedup_by(|a, b| (*a - *b).abs() < EPSILON);

    let level_of = |y: f64| {
        levels
            .iter()
            .position(|level| (level - y).abs() < EPSILON)
            .unwrap_or(0)
    };

    let mut ranks: HashMap<usize, usize> = component
        .iter()
        .map(|raw| (raw.index, level_of(raw.y)))
        .collect();

    // Orient so that edges run downward
    let (down, up) = edges
        .iter()
        .filter_map(|(source, target)| Some((ranks.get(source)?, ranks.get(target)?)))
        .fold((0usize, 0usize), |(down, up), (source, target)| {
            match source.cmp(target) {
                std::cmp::Ordering::Less => (down + 1, up),
                std::cmp::Ordering::Greater => (down, up + 1),
                std::cmp::Ordering::Equal => (down, up),
            }
        });

    if up > down {
        let max_rank = levels.len().saturating_sub(1);
        for rank in ranks.values_mut() {
            *rank = max_rank - *rank;
        }
    }

    ranks
}

/// Returns the factor that makes the closest same-rank neighbors one column apart.
fn column_scale(component: &[RawPosition], ranks: &HashMap<usize, usize>) -> f64 {
    let mut rows: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for raw in component {
        rows.entry(ranks[&raw.index]).or_default().push(raw.x);
    }

    let min_gap = rows
        .values_mut()
        .flat_map(|xs| {
            xs.sort_by(f64::total_cmp);
            xs.windows(2).map(|pair| pair[1] - pair[0]).collect::<Vec<_>>()
        })
        .filter(|gap| *gap > EPSILON)
        .fold(f64::INFINITY, f64::min);

    if min_gap.is_finite() { 1.0 / min_gap } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use organograma_core::semantic::{CompanyPartnerGraph, LinkedCompany, Partner};

    use super::*;
    use crate::structure::build_graph;

    fn cell_of(graph: &OrgGraph, cells: &[Cell], id: NodeId) -> Cell {
        cells[graph.node_index(id).unwrap()]
    }

    #[test]
    fn test_ranks_follow_edge_direction() {
        let graph = build_graph(&CompanyPartnerGraph::new(5).with_partner(
            Partner::new(10, "Alice").with_linked_company(LinkedCompany::new(7, "Beta Corp")),
        ));
        let cells = cells(&graph, graph.root()).unwrap();

        assert_eq!(cell_of(&graph, &cells, NodeId::company(5)).rank(), 0);
        assert_eq!(cell_of(&graph, &cells, NodeId::partner(10)).rank(), 1);
        assert_eq!(cell_of(&graph, &cells, NodeId::company(7)).rank(), 2);
    }

    #[test]
    fn test_back_references_keep_root_on_rank_zero() {
        let mut data = CompanyPartnerGraph::new(1).with_company_name("Acme");
        for id in 2..=4 {
            data = data.with_partner(
                Partner::new(id, "p")
                    .with_linked_company(LinkedCompany::new(1, "Acme"))
                    .with_linked_company(LinkedCompany::new(9, "Holding")),
            );
        }
        let graph = build_graph(&data);
        let cells = cells(&graph, graph.root()).unwrap();

        assert_eq!(cell_of(&graph, &cells, NodeId::company(1)).rank(), 0);
        for id in 2..=4 {
            assert_eq!(cell_of(&graph, &cells, NodeId::partner(id)).rank(), 1);
        }
        assert_eq!(cell_of(&graph, &cells, NodeId::company(9)).rank(), 2);
    }

    #[test]
    fn test_edgeless_graph_gets_rank_zero() {
        let graph = build_graph(&CompanyPartnerGraph::new(3));
        let cells = cells(&graph, graph.root()).unwrap();
        assert_eq!(cells, [Cell::new(0.0, 0)]);
    }

    #[test]
    fn test_siblings_are_at_least_one_column_apart() {
        let data = CompanyPartnerGraph::new(1)
            .with_partner(Partner::new(1, "a"))
            .with_partner(Partner::new(2, "b"))
            .with_partner(Partner::new(3, "c"));
        let graph = build_graph(&data);
        let cells = cells(&graph, graph.root()).unwrap();

        let mut slots: Vec<f32> = (1..=3)
            .map(|id| cell_of(&graph, &cells, NodeId::partner(id)).slot())
            .collect();
        slots.sort_by(f32::total_cmp);
        for pair in slots.windows(2) {
            assert!(pair[1] - pair[0] >= 1.0 - 1e-4);
        }
    }

    #[test]
    fn test_ranks_flip_when_levels_are_inverted() {
        // Library-style output where y decreases with depth
        let component = [
            RawPosition { index: 0, x: 0.0, y: 0.0 },
            RawPosition { index: 1, x: 0.0, y: -1.0 },
            RawPosition { index: 2, x: 0.0, y: -2.0 },
        ];
        let ranks = ranks_by_y(&component, &[(0, 1), (1, 2)]);

        assert_eq!(ranks[&0], 0);
        assert_eq!(ranks[&1], 1);
        assert_eq!(ranks[&2], 2);
    }

    #[test]
    fn test_column_scale_normalizes_tightest_gap() {
        let component = [
            RawPosition { index: 0, x: 0.0, y: 0.0 },
            RawPosition { index: 1, x: 3.0, y: 1.0 },
            RawPosition { index: 2, x: 9.0, y: 1.0 },
        ];
        let ranks = HashMap::from([(0, 0), (1, 1), (2, 1)]);

        assert!((column_scale(&component, &ranks) - 1.0 / 6.0).abs() < 1e-9);
    }
}
