//! JSON export for external renderers.
//!
//! The document carries everything a graph-drawing surface needs: node boxes
//! with top-left positions and the derived style of every edge for the
//! current selection.
//!
//! ```json
//! {
//!   "root": "empresa-5",
//!   "selected": "socio-10",
//!   "nodes": [{ "id": "empresa-5", "kind": "company", "label": "Acme", "x": 10.0, "y": -50.0, ... }],
//!   "edges": [{ "id": "empresa-5->socio-10", "source": "empresa-5", "target": "socio-10", ... }]
//! }
//! ```

use log::debug;
use serde::Serialize;

use organograma_core::identifier::{NodeId, NodeKind};

use super::{Error, Exporter};
use crate::{
    chart::OrgChart,
    highlight::{EdgePalette, EdgeStyle, Emphasis},
    structure::EdgeKind,
};

#[derive(Debug, Serialize)]
struct ChartDocument<'a> {
    root: NodeId,
    selected: Option<NodeId>,
    nodes: Vec<NodeDocument<'a>>,
    edges: Vec<EdgeDocument>,
}

#[derive(Debug, Serialize)]
struct NodeDocument<'a> {
    id: NodeId,
    kind: NodeKind,
    label: &'a str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    draggable: bool,
    emphasis: Emphasis,
}

#[derive(Debug, Serialize)]
struct EdgeDocument {
    id: String,
    source: NodeId,
    target: NodeId,
    kind: EdgeKind,
    style: EdgeStyle,
}

/// Exports a chart as a pretty-printed JSON document.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    palette: EdgePalette,
}

impl JsonExporter {
    pub fn new(palette: EdgePalette) -> Self {
        Self { palette }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, chart: &OrgChart) -> Result<String, Error> {
        let graph = chart.graph();

        let nodes = graph
            .nodes()
            .iter()
            .map(|node| NodeDocument {
                id: node.id(),
                kind: node.kind(),
                label: node.label(),
                x: node.position().x(),
                y: node.position().y(),
                width: node.size().width(),
                height: node.size().height(),
                draggable: node.draggable(),
                emphasis: chart.emphasis(node.id()),
            })
            .collect();

        let edges = chart
            .styled_edges(&self.palette)
            .into_iter()
            .map(|styled| EdgeDocument {
                id: styled.edge().id(),
                source: styled.edge().source(),
                target: styled.edge().target(),
                kind: styled.edge().kind(),
                style: styled.style().clone(),
            })
            .collect();

        let document = ChartDocument {
            root: graph.root(),
            selected: chart.selection().selected(),
            nodes,
            edges,
        };

        let json = serde_json::to_string_pretty(&document)?;
        debug!(bytes = json.len(); "JSON document rendered");
        Ok(json)
    }
}
