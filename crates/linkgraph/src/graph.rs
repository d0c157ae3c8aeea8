use petgraph::algo::connected_components;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::ix_map::IxMap;

// ------------------------------------------------------------------
// Node and link records
// ------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum NodeType {
    #[default]
    Node,
}

/// A labeled diagram node. Serialized as `{key, text, type}` so list
/// views and property editors can match on `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub key: String,
    #[serde(rename = "text")]
    pub label: String,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
}

impl Node {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            node_type: NodeType::Node,
        }
    }
}

/// One-way connection between two node keys. The link does not own its
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedLink {
    pub key: String,
    pub from: String,
    pub to: String,
}

impl DirectedLink {
    pub fn new(
        key: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    pub fn touches(&self, node_key: &str) -> bool {
        self.from == node_key || self.to == node_key
    }
}

/// Snapshot of nodes and links, both in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<DirectedLink>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, links: Vec<DirectedLink>) -> Self {
        Self { nodes, links }
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.key == key)
    }

    pub fn link(&self, key: &str) -> Option<&DirectedLink> {
        self.links.iter().find(|l| l.key == key)
    }

    /// Build a petgraph view. Node `i` of the snapshot becomes
    /// `NodeIndex::new(i)`; links with an unknown endpoint are skipped.
    pub fn to_digraph(&self) -> DiGraph<Node, DirectedLink> {
        to_digraph(&self.nodes, &self.links)
    }

    /// Number of weakly connected components (0 for an empty graph).
    pub fn weak_component_count(&self) -> usize {
        weak_component_count(&self.nodes, &self.links)
    }

    /// True when every node is reachable from every other node with
    /// direction ignored. The empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        self.weak_component_count() <= 1
    }
}

pub fn to_digraph(
    nodes: &[Node],
    links: &[DirectedLink],
) -> DiGraph<Node, DirectedLink> {
    let ix = IxMap::from_distinct(nodes.iter().map(|n| n.key.clone()));
    let mut g = DiGraph::with_capacity(ix.len(), links.len());

    // Repeated keys collapse onto their first occurrence
    for node in nodes {
        if ix.index_of(node.key.as_str()) == Some(g.node_count()) {
            g.add_node(node.clone());
        }
    }

    for link in links {
        if let (Some(a), Some(b)) =
            (ix.index_of(link.from.as_str()), ix.index_of(link.to.as_str()))
        {
            g.add_edge(NodeIndex::new(a), NodeIndex::new(b), link.clone());
        }
    }

    g
}

pub fn weak_component_count(nodes: &[Node], links: &[DirectedLink]) -> usize {
    connected_components(&to_digraph(nodes, links))
}

// ------------------------------------------------------------------
// Grid lookup
// ------------------------------------------------------------------

/// Node shown at `(row, col)` when `nodes` is laid out row-major in a grid
/// of `columns` columns. `None` for a zero-width grid or any position
/// outside the node list.
pub fn node_at(
    nodes: &[Node],
    columns: usize,
    row: isize,
    col: isize,
) -> Option<&Node> {
    if columns == 0 {
        return None;
    }
    let columns = isize::try_from(columns).ok()?;
    let idx = row.checked_mul(columns)?.checked_add(col)?;
    let idx = usize::try_from(idx).ok()?;
    nodes.get(idx)
}
