use crate::changes::ModelChange;
use crate::settings::EditorSettings;
use crate::versioned::Versioned;
use linkgraph::graph::weak_component_count;
use linkgraph::keys::{link_key_for_id, next_free_link_id, next_free_node_key};
use linkgraph::{
    DirectedLink, Graph, LinkRejection, Node, NodeType, try_add_link,
    validate_link,
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Edits the store refused to apply.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("unknown node `{0}`")]
    UnknownNode(String),
    #[error("link `{from}` -> `{to}` rejected: {reason}")]
    LinkRejected {
        from: String,
        to: String,
        reason: LinkRejection,
    },
}

/// One row of the side-panel node list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeListRow {
    pub id: String,
    pub name: String,
    pub node_type: NodeType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub node_count: usize,
    pub link_count: usize,
    pub weak_components: usize,
}

pub fn default_model_data() -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("canRelink".to_owned(), Value::Bool(true));
    data
}

/// Live diagram data. The link collection obeys the same self-link and
/// duplicate rules as generated graphs, whichever path an edit arrives by.
pub struct Store {
    pub nodes: Versioned<Vec<Node>>,
    pub links: Versioned<Vec<DirectedLink>>,
    pub model_data: Map<String, Value>,
    pub selected_key: Option<String>,
    pub settings: EditorSettings,
    pub error_message: Option<String>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Store {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            nodes: Versioned::new(Vec::new()),
            links: Versioned::new(Vec::new()),
            model_data: default_model_data(),
            selected_key: None,
            settings,
            error_message: None,
        }
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.get().iter().find(|n| n.key == key)
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.node(key).is_some()
    }

    pub fn contains_link(&self, key: &str) -> bool {
        self.links.get().iter().any(|l| l.key == key)
    }

    /// Copy of the current collections.
    pub fn graph_snapshot(&self) -> Graph {
        Graph::new(self.nodes.get().clone(), self.links.get().clone())
    }

    /// Record a refused edit so the UI can show it.
    pub fn report(&mut self, err: EditError) {
        warn!(error = %err, "edit rejected");
        self.error_message = Some(err.to_string());
    }

    // ------------------------------------------------------------------
    // Node edits
    // ------------------------------------------------------------------

    /// Append a node with the configured label and return its key.
    pub fn add_node(&mut self) -> String {
        let key = next_free_node_key(self.nodes.get().len(), |k| {
            self.contains_node(k)
        });
        let label = self.settings.new_node_label.clone();
        self.nodes.get_mut().push(Node::new(key.clone(), label));
        key
    }

    pub fn rename_node(
        &mut self,
        key: &str,
        label: String,
    ) -> Result<(), EditError> {
        let idx = self
            .nodes
            .get()
            .iter()
            .position(|n| n.key == key)
            .ok_or_else(|| EditError::UnknownNode(key.to_owned()))?;
        if let Some(node) = self.nodes.get_mut().get_mut(idx) {
            node.label = label;
        }
        Ok(())
    }

    /// Remove a node together with every link touching it.
    pub fn remove_node(&mut self, key: &str) -> bool {
        if !self.contains_node(key) {
            return false;
        }
        self.nodes.get_mut().retain(|n| n.key != key);
        if self.links.get().iter().any(|l| l.touches(key)) {
            self.links.get_mut().retain(|l| !l.touches(key));
        }
        if self.selected_key.as_deref() == Some(key) {
            self.selected_key = None;
        }
        true
    }

    /// Insert or replace a node by key.
    pub fn upsert_node(&mut self, node: Node) {
        let nodes = self.nodes.get_mut();
        if let Some(idx) = nodes.iter().position(|n| n.key == node.key) {
            nodes[idx] = node;
        } else {
            nodes.push(node);
        }
    }

    /// Selection is a plain value; unknown keys select nothing.
    pub fn select(&mut self, key: Option<String>) {
        self.selected_key = key.filter(|k| self.contains_node(k));
    }

    // ------------------------------------------------------------------
    // Link edits
    // ------------------------------------------------------------------

    /// Draw a new link between two existing nodes and return its key.
    pub fn add_link(
        &mut self,
        from: &str,
        to: &str,
    ) -> Result<String, EditError> {
        for endpoint in [from, to] {
            if !self.contains_node(endpoint) {
                return Err(EditError::UnknownNode(endpoint.to_owned()));
            }
        }
        validate_link(self.links.get(), from, to).map_err(|reason| {
            EditError::LinkRejected {
                from: from.to_owned(),
                to: to.to_owned(),
                reason,
            }
        })?;

        let id = next_free_link_id(self.links.get().len(), |k| {
            self.contains_link(k)
        });
        let outcome = try_add_link(self.links.get(), from, to, id);
        let added = outcome.added;
        let links = outcome.links.into_owned();
        if added {
            self.links.set(links);
        }
        Ok(link_key_for_id(id))
    }

    pub fn remove_link(&mut self, key: &str) -> bool {
        if !self.contains_link(key) {
            return false;
        }
        self.links.get_mut().retain(|l| l.key != key);
        true
    }

    /// Insert or replace a link by key. The result is checked against
    /// every other link, so re-pointing a link onto an existing pair
    /// fails.
    pub fn upsert_link(
        &mut self,
        link: DirectedLink,
    ) -> Result<(), EditError> {
        let others = self.links.get().iter().filter(|l| l.key != link.key);
        if let Err(reason) = validate_link(others, &link.from, &link.to) {
            return Err(EditError::LinkRejected {
                from: link.from,
                to: link.to,
                reason,
            });
        }

        let links = self.links.get_mut();
        if let Some(idx) = links.iter().position(|l| l.key == link.key) {
            links[idx] = link;
        } else {
            links.push(link);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Bulk operations
    // ------------------------------------------------------------------

    /// Apply a canvas change event: node upserts, node removals, link
    /// upserts, link removals, then the metadata merge. Refused link
    /// upserts are returned; the rest of the event still applies.
    pub fn apply_model_change(
        &mut self,
        change: ModelChange,
    ) -> Vec<EditError> {
        let ModelChange {
            modified_node_data,
            removed_node_keys,
            modified_link_data,
            removed_link_keys,
            model_data,
        } = change;

        for node in modified_node_data {
            self.upsert_node(node);
        }
        for key in &removed_node_keys {
            self.remove_node(key);
        }

        let mut rejected = Vec::new();
        for link in modified_link_data {
            if let Err(err) = self.upsert_link(link) {
                rejected.push(err);
            }
        }
        for key in &removed_link_keys {
            self.remove_link(key);
        }

        if let Some(data) = model_data {
            self.model_data.extend(data);
        }

        debug!(
            nodes = self.nodes.get().len(),
            links = self.links.get().len(),
            rejected = rejected.len(),
            "model change applied"
        );
        rejected
    }

    /// Replace both collections with a generated snapshot. No merge.
    pub fn replace_graph(&mut self, graph: Graph) {
        let Graph { nodes, links } = graph;
        self.nodes.set(nodes);
        self.links.set(links);
        if let Some(key) = self.selected_key.take() {
            self.select(Some(key));
        }
    }

    pub fn clear(&mut self) {
        self.nodes.set(Vec::new());
        self.links.set(Vec::new());
        self.selected_key = None;
    }

    // ------------------------------------------------------------------
    // Derived data
    // ------------------------------------------------------------------

    pub fn node_list_uncached(&self) -> Vec<NodeListRow> {
        self.nodes
            .get()
            .iter()
            .map(|n| NodeListRow {
                id: n.key.clone(),
                name: n.label.clone(),
                node_type: n.node_type,
            })
            .collect()
    }

    pub fn stats_uncached(&self) -> GraphStats {
        let nodes = self.nodes.get();
        let links = self.links.get();
        GraphStats {
            node_count: nodes.len(),
            link_count: links.len(),
            weak_components: weak_component_count(nodes, links),
        }
    }
}
