use linkgraph::{DirectedLink, Node};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Incremental edit reported by the canvas.
///
/// Field names follow the camelCase JSON the canvas emits; every field is
/// optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelChange {
    /// Nodes to insert or replace, matched by key.
    pub modified_node_data: Vec<Node>,
    pub removed_node_keys: Vec<String>,
    /// Links to insert or replace, matched by key.
    pub modified_link_data: Vec<DirectedLink>,
    pub removed_link_keys: Vec<String>,
    /// Shallow-merged into the model metadata.
    pub model_data: Option<Map<String, Value>>,
}

impl ModelChange {
    pub fn is_empty(&self) -> bool {
        self.modified_node_data.is_empty()
            && self.removed_node_keys.is_empty()
            && self.modified_link_data.is_empty()
            && self.removed_link_keys.is_empty()
            && self.model_data.as_ref().is_none_or(Map::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_canvas_payload() {
        let change: ModelChange = serde_json::from_str(
            r#"{
                "modifiedLinkData": [{"key": "link-1", "from": "node-1", "to": "node-2"}],
                "removedNodeKeys": ["node-9"],
                "modelData": {"canRelink": false}
            }"#,
        )
        .unwrap();

        assert_eq!(
            change.modified_link_data,
            [DirectedLink::new("link-1", "node-1", "node-2")]
        );
        assert_eq!(change.removed_node_keys, ["node-9"]);
        assert!(change.modified_node_data.is_empty());
        assert_eq!(
            change.model_data.unwrap().get("canRelink"),
            Some(&Value::Bool(false))
        );
    }

    #[test]
    fn test_empty_change() {
        let change: ModelChange = serde_json::from_str("{}").unwrap();
        assert!(change.is_empty());
        assert_eq!(change, ModelChange::default());
    }
}
