use crate::changes::ModelChange;
use crate::effects::Effect;
use crate::store::Store;
use linkgraph::GenerateParams;
use tracing::debug;

/// Actions that can be dispatched to modify the editor state
#[derive(Debug, Clone)]
pub enum Action {
    // Node Actions
    /// Append a node with the next free key
    AddNode,
    /// Change a node's display label
    RenameNode { key: String, label: String },
    /// Remove a node and the links touching it
    RemoveNode { key: String },
    /// Record the node shown in the properties panel
    SelectNode { key: Option<String> },

    // Link Actions
    /// Draw a link between two existing nodes
    AddLink { from: String, to: String },
    RemoveLink { key: String },

    // Canvas Events
    /// Incremental edit reported by the canvas
    ApplyModelChange { change: ModelChange },

    // Bulk Actions
    /// Replace the diagram with a random connected graph
    BulkGenerate { params: GenerateParams },
    /// Drop all nodes, links and the selection
    Clear,
    /// Clear any error message
    ClearErrorMessage,
}

impl Action {
    /// Bulk generate with the sizes from the store's settings
    pub fn bulk_generate(store: &Store) -> Self {
        Action::BulkGenerate {
            params: store.settings.bulk_params(),
        }
    }
}

/// Apply a single action to modify the store state
pub fn update(store: &mut Store, action: Action) -> Vec<Effect> {
    match action {
        // Node Actions
        Action::AddNode => {
            let key = store.add_node();
            debug!(%key, "node added");
            vec![]
        }
        Action::RenameNode { key, label } => {
            if let Err(e) = store.rename_node(&key, label) {
                store.report(e);
            }
            vec![]
        }
        Action::RemoveNode { key } => {
            if !store.remove_node(&key) {
                debug!(%key, "remove ignored, no such node");
            }
            vec![]
        }
        Action::SelectNode { key } => {
            store.select(key);
            vec![]
        }

        // Link Actions
        Action::AddLink { from, to } => {
            match store.add_link(&from, &to) {
                Ok(key) => debug!(%key, %from, %to, "link added"),
                Err(e) => store.report(e),
            }
            vec![]
        }
        Action::RemoveLink { key } => {
            if !store.remove_link(&key) {
                debug!(%key, "remove ignored, no such link");
            }
            vec![]
        }

        // Canvas Events
        Action::ApplyModelChange { change } => {
            for e in store.apply_model_change(change) {
                store.report(e);
            }
            vec![]
        }

        // Bulk Actions
        Action::BulkGenerate { params } => {
            vec![Effect::Generate { params }]
        }
        Action::Clear => {
            store.clear();
            vec![]
        }
        Action::ClearErrorMessage => {
            store.error_message = None;
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgraph::DirectedLink;

    #[test]
    fn test_bulk_generate_is_deferred() {
        let mut store = Store::default();
        let action = Action::bulk_generate(&store);
        let effects = update(&mut store, action);

        assert!(store.nodes.get().is_empty());
        assert!(matches!(
            effects.as_slice(),
            [Effect::Generate { params }]
                if *params == GenerateParams::new(1000, 1)
        ));
    }

    #[test]
    fn test_rejected_edits_surface_error_message() {
        let mut store = Store::default();
        update(&mut store, Action::AddNode);
        update(
            &mut store,
            Action::AddLink {
                from: "node-1".into(),
                to: "node-1".into(),
            },
        );
        assert!(store.error_message.is_some());

        update(&mut store, Action::ClearErrorMessage);
        assert_eq!(store.error_message, None);

        update(
            &mut store,
            Action::ApplyModelChange {
                change: ModelChange {
                    modified_link_data: vec![DirectedLink::new(
                        "link-5", "node-1", "node-1",
                    )],
                    ..ModelChange::default()
                },
            },
        );
        assert!(store.links.get().is_empty());
        assert!(store.error_message.is_some());
    }
}
