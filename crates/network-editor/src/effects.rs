use crate::store::Store;
use linkgraph::{GenerateParams, RandomSource};
use tracing::info;

/// Deferred effects that must run outside the main reducer (they draw
/// random numbers)
#[derive(Debug, Clone)]
pub enum Effect {
    /// Generate a connected graph and replace the store's collections
    Generate { params: GenerateParams },
}

/// Execute a single effect against the store
pub fn run(store: &mut Store, effect: Effect, random: &mut dyn RandomSource) {
    match effect {
        Effect::Generate { params } => {
            let graph = params.generate(random);
            info!(
                nodes = graph.nodes.len(),
                links = graph.links.len(),
                "bulk generate complete"
            );
            store.replace_graph(graph);
        }
    }
}
