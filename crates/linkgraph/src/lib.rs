pub mod generator;
pub mod graph;
pub mod ix_map;
pub mod keys;
pub mod link_set;
pub mod random;

pub use generator::{GenerateError, GenerateParams, generate};
pub use graph::{DirectedLink, Graph, Node, NodeType, node_at};
pub use ix_map::IxMap;
pub use link_set::{
    LinkRejection, LinkSet, TryAddLink, has_directed_link, try_add_link,
    validate_link,
};
pub use random::{RandomSource, RngSource, seeded_source, thread_source};
