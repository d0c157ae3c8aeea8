//! Random connected graph generation.
//!
//! Nodes are first chained `node-1 -> node-2 -> ... -> node-N`, which alone
//! makes the graph connected when direction is ignored. A fixed number of
//! random extra links is then attempted on top; extra links only add
//! edges, so connectivity is never lost.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::graph::{Graph, Node};
use crate::keys::node_key;
use crate::link_set::LinkSet;
use crate::random::RandomSource;

pub const DEFAULT_NODE_COUNT: usize = 100;
pub const DEFAULT_EXTRA_LINKS_PER_NODE: usize = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("invalid argument `{name}`: {value} is negative")]
    InvalidArgument { name: &'static str, value: i64 },
}

/// Convert a signed count from an outer layer into a `usize`.
pub fn non_negative(
    name: &'static str,
    value: i64,
) -> Result<usize, GenerateError> {
    usize::try_from(value)
        .map_err(|_| GenerateError::InvalidArgument { name, value })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateParams {
    pub node_count: usize,
    /// Extra links *attempted* per node; rejected attempts are dropped.
    pub extra_links_per_node: usize,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_COUNT, DEFAULT_EXTRA_LINKS_PER_NODE)
    }
}

impl GenerateParams {
    pub const fn new(node_count: usize, extra_links_per_node: usize) -> Self {
        Self {
            node_count,
            extra_links_per_node,
        }
    }

    pub fn try_from_signed(
        node_count: i64,
        extra_links_per_node: i64,
    ) -> Result<Self, GenerateError> {
        Ok(Self::new(
            non_negative("node_count", node_count)?,
            non_negative("extra_links_per_node", extra_links_per_node)?,
        ))
    }

    /// Number of random draws made in the extra-edge phase.
    pub fn extra_attempts(&self) -> usize {
        self.node_count.saturating_mul(self.extra_links_per_node)
    }

    /// Links produced by the chain phase.
    pub fn chain_link_count(&self) -> usize {
        self.node_count.saturating_sub(1)
    }

    /// Upper bound on the number of links in the output.
    pub fn max_link_count(&self) -> usize {
        self.chain_link_count().saturating_add(self.extra_attempts())
    }

    pub fn generate<R>(self, random: &mut R) -> Graph
    where
        R: RandomSource + ?Sized,
    {
        generate(self.node_count, self.extra_links_per_node, random)
    }
}

pub fn node_label(index: usize) -> String {
    format!("Node {}", index + 1)
}

/// Generate `node_count` nodes joined into one connected graph, plus up
/// to `node_count * extra_links_per_node` random extra links.
///
/// Link keys are `link-1..link-k` in creation order with no gaps. The
/// output has no self-links and no two links share an ordered pair.
pub fn generate<R>(
    node_count: usize,
    extra_links_per_node: usize,
    random: &mut R,
) -> Graph
where
    R: RandomSource + ?Sized,
{
    let params = GenerateParams::new(node_count, extra_links_per_node);

    let nodes: Vec<Node> = (0..node_count)
        .map(|i| Node::new(node_key(i), node_label(i)))
        .collect();

    let mut links = LinkSet::with_capacity(
        params.max_link_count().min(node_count.saturating_mul(4)),
    );

    // Chain phase
    for pair in nodes.windows(2) {
        if let [from, to] = pair
            && let Err(reason) = links.try_add(&from.key, &to.key)
        {
            trace!(from = %from.key, to = %to.key, %reason, "chain link rejected");
        }
    }

    // Extra-edge phase
    let attempts = params.extra_attempts();
    let mut accepted = 0usize;
    for _ in 0..attempts {
        if node_count == 0 {
            break;
        }

        let a = draw_index(random, node_count);
        let mut b = draw_index(random, node_count);
        if b == a {
            b = (b + 1) % node_count;
        }

        let (from, to) = (&nodes[a].key, &nodes[b].key);
        match links.try_add(from, to) {
            Ok(_) => accepted += 1,
            Err(reason) => {
                trace!(%from, %to, %reason, "extra link skipped")
            }
        }
    }

    debug!(
        node_count,
        extra_links_per_node,
        attempts,
        accepted,
        links = links.len(),
        "generated connected graph"
    );

    Graph::new(nodes, links.into_links())
}

/// `floor(r * n)`, kept inside `0..n` even if the source misbehaves
/// (values >= 1.0, negatives, NaN).
fn draw_index<R>(random: &mut R, n: usize) -> usize
where
    R: RandomSource + ?Sized,
{
    let scaled = (random.next_unit() * n as f64).floor();
    (scaled as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedLink;
    use crate::random::{seeded_source, thread_source};
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Cycles through `values` forever.
    fn fake_random(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut i = 0;
        move || {
            let v = values[i % values.len()];
            i += 1;
            v
        }
    }

    fn assert_invariants(graph: &Graph, params: GenerateParams) {
        let node_keys: Vec<_> =
            graph.nodes.iter().map(|n| n.key.as_str()).collect();
        let expected: Vec<_> =
            (1..=params.node_count).map(|i| format!("node-{i}")).collect();
        assert_eq!(node_keys, expected);

        for (i, link) in graph.links.iter().enumerate() {
            assert_eq!(link.key, format!("link-{}", i + 1));
            assert_ne!(link.from, link.to, "self-link {}", link.key);
            assert!(graph.node(&link.from).is_some());
            assert!(graph.node(&link.to).is_some());
        }

        let pairs: HashSet<_> =
            graph.links.iter().map(|l| (&l.from, &l.to)).collect();
        assert_eq!(pairs.len(), graph.links.len(), "duplicate ordered pair");

        assert!(graph.links.len() >= params.chain_link_count());
        assert!(graph.links.len() <= params.max_link_count());
    }

    #[test]
    fn test_chain_only_graph() {
        let mut random = fake_random(&[0.5]);
        let graph = generate(5, 0, &mut random);

        let keys: Vec<_> = graph.nodes.iter().map(|n| &n.key).collect();
        assert_eq!(keys, ["node-1", "node-2", "node-3", "node-4", "node-5"]);
        assert_eq!(graph.nodes[2].label, "Node 3");

        assert_eq!(
            graph.links,
            vec![
                DirectedLink::new("link-1", "node-1", "node-2"),
                DirectedLink::new("link-2", "node-2", "node-3"),
                DirectedLink::new("link-3", "node-3", "node-4"),
                DirectedLink::new("link-4", "node-4", "node-5"),
            ]
        );
    }

    #[test]
    fn test_extra_links_keep_sequential_ids() {
        let mut random = fake_random(&[0.1, 0.5, 0.7]);
        let params = GenerateParams::new(10, 1);
        let graph = params.generate(&mut random);

        assert!((9..=19).contains(&graph.links.len()));
        assert_invariants(&graph, params);
    }

    #[test]
    fn test_rejected_draws_do_not_consume_ids() {
        // a = 2, b = 0 every time: first draw adds node-3 -> node-1, the
        // rest are duplicates
        let mut random = fake_random(&[0.9, 0.0]);
        let graph = generate(3, 1, &mut random);

        assert_eq!(graph.links.len(), 3);
        assert_eq!(
            graph.links[2],
            DirectedLink::new("link-3", "node-3", "node-1")
        );
    }

    #[test]
    fn test_self_link_draw_is_deflected() {
        // a = b = 0 deflects to b = 1, which duplicates the chain
        let mut random = fake_random(&[0.0]);
        let graph = generate(3, 1, &mut random);
        assert_eq!(graph.links.len(), 2);

        // a = b = 2 wraps around to b = 0
        let mut random = fake_random(&[0.9]);
        let graph = generate(3, 1, &mut random);
        assert_eq!(graph.links.len(), 3);
        assert!(graph.links[2].connects("node-3", "node-1"));
    }

    #[test]
    fn test_no_self_links() {
        let mut random = fake_random(&[0.1, 0.5, 0.7]);
        let graph = generate(50, 2, &mut random);

        for link in &graph.links {
            assert_ne!(link.from, link.to);
        }
    }

    #[test]
    fn test_graph_remains_connected() {
        let graph = generate(20, 1, &mut thread_source());

        for node in graph.nodes.iter().skip(1) {
            let incoming =
                graph.links.iter().filter(|l| l.to == node.key).count();
            assert!(incoming > 0, "{} has no incoming link", node.key);
        }
        assert_eq!(graph.weak_component_count(), 1);
    }

    #[test]
    fn test_degenerate_sizes() {
        let mut never = || -> f64 { panic!("no draws expected") };
        let empty = generate(0, 3, &mut never);
        assert!(empty.nodes.is_empty());
        assert!(empty.links.is_empty());

        let single = generate(1, 3, &mut fake_random(&[0.3]));
        assert_eq!(single.nodes.len(), 1);
        assert!(single.links.is_empty());
    }

    #[test]
    fn test_out_of_range_source_is_clamped() {
        let mut random = fake_random(&[1.0, f64::NAN, -0.5]);
        let params = GenerateParams::new(4, 2);
        let graph = params.generate(&mut random);
        assert_invariants(&graph, params);
    }

    #[test]
    fn test_signed_params() {
        assert_eq!(
            GenerateParams::try_from_signed(1000, 1),
            Ok(GenerateParams::new(1000, 1))
        );
        assert_eq!(
            GenerateParams::try_from_signed(-1, 1),
            Err(GenerateError::InvalidArgument {
                name: "node_count",
                value: -1
            })
        );
        assert!(matches!(
            GenerateParams::try_from_signed(10, -3),
            Err(GenerateError::InvalidArgument {
                name: "extra_links_per_node",
                ..
            })
        ));
    }

    #[test]
    fn test_defaults() {
        let params = GenerateParams::default();
        assert_eq!(params.node_count, 100);
        assert_eq!(params.extra_links_per_node, 1);
        assert_eq!(params.max_link_count(), 199);
    }

    proptest! {
        #[test]
        fn generated_graphs_hold_invariants(
            node_count in 0usize..120,
            extra in 0usize..4,
            seed in any::<u64>(),
        ) {
            let params = GenerateParams::new(node_count, extra);
            let graph = params.generate(&mut seeded_source(seed));

            assert_invariants(&graph, params);
            let expected_components = usize::from(node_count > 0);
            prop_assert_eq!(graph.weak_component_count(), expected_components);
        }

        #[test]
        fn same_seed_same_graph(node_count in 0usize..60, seed in any::<u64>()) {
            let a = generate(node_count, 2, &mut seeded_source(seed));
            let b = generate(node_count, 2, &mut seeded_source(seed));
            prop_assert_eq!(a, b);
        }
    }
}
