use crate::store::{GraphStats, NodeListRow, Store};
use crate::versioned::Memoized;

pub struct Cache {
    pub node_list: Memoized<Store, u64, Vec<NodeListRow>>,
    pub stats: Memoized<Store, (u64, u64), GraphStats>,
}

impl Cache {
    pub fn new() -> Self {
        let node_list = Memoized::new(
            |s: &Store| s.nodes.version(),
            |s: &Store| s.node_list_uncached(),
        );

        let stats = Memoized::new(
            |s: &Store| (s.nodes.version(), s.links.version()),
            |s: &Store| s.stats_uncached(),
        );

        Self { node_list, stats }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}
