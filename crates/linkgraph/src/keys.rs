//! Sequential key allocation for nodes and links.
//!
//! Keys are derived from the size of the collection they are inserted
//! into: the first node is `node-1`, the first link is `link-1`.

pub const NODE_KEY_PREFIX: &str = "node-";
pub const LINK_KEY_PREFIX: &str = "link-";

/// Key of the node inserted after `count` existing nodes.
pub fn node_key(count: usize) -> String {
    format!("{NODE_KEY_PREFIX}{}", count + 1)
}

/// Key of the link inserted after `count` existing links.
pub fn link_key(count: usize) -> String {
    link_key_for_id(count + 1)
}

/// Key of the link carrying the 1-indexed id `id`.
pub fn link_key_for_id(id: usize) -> String {
    format!("{LINK_KEY_PREFIX}{id}")
}

/// First node key at or after `node-<count+1>` that `is_taken` rejects.
///
/// Collections that shrink (a node was removed) would otherwise hand out
/// a key that is still in use.
pub fn next_free_node_key(
    count: usize,
    is_taken: impl Fn(&str) -> bool,
) -> String {
    let mut n = count;
    loop {
        let key = node_key(n);
        if !is_taken(&key) {
            return key;
        }
        n += 1;
    }
}

/// First link id at or after `count + 1` whose key `is_taken` rejects.
pub fn next_free_link_id(
    count: usize,
    is_taken: impl Fn(&str) -> bool,
) -> usize {
    let mut id = count + 1;
    while is_taken(&link_key_for_id(id)) {
        id += 1;
    }
    id
}
