//! Guarded insertion of directed links.
//!
//! A link set never holds a self-link and never holds two links for the
//! same ordered `(from, to)` pair. The reverse pair `(to, from)` is a
//! different link and is accepted.

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::trace;

use crate::graph::DirectedLink;
use crate::keys::link_key_for_id;

/// Why a link was not added. Rejections are expected outcomes, not
/// failures.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRejection {
    #[error("link would connect a node to itself")]
    SelfLink,
    #[error("a link with the same direction already exists")]
    Duplicate,
}

/// Result of [`try_add_link`].
///
/// On rejection `links` borrows the input slice unchanged, so callers can
/// detect a no-op with `matches!(links, Cow::Borrowed(_))`.
#[derive(Debug, Clone)]
pub struct TryAddLink<'a> {
    pub links: Cow<'a, [DirectedLink]>,
    pub added: bool,
    pub next_link_id: usize,
}

/// True iff some link goes exactly `from -> to`.
pub fn has_directed_link(
    links: &[DirectedLink],
    from: &str,
    to: &str,
) -> bool {
    links.iter().any(|l| l.connects(from, to))
}

/// Check `from -> to` against `links` without adding anything.
pub fn validate_link<'l>(
    links: impl IntoIterator<Item = &'l DirectedLink>,
    from: &str,
    to: &str,
) -> Result<(), LinkRejection> {
    if from == to {
        return Err(LinkRejection::SelfLink);
    }
    if links.into_iter().any(|l| l.connects(from, to)) {
        return Err(LinkRejection::Duplicate);
    }
    Ok(())
}

/// Append `link-<next_link_id>: from -> to` to a copy of `links`.
///
/// The input is never modified. The id counter only advances when the
/// link is accepted.
pub fn try_add_link<'a>(
    links: &'a [DirectedLink],
    from: &str,
    to: &str,
    next_link_id: usize,
) -> TryAddLink<'a> {
    if let Err(reason) = validate_link(links, from, to) {
        trace!(from, to, %reason, "link rejected");
        return TryAddLink {
            links: Cow::Borrowed(links),
            added: false,
            next_link_id,
        };
    }

    let mut next = Vec::with_capacity(links.len() + 1);
    next.extend_from_slice(links);
    next.push(DirectedLink::new(link_key_for_id(next_link_id), from, to));

    TryAddLink {
        links: Cow::Owned(next),
        added: true,
        next_link_id: next_link_id + 1,
    }
}

// ------------------------------------------------------------------
// Owned buffer
// ------------------------------------------------------------------

/// Growable link buffer with an ordered-pair index.
///
/// Same acceptance rules as [`try_add_link`], but each attempt is O(1)
/// and the buffer is mutated in place. Intended to be owned by a single
/// builder and released with [`LinkSet::into_links`].
#[derive(Debug, Clone)]
pub struct LinkSet {
    links: Vec<DirectedLink>,
    pairs: HashSet<(String, String)>,
    next_link_id: usize,
}

impl Default for LinkSet {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkSet {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Vec::with_capacity(capacity),
            pairs: HashSet::with_capacity(capacity),
            next_link_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Id the next accepted link will receive.
    pub fn next_link_id(&self) -> usize {
        self.next_link_id
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.pairs.contains(&(from.to_owned(), to.to_owned()))
    }

    pub fn links(&self) -> &[DirectedLink] {
        &self.links
    }

    /// Add `from -> to`, returning the id it was assigned.
    pub fn try_add(
        &mut self,
        from: &str,
        to: &str,
    ) -> Result<usize, LinkRejection> {
        if from == to {
            return Err(LinkRejection::SelfLink);
        }
        if !self.pairs.insert((from.to_owned(), to.to_owned())) {
            return Err(LinkRejection::Duplicate);
        }

        let id = self.next_link_id;
        self.links
            .push(DirectedLink::new(link_key_for_id(id), from, to));
        self.next_link_id += 1;
        Ok(id)
    }

    pub fn into_links(self) -> Vec<DirectedLink> {
        self.links
    }
}
