use crate::error::{Result, TrieError};

/// Stable arena index of a trie node.
///
/// A `NodeId` stays valid until the node it names is discarded. Besides
/// the slot index it carries the slot's generation at allocation time;
/// discarding bumps the slot's generation, so a stale id keeps being
/// rejected even after the index is recycled for a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
	pub(crate) index: usize,
	pub(crate) generation: u32,
}

/// A single trie node.
///
/// # Invariants
/// - Among the children of any node, symbols are unique
/// - `terminal` is the only indicator that a complete word ends here
/// - The payload, if any, is owned exclusively by the node and is dropped
///   with it
#[derive(Debug)]
pub struct Node<M> {
	/// The character of the node. The root carries a sentinel (`'\0'`)
	/// that is not part of any word.
	pub(crate) symbol: char,
	/// True iff some inserted word ends exactly at this node.
	pub(crate) terminal: bool,
	/// First child, head of the sibling-linked child list.
	pub(crate) child: Option<NodeId>,
	/// Next child of the same parent.
	pub(crate) sibling: Option<NodeId>,
	/// Optional node-owned payload.
	pub(crate) meta: Option<M>,
}

impl<M> Node<M> {
	/// Creates a fresh node with no links.
	pub(crate) fn new(symbol: char, terminal: bool, meta: Option<M>) -> Self {
		Self { symbol, terminal, child: None, sibling: None, meta }
	}
}

/// Resolves the payload arguments of node construction.
///
/// The payload is either a caller-owned value taken over by the node, or a
/// default-initialized slot requested through `zeroed`. The two are
/// mutually exclusive.
///
/// # Errors
/// Returns `MetaConflict` if both a value and `zeroed` are supplied.
pub(crate) fn resolve_meta<M: Default>(meta: Option<M>, zeroed: bool) -> Result<Option<M>> {
	match (meta, zeroed) {
		(Some(_), true) => Err(TrieError::MetaConflict),
		(None, true) => Ok(Some(M::default())),
		(meta, false) => Ok(meta),
	}
}
