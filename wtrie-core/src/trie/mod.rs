//! Prefix tree (trie) over character sequences.
//!
//! Nodes represent single symbols; words start from the root (the root
//! itself is not part of any word) and end at a terminating node. A
//! terminating node is not necessarily a leaf: a stored word may be a
//! strict prefix of another stored word.
//!
//! For memory-management reasons each node carries only two links: one to
//! its first child and one to its next sibling, so the children of a node
//! form a singly linked list. Parent links are not supported. Nodes live in
//! an arena and are addressed by stable indices; freed slots are poisoned
//! so that stale indices are detected instead of silently reading reused
//! memory.

/// A single trie node and its arena index.
pub mod node;

/// The trie arena and all structural operations.
pub mod tree;
