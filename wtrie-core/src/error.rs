//! Error types for the trie engine.

use thiserror::Error;

/// Result type alias for trie operations.
pub type Result<T> = std::result::Result<T, TrieError>;

/// Failure kinds surfaced by trie operations.
///
/// Every operation detects its own precondition failures and reports one of
/// these kinds; no operation attempts a partial rollback of a multi-node
/// mutation. Corruption is fatal to the operation invoked, not to the
/// process.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieError {
	/// A required node reference was absent.
	#[error("required node reference is absent")]
	NullTarget,

	/// An operation needing a parent node was given none.
	#[error("no parent node supplied")]
	Orphan,

	/// Insertion or lookup was given a zero-length sequence.
	#[error("empty character sequence")]
	EmptyInput,

	/// Strict insertion found the symbol already present.
	#[error("a child with this symbol already exists")]
	DuplicateChild,

	/// A collapse target was not present among the parent's children.
	#[error("no such node")]
	NoSuchNode,

	/// The looked-up or removed word was never stored.
	#[error("no such word")]
	NoSuchWord,

	/// The consistency check failed before a destructive operation.
	#[error("structure failed consistency check")]
	CorruptStructure,

	/// Both a ready-made payload and default-initialization were requested.
	#[error("payload value and default-initialization both supplied")]
	MetaConflict,
}
