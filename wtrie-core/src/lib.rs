//! Character-trie Markov text generation library.
//!
//! This crate provides a prefix-tree (trie) engine over character sequences
//! and a fixed-context Markov model built on top of it:
//! - An arena-backed trie with insertion, lookup, structural deletion and
//!   per-node payloads
//! - A character-level Markov chain trainer and sampler
//! - Internal utilities for I/O and line handling
//!
//! The trie is generic over its payload type; the Markov layer instantiates
//! it with transition counters.

/// The trie engine: nodes, arena, and all structural operations.
pub mod trie;

/// Markov chain model built on the trie (training and sampling).
pub mod model;

/// Failure kinds reported by the trie engine.
pub mod error;

/// I/O utilities (file loading, line helpers).
pub mod io;

pub use error::{Result, TrieError};
