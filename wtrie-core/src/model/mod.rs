//! Markov chain model built on the character trie.
//!
//! Fixed-length context windows of the training text are stored as trie
//! words; each child of a window's terminal node carries a transition
//! counter toward the symbol that followed the window. Generation walks
//! the trie and draws the next character by weighted random selection
//! over those counters.

/// The fixed-context Markov chain: training and sampling.
pub mod chain;

/// Per-transition payload attached to trie nodes by the chain model.
pub mod transition;
