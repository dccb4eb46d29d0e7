use super::node::{Node, NodeId, resolve_meta};
use crate::error::{Result, TrieError};

/// Arena slot. Discarded nodes are poisoned instead of reused in place so
/// that a stale `NodeId` is reported instead of reaching reused memory.
/// The generation is bumped on every poisoning; ids carry the generation
/// they were allocated under, so a stale id still misses after the index
/// has been recycled for a new node.
#[derive(Debug)]
struct Slot<M> {
	generation: u32,
	state: SlotState<M>,
}

#[derive(Debug)]
enum SlotState<M> {
	Live(Node<M>),
	Poisoned,
}

/// Location of a found word relative to its surroundings.
///
/// Reports, for the terminal node of a word, its immediate parent and the
/// sibling immediately preceding it in the parent's child list (`None` if
/// it is the head). Needed by structural deletion to relink the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLocation {
	pub node: NodeId,
	pub parent: NodeId,
	pub prev_sibling: Option<NodeId>,
}

/// The maximal suffix of a word's path owned by no other stored word.
///
/// `head` is the first node of the chain, `parent` its predecessor on the
/// path. The whole chain can be cut at `head` without breaking any other
/// stored word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateChain {
	pub head: NodeId,
	pub parent: NodeId,
}

/// A prefix tree over character sequences, generic over the per-node
/// payload type `M`.
///
/// Nodes are kept in an arena and addressed by [`NodeId`]. Each node owns
/// at most one child subtree (head of a sibling-linked list) and its next
/// sibling; the structure is a forest rooted at one sentinel node. New
/// children are pushed to the head of their parent's list, so lookup is
/// most efficient for recently seen symbols. That is a trade-off, not an
/// invariant: no ordering is assumed among siblings.
///
/// # Responsibilities
/// - Insert whole words or length-bounded prefixes
/// - Look up words (terminal-node semantics)
/// - Structurally delete words, distinguishing privately owned suffix
///   chains from shared prefix material
/// - Attach and update per-node payloads
#[derive(Debug)]
pub struct Trie<M> {
	slots: Vec<Slot<M>>,
	free: Vec<usize>,
	root: NodeId,
	live: usize,
}

/// Sentinel symbol carried by the root node.
const ROOT_SYMBOL: char = '\0';

impl<M> Trie<M> {
	/// Creates an empty trie with a sentinel root node.
	pub fn new() -> Self {
		let root = Node::new(ROOT_SYMBOL, false, None);
		Self {
			slots: vec![Slot { generation: 0, state: SlotState::Live(root) }],
			free: Vec::new(),
			root: NodeId { index: 0, generation: 0 },
			live: 1,
		}
	}

	/// Returns the root node id. The root's symbol is a sentinel and is
	/// not part of any word.
	pub fn root(&self) -> NodeId {
		self.root
	}

	/// Number of live nodes, the sentinel root included.
	pub fn node_count(&self) -> usize {
		self.live
	}

	fn node(&self, id: NodeId) -> Result<&Node<M>> {
		match self.slots.get(id.index) {
			Some(slot) if slot.generation == id.generation => match &slot.state {
				SlotState::Live(node) => Ok(node),
				SlotState::Poisoned => Err(TrieError::NoSuchNode),
			},
			_ => Err(TrieError::NoSuchNode),
		}
	}

	fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<M>> {
		match self.slots.get_mut(id.index) {
			Some(slot) if slot.generation == id.generation => match &mut slot.state {
				SlotState::Live(node) => Ok(node),
				SlotState::Poisoned => Err(TrieError::NoSuchNode),
			},
			_ => Err(TrieError::NoSuchNode),
		}
	}

	fn alloc(&mut self, node: Node<M>) -> NodeId {
		self.live += 1;
		match self.free.pop() {
			Some(index) => {
				let slot = &mut self.slots[index];
				slot.state = SlotState::Live(node);
				NodeId { index, generation: slot.generation }
			}
			None => {
				self.slots.push(Slot { generation: 0, state: SlotState::Live(node) });
				NodeId { index: self.slots.len() - 1, generation: 0 }
			}
		}
	}

	/// Recursive consistency check.
	///
	/// An absent reference passes; a live node passes iff its sibling
	/// subtree and its child subtree both pass. A poisoned or out-of-range
	/// id fails. Depth bounded by tree depth; cycles are not detected (the
	/// construction process cannot create one).
	pub fn check(&self, node: Option<NodeId>) -> bool {
		match node {
			None => true,
			Some(id) => match self.node(id) {
				Ok(node) => self.check(node.sibling) && self.check(node.child),
				Err(_) => false,
			},
		}
	}

	/// Searches the children of `parent` for `symbol`.
	///
	/// Performs a linear traversal of the parent's sibling-linked child
	/// list. On a match, returns the child id together with the sibling
	/// immediately preceding it in the list (`None` if the match is the
	/// head).
	///
	/// # Errors
	/// Returns `Orphan` if `parent` is absent.
	pub fn find_child(&self, parent: NodeId, symbol: char) -> Result<Option<(NodeId, Option<NodeId>)>> {
		let parent = self.node(parent).map_err(|_| TrieError::Orphan)?;

		let mut prev = None;
		let mut at = parent.child;
		while let Some(id) = at {
			let node = self.node(id)?;
			if node.symbol == symbol {
				return Ok(Some((id, prev)));
			}
			prev = Some(id);
			at = node.sibling;
		}
		Ok(None)
	}

	/// Returns true if the node has more than one child.
	///
	/// # Errors
	/// Returns `NullTarget` if the node is absent.
	pub fn has_multiple_children(&self, id: NodeId) -> Result<bool> {
		let node = self.node(id).map_err(|_| TrieError::NullTarget)?;
		match node.child {
			Some(child) => Ok(self.node(child)?.sibling.is_some()),
			None => Ok(false),
		}
	}

	/// Iterates over the children of `parent`, head (most recently
	/// inserted) first.
	///
	/// The whole sibling chain is validated here; the iterator's shared
	/// borrow keeps the trie frozen afterwards, so iteration itself
	/// cannot run into a broken link.
	///
	/// # Errors
	/// - `Orphan` if `parent` is absent
	/// - `CorruptStructure` if the child list contains a dead node
	pub fn children(&self, parent: NodeId) -> Result<Children<'_, M>> {
		let first = self.node(parent).map_err(|_| TrieError::Orphan)?.child;
		let mut at = first;
		while let Some(id) = at {
			at = self.node(id).map_err(|_| TrieError::CorruptStructure)?.sibling;
		}
		Ok(Children { trie: self, next: first })
	}

	/// Allocates a fresh child and links it as the new head of the
	/// parent's child list.
	fn push_child(&mut self, parent: NodeId, symbol: char, terminal: bool, meta: Option<M>) -> Result<NodeId> {
		let mut node = Node::new(symbol, terminal, meta);
		node.sibling = self.node(parent)?.child;
		let id = self.alloc(node);
		self.node_mut(parent)?.child = Some(id);
		Ok(id)
	}

	/// Find-or-create a child of `parent` matching `symbol`.
	///
	/// If no such child exists, a new node is allocated, initialized with
	/// the supplied values and pushed as the new head of the parent's
	/// child list (O(1), reverses temporal order of children). If a child
	/// with the symbol exists and `strict` is set, the operation fails
	/// without mutating anything. If it exists and `strict` is not set,
	/// its terminal flag and payload are overwritten in place, preserving
	/// its position in the list.
	///
	/// The payload is either a caller-owned `meta` value or, when `zeroed`
	/// is set, a default-initialized one; supplying both is a misuse.
	///
	/// # Errors
	/// - `Orphan` if `parent` is absent
	/// - `DuplicateChild` if `strict` and the symbol is already present
	/// - `MetaConflict` if both `meta` and `zeroed` are supplied
	pub fn spawn(
		&mut self,
		strict: bool,
		parent: NodeId,
		symbol: char,
		terminal: bool,
		meta: Option<M>,
		zeroed: bool,
	) -> Result<NodeId>
	where
		M: Default,
	{
		let meta = resolve_meta(meta, zeroed)?;
		self.node(parent).map_err(|_| TrieError::Orphan)?;

		match self.find_child(parent, symbol)? {
			Some(_) if strict => Err(TrieError::DuplicateChild),
			Some((id, _)) => {
				let node = self.node_mut(id)?;
				node.terminal = terminal;
				node.meta = meta;
				Ok(id)
			}
			None => self.push_child(parent, symbol, terminal, meta),
		}
	}

	/// Inserts a word below `from`, marking its final node terminal.
	///
	/// Walks the path of the word's characters, spawning only the missing
	/// nodes. Nodes already on the path are descended through untouched,
	/// so terminal flags and payloads of shared prefix material survive
	/// insertion of longer or shorter words.
	///
	/// Returns the id of the word's terminal node.
	///
	/// # Errors
	/// - `NullTarget` if `from` is absent
	/// - `EmptyInput` on an empty sequence
	pub fn add_word(&mut self, from: NodeId, word: &str) -> Result<NodeId> {
		self.node(from).map_err(|_| TrieError::NullTarget)?;
		let chars: Vec<char> = word.chars().collect();
		if chars.is_empty() {
			return Err(TrieError::EmptyInput);
		}
		self.add_chars(from, &chars)
	}

	/// Same as [`Trie::add_word`], but inserts only the first `count`
	/// characters of the word.
	pub fn add_word_prefix(&mut self, from: NodeId, word: &str, count: usize) -> Result<NodeId> {
		self.node(from).map_err(|_| TrieError::NullTarget)?;
		let mut chars: Vec<char> = word.chars().collect();
		if chars.is_empty() || count == 0 {
			return Err(TrieError::EmptyInput);
		}
		chars.truncate(count);
		self.add_chars(from, &chars)
	}

	fn add_chars(&mut self, from: NodeId, chars: &[char]) -> Result<NodeId> {
		let mut at = from;
		for (i, &symbol) in chars.iter().enumerate() {
			let last = i + 1 == chars.len();
			at = match self.find_child(at, symbol)? {
				Some((id, _)) => {
					if last {
						self.node_mut(id)?.terminal = true;
					}
					id
				}
				None => self.push_child(at, symbol, last, None)?,
			};
		}
		Ok(at)
	}

	/// Finds a stored word below `from`.
	///
	/// Follows child links for the successive characters of the word and
	/// succeeds only if the final node's terminal flag is set. A sequence
	/// that is merely a prefix of a longer stored word is not found.
	///
	/// Returns the id of the word's terminal node.
	///
	/// # Errors
	/// - `NullTarget` if `from` is absent
	/// - `EmptyInput` on an empty sequence
	/// - `NoSuchWord` if the word is not stored
	pub fn find_word(&self, from: NodeId, word: &str) -> Result<NodeId> {
		self.node(from).map_err(|_| TrieError::NullTarget)?;
		let chars: Vec<char> = word.chars().collect();
		if chars.is_empty() {
			return Err(TrieError::EmptyInput);
		}

		let mut at = from;
		for &symbol in &chars {
			at = match self.find_child(at, symbol)? {
				Some((id, _)) => id,
				None => return Err(TrieError::NoSuchWord),
			};
		}
		if self.node(at)?.terminal {
			Ok(at)
		} else {
			Err(TrieError::NoSuchWord)
		}
	}

	/// Same as [`Trie::find_word`], but also reports the terminal node's
	/// parent and the sibling preceding it in the parent's child list.
	/// Used by structural deletion to relink the list.
	pub fn find_word_with_relatives(&self, from: NodeId, word: &str) -> Result<WordLocation> {
		self.node(from).map_err(|_| TrieError::NullTarget)?;
		let chars: Vec<char> = word.chars().collect();
		if chars.is_empty() {
			return Err(TrieError::EmptyInput);
		}

		let mut at = from;
		let mut parent = from;
		let mut prev_sibling = None;
		for (i, &symbol) in chars.iter().enumerate() {
			let (id, prev) = match self.find_child(at, symbol)? {
				Some(found) => found,
				None => return Err(TrieError::NoSuchWord),
			};
			if i + 1 == chars.len() {
				parent = at;
				prev_sibling = prev;
			}
			at = id;
		}
		if self.node(at)?.terminal {
			Ok(WordLocation { node: at, parent, prev_sibling })
		} else {
			Err(TrieError::NoSuchWord)
		}
	}

	/// Identifies the maximal suffix of a word's path that is owned
	/// exclusively by this word.
	///
	/// Walks from `from` to the word's terminal node. A visited node
	/// breaks any candidate chain when it has more than one child, or
	/// when it terminates another stored word; tracking then restarts
	/// from the next node on the path. If the terminal node itself has
	/// children (the word is a strict prefix of a longer stored word),
	/// no private chain exists and `None` is returned: none of the path
	/// may be removed without breaking longer words.
	///
	/// # Errors
	/// Fails with `NoSuchWord` if the word is not stored (plus the usual
	/// `NullTarget` / `EmptyInput` preconditions).
	pub fn private_chain(&self, from: NodeId, word: &str) -> Result<Option<PrivateChain>> {
		let end = self.find_word(from, word)?;

		let mut chain: Option<PrivateChain> = None;
		let mut at = from;
		for symbol in word.chars() {
			let (child, _) = match self.find_child(at, symbol)? {
				Some(found) => found,
				None => return Err(TrieError::NoSuchWord),
			};
			// A node ending another word is shared even when it does not
			// branch.
			let shared = child != end && self.node(child)?.terminal;
			if self.has_multiple_children(child)? || shared {
				chain = None;
			} else if chain.is_none() {
				chain = Some(PrivateChain { head: child, parent: at });
			}
			at = child;
		}
		if self.node(end)?.child.is_some() {
			chain = None;
		}
		Ok(chain)
	}

	/// Removes a stored word.
	///
	/// If the word owns a private chain and its terminal node has no
	/// children, the chain head is unlinked from its parent's child list
	/// and the cut-off subtree is destroyed. Otherwise the word's path is
	/// shared prefix material: the structure is preserved and only the
	/// terminal flag is cleared.
	///
	/// Removing the same word twice correctly fails with `NoSuchWord` the
	/// second time.
	pub fn remove_word(&mut self, from: NodeId, word: &str) -> Result<()> {
		let end = self.find_word(from, word)?;
		match self.private_chain(from, word)? {
			Some(chain) => {
				let symbol = self.node(chain.head)?.symbol;
				self.collapse(chain.parent, symbol)
			}
			None => {
				self.node_mut(end)?.terminal = false;
				Ok(())
			}
		}
	}

	/// Purges the child of `parent` carrying `symbol`, preserving its
	/// siblings.
	///
	/// The child's successor in the list is relinked to the parent (or to
	/// the preceding sibling), the child's own sibling link is cut, and
	/// the child's subtree is recursively destroyed.
	///
	/// # Errors
	/// - `Orphan` if `parent` is absent
	/// - `NoSuchNode` if no child carries `symbol`
	pub fn collapse(&mut self, parent: NodeId, symbol: char) -> Result<()> {
		let (child, prev) = match self.find_child(parent, symbol)? {
			Some(found) => found,
			None => return Err(TrieError::NoSuchNode),
		};

		let next = self.node(child)?.sibling;
		match prev {
			Some(prev) => self.node_mut(prev)?.sibling = next,
			None => self.node_mut(parent)?.child = next,
		}
		self.node_mut(child)?.sibling = None;
		self.purge(child)
	}

	/// Discards a single node, dropping its payload and poisoning its
	/// arena slot under a fresh generation before the index is recycled.
	///
	/// Non-recursive: any children or siblings of the discarded node
	/// become unreachable and must be detached by the caller first. Use
	/// [`Trie::purge`] to remove a subtree.
	///
	/// # Errors
	/// Returns `NullTarget` if the node is absent.
	pub fn discard(&mut self, id: NodeId) -> Result<()> {
		match self.slots.get_mut(id.index) {
			Some(slot)
				if slot.generation == id.generation && matches!(slot.state, SlotState::Live(_)) =>
			{
				slot.state = SlotState::Poisoned;
				slot.generation += 1;
				self.free.push(id.index);
				self.live -= 1;
				Ok(())
			}
			_ => Err(TrieError::NullTarget),
		}
	}

	/// Recursively discards a node, its sibling chain and its child
	/// subtree.
	///
	/// # Errors
	/// Returns `CorruptStructure` if the consistency check fails.
	pub fn purge(&mut self, id: NodeId) -> Result<()> {
		if !self.check(Some(id)) {
			return Err(TrieError::CorruptStructure);
		}
		self.purge_subtree(id)
	}

	fn purge_subtree(&mut self, id: NodeId) -> Result<()> {
		let (sibling, child) = {
			let node = self.node(id)?;
			(node.sibling, node.child)
		};
		self.discard(id)?;
		if let Some(sibling) = sibling {
			self.purge_subtree(sibling)?;
		}
		if let Some(child) = child {
			self.purge_subtree(child)?;
		}
		Ok(())
	}

	/// Returns the node's symbol.
	pub fn symbol(&self, id: NodeId) -> Result<char> {
		Ok(self.node(id)?.symbol)
	}

	/// Returns true iff a stored word ends exactly at this node.
	pub fn is_terminal(&self, id: NodeId) -> Result<bool> {
		Ok(self.node(id)?.terminal)
	}

	/// Returns the node's first child, if any.
	pub fn first_child(&self, id: NodeId) -> Result<Option<NodeId>> {
		Ok(self.node(id)?.child)
	}

	/// Returns the node's next sibling, if any.
	pub fn next_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
		Ok(self.node(id)?.sibling)
	}

	/// Returns a reference to the node's payload, if any.
	pub fn meta(&self, id: NodeId) -> Result<Option<&M>> {
		Ok(self.node(id)?.meta.as_ref())
	}

	/// Returns a mutable reference to the node's payload, if any.
	pub fn meta_mut(&mut self, id: NodeId) -> Result<Option<&mut M>> {
		Ok(self.node_mut(id)?.meta.as_mut())
	}

	/// Attaches or overwrites the node's payload, returning the previous
	/// one.
	pub fn set_meta(&mut self, id: NodeId, meta: Option<M>) -> Result<Option<M>> {
		Ok(std::mem::replace(&mut self.node_mut(id)?.meta, meta))
	}

	/// Renders the structure depth-first as an indented listing.
	///
	/// Debugging aid. Terminal nodes are marked with `.`, nodes carrying a
	/// payload with `*`; NUL and newline symbols print as `{0}` and `{n}`.
	/// Performs the consistency check before rendering.
	pub fn dump(&self) -> Result<String> {
		if !self.check(Some(self.root)) {
			return Err(TrieError::CorruptStructure);
		}
		let mut out = String::new();
		self.dump_node(self.root, 0, &mut out)?;
		Ok(out)
	}

	fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) -> Result<()> {
		let node = self.node(id)?;

		for _ in 1..depth {
			out.push_str("    ");
		}
		if depth > 0 {
			out.push_str(" `--");
		}
		match node.symbol {
			'\0' => out.push_str("{0}\n"),
			'\n' => out.push_str("{n}\n"),
			symbol => {
				out.push('[');
				out.push(symbol);
				out.push(']');
				out.push(if node.terminal { '.' } else { ' ' });
				out.push(if node.meta.is_some() { '*' } else { ' ' });
				out.push('\n');
			}
		}

		let mut child = node.child;
		while let Some(id) = child {
			self.dump_node(id, depth + 1, out)?;
			child = self.node(id)?.sibling;
		}
		Ok(())
	}
}

impl<M> Default for Trie<M> {
	fn default() -> Self {
		Self::new()
	}
}

/// Iterator over a node's sibling-linked child list.
pub struct Children<'a, M> {
	trie: &'a Trie<M>,
	next: Option<NodeId>,
}

impl<'a, M> Iterator for Children<'a, M> {
	type Item = NodeId;

	fn next(&mut self) -> Option<NodeId> {
		let id = self.next?;
		// The chain was validated when the iterator was created and the
		// shared borrow keeps the trie frozen, so this lookup cannot
		// fail.
		self.next = self.trie.node(id).ok().and_then(|node| node.sibling);
		Some(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::collections::BTreeSet;

	fn trie_with(words: &[&str]) -> Trie<u32> {
		let mut trie = Trie::new();
		for word in words {
			trie.add_word(trie.root(), word).unwrap();
		}
		trie
	}

	fn symbols_of_children(trie: &Trie<u32>, id: NodeId) -> Vec<char> {
		trie.children(id)
			.unwrap()
			.map(|child| trie.symbol(child).unwrap())
			.collect()
	}

	#[test]
	fn round_trip() {
		let mut trie = trie_with(&["cat"]);
		let end = trie.find_word(trie.root(), "cat").unwrap();
		assert!(trie.is_terminal(end).unwrap());

		trie.remove_word(trie.root(), "cat").unwrap();
		assert_eq!(trie.find_word(trie.root(), "cat"), Err(TrieError::NoSuchWord));
	}

	#[test]
	fn prefix_of_stored_word_is_not_a_word() {
		let trie = trie_with(&["cat"]);
		assert_eq!(trie.find_word(trie.root(), "ca"), Err(TrieError::NoSuchWord));
	}

	#[test]
	fn prefix_sharing() {
		let mut trie = trie_with(&["cat", "car"]);

		// Single shared path for "ca": root has one child, 'c' has one
		// child, 'a' has two.
		assert_eq!(symbols_of_children(&trie, trie.root()), vec!['c']);
		let (c, _) = trie.find_child(trie.root(), 'c').unwrap().unwrap();
		assert_eq!(symbols_of_children(&trie, c), vec!['a']);
		let (a, _) = trie.find_child(c, 'a').unwrap().unwrap();
		assert_eq!(symbols_of_children(&trie, a).len(), 2);

		trie.remove_word(trie.root(), "cat").unwrap();
		assert!(trie.find_word(trie.root(), "car").is_ok());
		assert_eq!(trie.find_word(trie.root(), "cat"), Err(TrieError::NoSuchWord));
	}

	#[test]
	fn private_chain_starts_at_first_exclusive_node() {
		let trie = trie_with(&["cat", "car"]);
		let chain = trie.private_chain(trie.root(), "cat").unwrap().unwrap();
		let (a, _) = {
			let (c, _) = trie.find_child(trie.root(), 'c').unwrap().unwrap();
			trie.find_child(c, 'a').unwrap().unwrap()
		};
		assert_eq!(chain.parent, a);
		assert_eq!(trie.symbol(chain.head).unwrap(), 't');
	}

	#[test]
	fn private_chain_deletion_frees_whole_chain() {
		let mut trie = trie_with(&["dog"]);
		assert_eq!(trie.node_count(), 4);

		let chain = trie.private_chain(trie.root(), "dog").unwrap().unwrap();
		assert_eq!(chain.parent, trie.root());
		assert_eq!(trie.symbol(chain.head).unwrap(), 'd');

		trie.remove_word(trie.root(), "dog").unwrap();
		assert_eq!(trie.node_count(), 1);
		assert_eq!(trie.first_child(trie.root()).unwrap(), None);
	}

	#[test]
	fn no_private_chain_for_prefix_of_longer_word() {
		let trie = trie_with(&["do", "dog"]);
		assert_eq!(trie.private_chain(trie.root(), "do").unwrap(), None);
	}

	#[test]
	fn shared_terminal_preserved_on_removal() {
		let mut trie = trie_with(&["do", "dog"]);

		trie.remove_word(trie.root(), "do").unwrap();
		assert!(trie.find_word(trie.root(), "dog").is_ok());
		assert_eq!(trie.find_word(trie.root(), "do"), Err(TrieError::NoSuchWord));

		// The 'o' node lost its terminal flag but kept its child.
		let (d, _) = trie.find_child(trie.root(), 'd').unwrap().unwrap();
		let (o, _) = trie.find_child(d, 'o').unwrap().unwrap();
		assert!(!trie.is_terminal(o).unwrap());
		assert!(trie.find_child(o, 'g').unwrap().is_some());
	}

	#[test]
	fn removing_extension_keeps_embedded_word() {
		let mut trie = trie_with(&["do", "dog"]);

		// The 'd' and 'o' nodes belong to "do"; only 'g' may go.
		let chain = trie.private_chain(trie.root(), "dog").unwrap().unwrap();
		assert_eq!(trie.symbol(chain.head).unwrap(), 'g');

		trie.remove_word(trie.root(), "dog").unwrap();
		assert!(trie.find_word(trie.root(), "do").is_ok());
		assert_eq!(trie.find_word(trie.root(), "dog"), Err(TrieError::NoSuchWord));
		assert_eq!(trie.node_count(), 3);
	}

	#[test]
	fn insertion_preserves_existing_terminals_and_meta() {
		let mut trie: Trie<u32> = Trie::new();
		let end = trie.add_word(trie.root(), "do").unwrap();
		trie.set_meta(end, Some(9)).unwrap();

		trie.add_word(trie.root(), "dog").unwrap();
		let end = trie.find_word(trie.root(), "do").unwrap();
		assert_eq!(trie.meta(end).unwrap(), Some(&9));
	}

	#[test]
	fn nonstrict_spawn_overwrites_in_place() {
		let mut trie: Trie<u32> = Trie::new();
		trie.spawn(false, trie.root(), 'a', false, None, false).unwrap();
		trie.spawn(false, trie.root(), 'b', false, None, false).unwrap();
		assert_eq!(symbols_of_children(&trie, trie.root()), vec!['b', 'a']);

		let id = trie.spawn(false, trie.root(), 'a', true, Some(5), false).unwrap();
		assert_eq!(symbols_of_children(&trie, trie.root()), vec!['b', 'a']);
		assert!(trie.is_terminal(id).unwrap());
		assert_eq!(trie.meta(id).unwrap(), Some(&5));
		assert_eq!(trie.node_count(), 3);
	}

	#[test]
	fn strict_spawn_fails_without_mutating() {
		let mut trie: Trie<u32> = Trie::new();
		let id = trie.spawn(false, trie.root(), 'a', true, Some(5), false).unwrap();

		let err = trie.spawn(true, trie.root(), 'a', false, None, false).unwrap_err();
		assert_eq!(err, TrieError::DuplicateChild);
		assert!(trie.is_terminal(id).unwrap());
		assert_eq!(trie.meta(id).unwrap(), Some(&5));
		assert_eq!(trie.node_count(), 2);
	}

	#[test]
	fn spawn_zeroed_default_initializes_meta() {
		let mut trie: Trie<u32> = Trie::new();
		let id = trie.spawn(false, trie.root(), 'a', false, None, true).unwrap();
		assert_eq!(trie.meta(id).unwrap(), Some(&0));
	}

	#[test]
	fn spawn_meta_conflict() {
		let mut trie: Trie<u32> = Trie::new();
		let err = trie.spawn(false, trie.root(), 'a', false, Some(1), true).unwrap_err();
		assert_eq!(err, TrieError::MetaConflict);
		assert_eq!(trie.node_count(), 1);
	}

	#[test]
	fn purge_completeness() {
		let mut trie = trie_with(&["ab", "ac", "ad", "xyz"]);
		let mut ids = vec![trie.root()];
		let mut walk = vec![trie.root()];
		while let Some(id) = walk.pop() {
			for child in trie.children(id).unwrap().collect::<Vec<_>>() {
				ids.push(child);
				walk.push(child);
			}
		}
		assert_eq!(ids.len(), trie.node_count());

		trie.purge(trie.root()).unwrap();
		assert_eq!(trie.node_count(), 0);
		for id in ids {
			assert_eq!(trie.symbol(id), Err(TrieError::NoSuchNode));
		}
	}

	#[test]
	fn stale_id_is_detected_after_removal() {
		let mut trie = trie_with(&["dog"]);
		let end = trie.find_word(trie.root(), "dog").unwrap();
		trie.remove_word(trie.root(), "dog").unwrap();
		assert_eq!(trie.is_terminal(end), Err(TrieError::NoSuchNode));
	}

	#[test]
	fn stale_id_is_not_aliased_by_slot_reuse() {
		let mut trie = trie_with(&["dog"]);
		let end = trie.find_word(trie.root(), "dog").unwrap();
		trie.remove_word(trie.root(), "dog").unwrap();

		// Reinsertion recycles the freed slots under a new generation;
		// the retained id must keep missing instead of resolving to the
		// new occupant.
		trie.add_word(trie.root(), "cat").unwrap();
		assert_eq!(trie.node_count(), 4);
		assert_eq!(trie.symbol(end), Err(TrieError::NoSuchNode));
		assert_eq!(trie.is_terminal(end), Err(TrieError::NoSuchNode));
		assert_eq!(trie.discard(end), Err(TrieError::NullTarget));
	}

	#[test]
	fn corrupt_sibling_chain_is_reported() {
		let mut trie: Trie<u32> = Trie::new();
		for symbol in ['x', 'y', 'z'] {
			trie.spawn(false, trie.root(), symbol, false, None, false).unwrap();
		}

		// Discard a mid-list child without detaching it: the chain is now
		// broken and enumeration must say so instead of truncating.
		let (y, _) = trie.find_child(trie.root(), 'y').unwrap().unwrap();
		trie.discard(y).unwrap();
		assert_eq!(trie.children(trie.root()).err(), Some(TrieError::CorruptStructure));
		assert!(!trie.check(Some(trie.root())));
	}

	#[test]
	fn discard_is_non_recursive() {
		let mut trie = trie_with(&["ab"]);
		let (a, _) = trie.find_child(trie.root(), 'a').unwrap().unwrap();
		// Detach before discarding; the subtree below is leaked from the
		// structure's point of view but stays owned by the arena.
		trie.node_mut(trie.root()).unwrap().child = None;
		trie.discard(a).unwrap();
		assert_eq!(trie.symbol(a), Err(TrieError::NoSuchNode));
		assert_eq!(trie.discard(a), Err(TrieError::NullTarget));
	}

	#[test]
	fn spec_scenario_ab_ac() {
		let mut trie = trie_with(&["ab", "ac"]);

		let end = trie.find_word(trie.root(), "ab").unwrap();
		assert_eq!(trie.symbol(end).unwrap(), 'b');

		let (a, _) = trie.find_child(trie.root(), 'a').unwrap().unwrap();
		assert_eq!(symbols_of_children(&trie, a).len(), 2);

		trie.remove_word(trie.root(), "ab").unwrap();
		assert!(trie.find_word(trie.root(), "ac").is_ok());
		assert_eq!(trie.find_word(trie.root(), "ab"), Err(TrieError::NoSuchWord));

		assert_eq!(trie.remove_word(trie.root(), "ab"), Err(TrieError::NoSuchWord));
	}

	#[test]
	fn empty_input_is_rejected() {
		let mut trie: Trie<u32> = Trie::new();
		assert_eq!(trie.add_word(trie.root(), ""), Err(TrieError::EmptyInput));
		assert_eq!(trie.find_word(trie.root(), ""), Err(TrieError::EmptyInput));
		assert_eq!(trie.add_word_prefix(trie.root(), "", 3), Err(TrieError::EmptyInput));
		assert_eq!(trie.add_word_prefix(trie.root(), "abc", 0), Err(TrieError::EmptyInput));
	}

	#[test]
	fn add_word_prefix_bounds_the_path() {
		let mut trie: Trie<u32> = Trie::new();
		trie.add_word_prefix(trie.root(), "hello", 3).unwrap();
		assert!(trie.find_word(trie.root(), "hel").is_ok());
		assert_eq!(trie.find_word(trie.root(), "hello"), Err(TrieError::NoSuchWord));
		assert_eq!(trie.node_count(), 4);
	}

	#[test]
	fn find_word_with_relatives_reports_list_position() {
		let trie = trie_with(&["ab", "ac"]);

		// Children of 'a' are [c, b] (head insertion), so 'b' is preceded
		// by 'c'.
		let location = trie.find_word_with_relatives(trie.root(), "ab").unwrap();
		let (a, _) = trie.find_child(trie.root(), 'a').unwrap().unwrap();
		assert_eq!(location.parent, a);
		assert_eq!(trie.symbol(location.node).unwrap(), 'b');
		let prev = location.prev_sibling.unwrap();
		assert_eq!(trie.symbol(prev).unwrap(), 'c');

		let location = trie.find_word_with_relatives(trie.root(), "ac").unwrap();
		assert_eq!(location.prev_sibling, None);
	}

	#[test]
	fn collapse_unknown_symbol() {
		let mut trie = trie_with(&["ab"]);
		assert_eq!(trie.collapse(trie.root(), 'z'), Err(TrieError::NoSuchNode));
	}

	#[test]
	fn collapse_sole_child_clears_parent_link() {
		let mut trie = trie_with(&["ab"]);
		trie.collapse(trie.root(), 'a').unwrap();
		assert_eq!(trie.first_child(trie.root()).unwrap(), None);
		assert_eq!(trie.node_count(), 1);
	}

	#[test]
	fn children_are_iterated_head_first() {
		let mut trie: Trie<u32> = Trie::new();
		for symbol in ['x', 'y', 'z'] {
			trie.spawn(false, trie.root(), symbol, false, None, false).unwrap();
		}
		assert_eq!(symbols_of_children(&trie, trie.root()), vec!['z', 'y', 'x']);
	}

	#[test]
	fn consistency_check() {
		let trie: Trie<u32> = Trie::new();
		assert!(trie.check(None));
		assert!(trie.check(Some(trie.root())));
		assert!(!trie.check(Some(NodeId { index: 42, generation: 0 })));
	}

	#[test]
	fn dump_renders_markers() {
		let mut trie: Trie<u32> = Trie::new();
		let end = trie.add_word(trie.root(), "ab").unwrap();
		trie.set_meta(end, Some(1)).unwrap();

		let dump = trie.dump().unwrap();
		let lines: Vec<&str> = dump.lines().collect();
		assert_eq!(lines[0], "{0}");
		assert_eq!(lines[1], " `--[a]  ");
		assert_eq!(lines[2], "     `--[b].*");
	}

	proptest! {
		#[test]
		fn insert_then_remove_round_trips(words in proptest::collection::btree_set("[a-d]{1,6}", 1..12)) {
			let words: Vec<String> = words.into_iter().collect();
			let mut trie: Trie<u32> = Trie::new();
			for word in &words {
				trie.add_word(trie.root(), word).unwrap();
			}
			for word in &words {
				prop_assert!(trie.find_word(trie.root(), word).is_ok());
			}

			let mut remaining: BTreeSet<&String> = words.iter().collect();
			for word in &words {
				trie.remove_word(trie.root(), word).unwrap();
				remaining.remove(word);
				prop_assert_eq!(trie.find_word(trie.root(), word), Err(TrieError::NoSuchWord));
				for kept in &remaining {
					prop_assert!(trie.find_word(trie.root(), kept).is_ok());
				}
			}
			prop_assert_eq!(trie.node_count(), 1);
		}
	}
}
