use rand::Rng;

use super::transition::Transition;
use crate::error::TrieError;
use crate::trie::node::NodeId;
use crate::trie::tree::Trie;

/// A fixed-context character-level Markov chain backed by a trie.
///
/// Every `context`-length window of the training text is inserted as a
/// trie word; the children of a window's terminal node carry
/// [`Transition`] payloads counting the symbols observed right after the
/// window. Sampling looks the current window up and draws the next
/// character from those children, weighted by their normalized shares.
///
/// # Invariants
/// - `context` is always >= 1
/// - Every stored window node has at least one payload-carrying child
/// - Shares of one node's children sum to 1 after every training update
#[derive(Debug)]
pub struct ChainModel {
	/// The order of the chain (window length in characters).
	context: usize,

	/// The trie holding windows and their transition counters.
	trie: Trie<Transition>,

	/// Default generation seed: the first window of the training text.
	seed: Vec<char>,
}

impl ChainModel {
	/// Creates an untrained chain with the given context length.
	///
	/// # Errors
	/// Returns an error if `context < 1`.
	pub fn new(context: usize) -> Result<Self, String> {
		if context < 1 {
			return Err("context must be >= 1".to_owned());
		}
		Ok(Self { context, trie: Trie::new(), seed: Vec::new() })
	}

	/// Returns the context length.
	pub fn context(&self) -> usize {
		self.context
	}

	/// Number of live trie nodes, for diagnostics.
	pub fn node_count(&self) -> usize {
		self.trie.node_count()
	}

	/// Trains the chain on a text, returning the number of context
	/// windows consumed.
	///
	/// Slides a `context`-length character window over the text. For each
	/// window the trie path is found or inserted, the transition toward
	/// the following character is counted, and the shares of all of that
	/// window's transitions are renormalized. Texts shorter than
	/// `context + 1` characters contribute nothing.
	///
	/// The first window of the first training text becomes the default
	/// generation seed.
	pub fn train(&mut self, text: &str) -> Result<usize, String> {
		let chars: Vec<char> = text.chars().collect();
		if chars.len() <= self.context {
			return Ok(0);
		}

		if self.seed.is_empty() {
			self.seed = chars[..self.context].to_vec();
		}

		let root = self.trie.root();
		let mut windows = 0;
		for i in 0..chars.len() - self.context {
			let window: String = chars[i..i + self.context].iter().collect();
			let next = chars[i + self.context];

			let end = match self.trie.find_word(root, &window) {
				Ok(end) => end,
				Err(TrieError::NoSuchWord) => {
					self.trie.add_word(root, &window).map_err(stringify)?
				}
				Err(err) => return Err(stringify(err)),
			};

			let child = match self.trie.find_child(end, next).map_err(stringify)? {
				Some((child, _)) => child,
				None => self
					.trie
					.spawn(true, end, next, false, None, true)
					.map_err(stringify)?,
			};
			if let Some(transition) = self.trie.meta_mut(child).map_err(stringify)? {
				transition.observe();
			}

			self.normalize(end)?;
			windows += 1;
		}
		Ok(windows)
	}

	/// Recomputes the shares of all transitions leaving one window node.
	fn normalize(&mut self, end: NodeId) -> Result<(), String> {
		let children: Vec<NodeId> = self.trie.children(end).map_err(stringify)?.collect();

		let mut total = 0.0;
		for &child in &children {
			if let Some(transition) = self.trie.meta(child).map_err(stringify)? {
				total += transition.count;
			}
		}
		if total <= 0.0 {
			return Ok(());
		}

		for &child in &children {
			if let Some(transition) = self.trie.meta_mut(child).map_err(stringify)? {
				transition.share = transition.count / total;
			}
		}
		Ok(())
	}

	/// Sets a custom generation seed.
	///
	/// Only the last `context` characters are kept, so a longer prompt
	/// may be supplied as-is.
	///
	/// # Errors
	/// Returns an error if the seed is shorter than the context length.
	pub fn set_seed(&mut self, seed: &str) -> Result<(), String> {
		let chars: Vec<char> = seed.chars().collect();
		if chars.len() < self.context {
			return Err(format!(
				"seed must be at least {} characters, got {}",
				self.context,
				chars.len()
			));
		}
		self.seed = chars[chars.len() - self.context..].to_vec();
		Ok(())
	}

	/// Generates `length` characters using the thread rng.
	///
	/// See [`ChainModel::generate_with`].
	pub fn generate(&self, length: usize) -> Result<String, String> {
		self.generate_with(&mut rand::rng(), length)
	}

	/// Generates up to `length` characters with the supplied rng.
	///
	/// Each round looks the current window up in the trie, draws the next
	/// character by weighted random selection over the window's
	/// transitions, emits it and slides the window. A window unknown to
	/// the model resets the window to the seed, consuming the round
	/// without emitting, so the output may be shorter than `length`.
	///
	/// # Errors
	/// Returns an error if the chain was never trained.
	pub fn generate_with<R: Rng>(&self, rng: &mut R, length: usize) -> Result<String, String> {
		if self.seed.len() < self.context {
			return Err("chain has not been trained".to_owned());
		}

		let root = self.trie.root();
		let mut window = self.seed.clone();
		let mut out = String::with_capacity(length);
		for _ in 0..length {
			let key: String = window.iter().collect();
			match self.trie.find_word(root, &key) {
				Ok(end) => match self.sample_next(rng, end).map_err(stringify)? {
					Some(next) => {
						out.push(next);
						window.remove(0);
						window.push(next);
					}
					None => window = self.seed.clone(),
				},
				Err(TrieError::NoSuchWord) => window = self.seed.clone(),
				Err(err) => return Err(stringify(err)),
			}
		}
		Ok(out)
	}

	/// Draws one outgoing transition of a window node by weighted random
	/// selection over the children's shares.
	fn sample_next<R: Rng>(&self, rng: &mut R, end: NodeId) -> Result<Option<char>, TrieError> {
		let draw: f32 = rng.random_range(0.0..1.0);

		let mut acc = 0.0;
		let mut picked = None;
		for child in self.trie.children(end)? {
			let share = match self.trie.meta(child)? {
				Some(transition) => transition.share,
				None => 0.0,
			};
			if share <= 0.0 {
				continue;
			}
			// Keep the last positive candidate so rounding in the
			// accumulated shares cannot leave the draw unmatched.
			acc += share;
			picked = Some(child);
			if draw < acc {
				break;
			}
		}
		match picked {
			Some(child) => Ok(Some(self.trie.symbol(child)?)),
			None => Ok(None),
		}
	}

	/// Renders the underlying trie (debugging aid).
	pub fn dump(&self) -> Result<String, String> {
		self.trie.dump().map_err(stringify)
	}
}

/// Converts a trie failure into the model layer's error type.
fn stringify(err: TrieError) -> String {
	err.to_string()
}
