/// Transition weight attached to a trie node by the chain model.
///
/// `count` is the number of times the transition was observed; `share` is
/// the count normalized against all sibling transitions of the same
/// context node. Shares are recomputed after every update, so the shares
/// of one node's children always sum to 1 once anything was observed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transition {
	/// Raw observation count.
	pub count: f32,
	/// Count normalized against sibling transitions, in `[0, 1]`.
	pub share: f32,
}

impl Transition {
	/// Records one more observation of this transition.
	pub fn observe(&mut self) {
		self.count += 1.0;
	}
}
