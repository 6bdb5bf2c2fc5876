//! Order-bundling strategies for trial transactions.

use serde::{Deserialize, Serialize};

/// How many synthetic copies of the take-order are bundled into a trial
/// transaction. Different batch sizes exercise different code paths in the
/// arb contract, so the retrier probes all of them against the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundlingStrategy {
	Single,
	Duplicate2,
	Duplicate3,
}

impl BundlingStrategy {
	/// Number of take-order entries this strategy encodes.
	pub fn copies(&self) -> usize {
		match self {
			BundlingStrategy::Single => 1,
			BundlingStrategy::Duplicate2 => 2,
			BundlingStrategy::Duplicate3 => 3,
		}
	}

	/// The first `n` strategies, in probing order. `n` is clamped to the
	/// available variants.
	pub fn first_n(n: usize) -> Vec<BundlingStrategy> {
		[
			BundlingStrategy::Single,
			BundlingStrategy::Duplicate2,
			BundlingStrategy::Duplicate3,
		]
		.into_iter()
		.take(n.max(1))
		.collect()
	}
}

impl std::fmt::Display for BundlingStrategy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.copies())
	}
}
