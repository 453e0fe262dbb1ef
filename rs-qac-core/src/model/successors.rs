use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ranking order shared by every frequency list of the model:
/// higher count first, then lexicographic on the word.
pub(crate) fn by_rank(a: &(String, u32), b: &(String, u32)) -> Ordering {
	b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Successor counts of a single context, accumulated while reading a corpus.
///
/// Conceptually a node of a Markov chain whose outgoing edges are weighted by
/// the number of times they were observed.
#[derive(Clone, Debug, Default)]
pub(crate) struct SuccessorCounts {
	/// Example: { "cat" => 42, "dog" => 3 }
	transitions: HashMap<String, u32>,
}

impl SuccessorCounts {
	/// Records one occurrence of `next` after this context.
	pub fn add_transition(&mut self, next: &str) {
		match self.transitions.get_mut(next) {
			Some(count) => *count = count.saturating_add(1),
			None => {
				self.transitions.insert(next.to_owned(), 1);
			}
		}
	}

	/// Sums the counts of another accumulator for the same context into this one.
	pub fn merge(&mut self, other: Self) {
		for (next, count) in other.transitions {
			let total = self.transitions.entry(next).or_insert(0);
			*total = total.saturating_add(count);
		}
	}

	/// Ranks the successors once; the result is never re-sorted.
	pub fn freeze(self) -> Successors {
		Successors::from_counts(self.transitions)
	}
}

/// Successors of one context, ranked by descending frequency.
///
/// # Invariants
/// - Sorted by count (descending), ties broken by word (ascending)
/// - Every count is strictly positive, every word appears once
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Successors(Vec<(String, u32)>);

impl Successors {
	/// Builds a ranked list from raw `(word, count)` pairs.
	///
	/// Zero counts are dropped; duplicates are not merged and must not occur.
	pub fn from_counts<I>(counts: I) -> Self
	where
		I: IntoIterator<Item = (String, u32)>,
	{
		let mut ranked: Vec<(String, u32)> = counts.into_iter().filter(|(_, count)| *count > 0).collect();
		ranked.sort_by(by_rank);
		Self(ranked)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Ranked `(word, count)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
		self.0.iter().map(|(word, count)| (word.as_str(), *count))
	}

	/// The `count` most frequent successors.
	pub fn top(&self, count: usize) -> Vec<String> {
		self.0.iter().take(count).map(|(word, _)| word.clone()).collect()
	}

	/// The `count` most frequent successors starting with `prefix`, in rank order.
	pub fn top_with_prefix(&self, prefix: &str, count: usize) -> Vec<String> {
		self.0
			.iter()
			.filter(|(word, _)| word.starts_with(prefix))
			.take(count)
			.map(|(word, _)| word.clone())
			.collect()
	}

	/// Checks the ranking invariants of data that did not come from `from_counts`.
	pub(crate) fn check(&self) -> Result<(), String> {
		if self.0.is_empty() {
			return Err("empty successor list".to_owned());
		}
		if let Some((word, _)) = self.0.iter().find(|(_, count)| *count == 0) {
			return Err(format!("zero count for '{word}'"));
		}
		match self.0.windows(2).find(|pair| by_rank(&pair[0], &pair[1]) != Ordering::Less) {
			Some(pair) => Err(format!("successors '{}' and '{}' are out of order", pair[0].0, pair[1].0)),
			None => Ok(()),
		}
	}
}
