use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::successors::{SuccessorCounts, Successors};

/// Counts n-grams of a fixed order while a corpus is read.
///
/// Partial counters built over disjoint chunks of a corpus can be merged, then
/// frozen into an immutable `NGramTable`.
#[derive(Clone, Debug)]
pub(crate) struct NGramCounter {
	/// Order of the model (context length + 1), always >= 2
	n: usize,

	/// Mapping from a context (n-1 tokens) to its successor counts
	states: HashMap<Vec<String>, SuccessorCounts>,
}

impl NGramCounter {
	pub fn new(n: usize) -> Self {
		debug_assert!(n >= 2, "n-gram order must be >= 2");
		Self { n, states: HashMap::new() }
	}

	/// Slides a window of `n` tokens over a tokenized sentence.
	///
	/// The first `n - 1` tokens of each window are the context, the last one the
	/// successor. Sentences shorter than `n` contribute nothing.
	pub fn add_tokens(&mut self, tokens: &[&str]) {
		for window in tokens.windows(self.n) {
			let (context, next) = window.split_at(self.n - 1);
			let key: Vec<String> = context.iter().map(|token| (*token).to_owned()).collect();
			self.states.entry(key).or_default().add_transition(next[0]);
		}
	}

	/// Merges another counter of the same order into this one.
	///
	/// # Errors
	/// Returns an error if the orders differ.
	pub fn merge(&mut self, other: Self) -> Result<(), String> {
		if self.n != other.n {
			return Err(format!("N mismatch: {} vs {}", self.n, other.n));
		}
		for (key, state) in other.states {
			self.states.entry(key).or_default().merge(state);
		}
		Ok(())
	}

	/// Ranks every successor list and returns the read-only table.
	pub fn freeze(self) -> NGramTable {
		NGramTable {
			n: self.n,
			states: self.states.into_iter().map(|(key, state)| (key, state.freeze())).collect(),
		}
	}
}

/// Immutable successor table of order `n` (bigram: 2, trigram: 3, quadgram: 4).
///
/// # Invariants
/// - `n` is always >= 2
/// - Every context has exactly `n - 1` lowercase tokens
/// - Every successor list is non-empty and ranked (see `Successors`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NGramTable {
	n: usize,
	states: BTreeMap<Vec<String>, Successors>,
}

impl NGramTable {
	/// Assembles a table from raw counts.
	///
	/// Useful for small hand-written models; contexts whose length is not
	/// `n - 1` or whose successors are all zero are ignored.
	pub fn from_counts<C, W, I>(n: usize, entries: I) -> Self
	where
		C: IntoIterator<Item = W>,
		W: Into<String>,
		I: IntoIterator<Item = (C, Vec<(W, u32)>)>,
	{
		let mut states = BTreeMap::new();
		for (context, successors) in entries {
			let key: Vec<String> = context.into_iter().map(Into::into).collect();
			let successors = Successors::from_counts(successors.into_iter().map(|(word, count)| (word.into(), count)));
			if key.len() + 1 == n && !successors.is_empty() {
				states.insert(key, successors);
			}
		}
		Self { n, states }
	}

	/// Order of the table.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Number of tokens in a context.
	pub fn context_len(&self) -> usize {
		self.n - 1
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Ranked successors of an exact context, if it was observed.
	pub fn successors(&self, context: &[String]) -> Option<&Successors> {
		self.states.get(context)
	}

	/// Successors of the last `n - 1` tokens of `tokens`.
	///
	/// Returns `None` when `tokens` is too short for this order or when the
	/// context was never observed.
	pub fn successors_of_tail(&self, tokens: &[String]) -> Option<&Successors> {
		let start = tokens.len().checked_sub(self.context_len())?;
		self.successors(&tokens[start..])
	}

	/// Iterates contexts in lexicographic order.
	pub fn iter(&self) -> impl Iterator<Item = (&[String], &Successors)> {
		self.states.iter().map(|(key, successors)| (key.as_slice(), successors))
	}

	/// Checks the table invariants of a deserialized table.
	pub(crate) fn check(&self, expected_order: usize) -> Result<(), String> {
		if self.n != expected_order {
			return Err(format!("expected order {expected_order}, found {}", self.n));
		}
		for (key, successors) in &self.states {
			if key.len() != self.context_len() {
				return Err(format!("context {key:?} does not have {} tokens", self.context_len()));
			}
			successors.check().map_err(|e| format!("context {key:?}: {e}"))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	#[test]
	fn windows_split_into_context_and_successor() {
		let mut counter = NGramCounter::new(3);
		counter.add_tokens(&["the", "cat", "sat", "on", "the", "cat", "mat"]);
		counter.add_tokens(&["too", "short"]);
		let table = counter.freeze();

		assert_eq!(table.len(), 4);
		let successors = table.successors(&key(&["the", "cat"])).unwrap();
		assert_eq!(successors.iter().collect::<Vec<_>>(), vec![("mat", 1), ("sat", 1)]);
		assert!(table.successors(&key(&["too"])).is_none());
		assert!(table.check(3).is_ok());
	}

	#[test]
	fn tail_lookup_skips_short_contexts() {
		let table = NGramTable::from_counts(3, vec![(vec!["a", "b"], vec![("c", 2)])]);

		assert!(table.successors_of_tail(&key(&["b"])).is_none());
		assert_eq!(table.successors_of_tail(&key(&["x", "a", "b"])).unwrap().top(1), vec!["c"]);
	}

	#[test]
	fn merge_requires_same_order() {
		let mut bigrams = NGramCounter::new(2);
		bigrams.add_tokens(&["a", "b"]);
		let mut other = NGramCounter::new(2);
		other.add_tokens(&["a", "b", "a", "c"]);

		assert!(bigrams.clone().merge(NGramCounter::new(3)).is_err());
		bigrams.merge(other).unwrap();
		let table = bigrams.freeze();
		assert_eq!(table.successors(&key(&["a"])).unwrap().iter().collect::<Vec<_>>(), vec![("b", 2), ("c", 1)]);
	}

	#[test]
	fn check_rejects_wrong_order_and_context_length() {
		let table = NGramTable::from_counts(2, vec![(vec!["a"], vec![("b", 1)])]);
		assert!(table.check(2).is_ok());
		assert!(table.check(3).is_err());

		let mut broken = table.clone();
		broken.states.insert(key(&["a", "b"]), Successors::from_counts(vec![("c".to_owned(), 1)]));
		assert!(broken.check(2).is_err());
	}
}
