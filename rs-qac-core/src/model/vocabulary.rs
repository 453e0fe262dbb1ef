use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::successors::by_rank;
use crate::text::Lexicon;

/// Counts recognized words while a corpus is read.
#[derive(Clone, Debug, Default)]
pub(crate) struct VocabularyCounter {
	counts: HashMap<String, u32>,
}

impl VocabularyCounter {
	/// Counts every token of a sentence that the lexicon recognizes,
	/// under its lowercase form.
	pub fn add_tokens<L: Lexicon + ?Sized>(&mut self, tokens: &[&str], lexicon: &L) {
		for token in tokens {
			if lexicon.is_recognized(token) {
				let count = self.counts.entry(token.to_lowercase()).or_insert(0);
				*count = count.saturating_add(1);
			}
		}
	}

	pub fn merge(&mut self, other: Self) {
		for (word, count) in other.counts {
			let total = self.counts.entry(word).or_insert(0);
			*total = total.saturating_add(count);
		}
	}

	pub fn freeze(self) -> Vocabulary {
		self.counts.into_iter().collect()
	}
}

/// Frequency table of recognized words.
///
/// Keeps the raw counts plus a ranked index (count descending, word ascending)
/// built once, so prefix completion never sorts at query time. Only the counts
/// are serialized; the index is rebuilt on load.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct Vocabulary {
	counts: BTreeMap<String, u32>,
	ranked: Vec<(String, u32)>,
}

impl From<BTreeMap<String, u32>> for Vocabulary {
	fn from(counts: BTreeMap<String, u32>) -> Self {
		let mut ranked: Vec<(String, u32)> = counts.iter().map(|(word, count)| (word.clone(), *count)).collect();
		ranked.sort_by(by_rank);
		Self { counts, ranked }
	}
}

impl From<Vocabulary> for BTreeMap<String, u32> {
	fn from(vocabulary: Vocabulary) -> Self {
		vocabulary.counts
	}
}

/// Collects `(word, count)` pairs; counts of repeated words are summed.
impl<W: Into<String>> FromIterator<(W, u32)> for Vocabulary {
	fn from_iter<I: IntoIterator<Item = (W, u32)>>(iter: I) -> Self {
		let mut counts = BTreeMap::new();
		for (word, count) in iter {
			if count > 0 {
				let total: &mut u32 = counts.entry(word.into()).or_insert(0);
				*total = total.saturating_add(count);
			}
		}
		Self::from(counts)
	}
}

impl Vocabulary {
	/// Number of distinct words.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn contains(&self, word: &str) -> bool {
		self.counts.contains_key(word)
	}

	pub fn frequency(&self, word: &str) -> Option<u32> {
		self.counts.get(word).copied()
	}

	/// Ranked `(word, count)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
		self.ranked.iter().map(|(word, count)| (word.as_str(), *count))
	}

	/// Returns the most frequent words starting with `initials`.
	///
	/// # Parameters
	/// - `initials`: incomplete word, matched case-insensitively. Empty matches
	///   every word.
	/// - `count`: number of words to return.
	/// - `return_all`: ignore `count` and return every match.
	///
	/// # Returns
	/// Matching words ranked by frequency, fewer than `count` if fewer match.
	pub fn possible_words(&self, initials: &str, count: usize, return_all: bool) -> Vec<String> {
		let initials = initials.to_lowercase();
		let limit = if return_all { usize::MAX } else { count };

		self.ranked
			.iter()
			.filter(|(word, _)| word.starts_with(&initials))
			.take(limit)
			.map(|(word, _)| word.clone())
			.collect()
	}

	pub(crate) fn check(&self) -> Result<(), String> {
		match self.counts.iter().find(|(_, count)| **count == 0) {
			Some((word, _)) => Err(format!("zero count for '{word}'")),
			None => Ok(()),
		}
	}
}
