use log::debug;

use super::language_model::LanguageModel;
use super::request::{Limits, SuggestRequest};
use crate::error::RequestError;
use crate::text::{Tokenizer, WordTokenizer};

/// Expands a partial query into a tree of suggestions, flattened level by level.
///
/// # Responsibilities
/// - Complete or extend the query once (the seed level)
/// - Extend every suggestion of a level with the next most likely words
/// - Keep earlier levels before later ones, parents in order, branches in rank order
///
/// Holds only a shared reference to the model, so one expander per request
/// is free to create.
#[derive(Debug, Clone, Copy)]
pub struct QueryExpander<'a, T: Tokenizer = WordTokenizer> {
	model: &'a LanguageModel<T>,
}

impl<'a, T: Tokenizer> QueryExpander<'a, T> {
	pub fn new(model: &'a LanguageModel<T>) -> Self {
		Self { model }
	}

	/// Validates a request against `limits`, then expands it.
	///
	/// # Errors
	/// Returns `RequestError::TooExpensive` when `branches x levels` exceeds
	/// `limits.max_work`.
	pub fn answer(&self, request: &SuggestRequest, limits: &Limits) -> Result<Vec<String>, RequestError> {
		request.validate(limits)?;
		Ok(self.autocomplete_query(&request.query, request.branches(), request.levels()))
	}

	/// Predicts up to `levels` further words for `query`, keeping at most
	/// `branches` candidates per prediction step.
	///
	/// # Behavior
	/// - `levels == 0` returns an empty list.
	/// - The query is lowercased, every suggestion starts with it.
	/// - Level 1 depends on the end of the query:
	///   - trailing whitespace: the next words are appended as is;
	///   - last word in the vocabulary: the next words are appended after a space;
	///   - otherwise the last word is completed in place.
	/// - Every further level appends the next words of each suggestion of the
	///   previous level. A suggestion without prediction has no descendants.
	///
	/// # Returns
	/// All levels concatenated, earlier levels first.
	pub fn autocomplete_query(&self, query: &str, branches: usize, levels: usize) -> Vec<String> {
		if levels == 0 {
			return Vec::new();
		}

		let query = query.to_lowercase();
		let mut level = self.seed(&query, branches);
		let mut suggestions = level.clone();

		for depth in 1..levels {
			if level.is_empty() {
				debug!("Expansion of '{query}' stopped at level {depth}");
				break;
			}
			level = level
				.iter()
				.flat_map(|parent| {
					self.model
						.predict_next_word(parent, branches)
						.into_iter()
						.map(move |word| format!("{parent} {word}"))
				})
				.collect();
			suggestions.extend_from_slice(&level);
		}

		suggestions
	}

	/// First level of suggestions for a lowercased query.
	fn seed(&self, query: &str, branches: usize) -> Vec<String> {
		let tokens = self.model.tokens(query);

		if query.ends_with(char::is_whitespace) {
			// The last word is assumed complete even if it was never seen
			return self
				.model
				.next_words(&tokens, branches)
				.into_iter()
				.map(|word| format!("{query}{word}"))
				.collect();
		}

		match tokens.last() {
			Some(last) if self.model.vocabulary().contains(last) => self
				.model
				.next_words(&tokens, branches)
				.into_iter()
				.map(|word| format!("{query} {word}"))
				.collect(),
			last => {
				let partial = last.map_or("", String::as_str);
				let stem = query.strip_suffix(partial);
				self.model
					.last_word_completions(&tokens, branches)
					.into_iter()
					.map(|word| match stem {
						Some(stem) => format!("{stem}{word}"),
						None => format!("{query} {word}"),
					})
					.collect()
			}
		}
	}
}

impl<T: Tokenizer> LanguageModel<T> {
	/// Shortcut for `QueryExpander::new(self).autocomplete_query(..)`.
	pub fn autocomplete_query(&self, query: &str, branches: usize, levels: usize) -> Vec<String> {
		QueryExpander::new(self).autocomplete_query(query, branches, levels)
	}
}
