use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use super::builder::{build_tables, ORDERS};
use super::ngram_model::NGramTable;
use super::persistence::{
	read_table, write_table, Header, BIGRAMS_FILE, QUADGRAMS_FILE, TRIGRAMS_FILE, VOCABULARY_FILE,
};
use super::vocabulary::Vocabulary;
use crate::error::{ModelError, ModelResult};
use crate::text::{Lexicon, Tokenizer, WordTokenizer};

/// Word-level language model used for query autocompletion.
///
/// This struct holds:
/// - `vocabulary`: frequency of every recognized word of the corpus.
/// - `bigrams`, `trigrams`, `quadgrams`: successor tables keyed by the
///   1, 2 and 3 preceding tokens.
/// - `tokenizer`: the tokenizer the tables were built with, reused for queries.
///
/// A model is built or loaded once and never mutated afterwards; every query
/// method takes `&self` and the model can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct LanguageModel<T: Tokenizer = WordTokenizer> {
	vocabulary: Vocabulary,
	bigrams: NGramTable,
	trigrams: NGramTable,
	quadgrams: NGramTable,
	corpus_checksum: u32,
	tokenizer: T,
}

/// Size of each table, as reported to clients.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSummary {
	pub vocabulary: usize,
	pub bigram_contexts: usize,
	pub trigram_contexts: usize,
	pub quadgram_contexts: usize,
}

impl LanguageModel<WordTokenizer> {
	/// Builds a model from a list of unique sentences with the default tokenizer.
	pub fn build<L: Lexicon + Sync + ?Sized>(sentences: &[String], lexicon: &L) -> ModelResult<Self> {
		Self::build_with(sentences, lexicon, WordTokenizer)
	}

	/// Loads a model saved with `save`, using the default tokenizer.
	pub fn load<P: AsRef<Path>>(dir: P) -> ModelResult<Self> {
		Self::load_with(dir, WordTokenizer)
	}

	/// Assembles a model from tables built elsewhere.
	///
	/// # Errors
	/// Returns `Inconsistent` if a table does not have the order of its slot.
	pub fn from_tables(
		vocabulary: Vocabulary,
		bigrams: NGramTable,
		trigrams: NGramTable,
		quadgrams: NGramTable,
	) -> ModelResult<Self> {
		let model = Self { vocabulary, bigrams, trigrams, quadgrams, corpus_checksum: 0, tokenizer: WordTokenizer };
		model.check()?;
		Ok(model)
	}
}

impl<T: Tokenizer> LanguageModel<T> {
	/// Builds a model from a list of unique sentences.
	///
	/// # Parameters
	/// - `sentences`: training corpus, one sentence per entry.
	/// - `lexicon`: recognized-word test deciding which words enter the vocabulary.
	/// - `tokenizer`: used for the corpus now and for every query later.
	pub fn build_with<L>(sentences: &[String], lexicon: &L, tokenizer: T) -> ModelResult<Self>
	where
		L: Lexicon + Sync + ?Sized,
		T: Sync,
	{
		let (vocabulary, [bigrams, trigrams, quadgrams]) =
			build_tables(sentences, lexicon, &tokenizer).map_err(ModelError::Inconsistent)?;

		Ok(Self {
			vocabulary,
			bigrams,
			trigrams,
			quadgrams,
			corpus_checksum: corpus_checksum(sentences),
			tokenizer,
		})
	}

	/// Loads the four tables of a model from `dir`.
	///
	/// # Errors
	/// - `MissingTable` if one of the four files is absent.
	/// - `Inconsistent` if the tables come from different builds or break an
	///   ordering invariant.
	/// - `Io` / `Codec` if a file cannot be read or decoded.
	pub fn load_with<P: AsRef<Path>>(dir: P, tokenizer: T) -> ModelResult<Self> {
		let dir = dir.as_ref();
		let (header, vocabulary) = read_table::<Vocabulary>(dir, VOCABULARY_FILE)?;
		let bigrams = read_ngrams(dir, BIGRAMS_FILE, header)?;
		let trigrams = read_ngrams(dir, TRIGRAMS_FILE, header)?;
		let quadgrams = read_ngrams(dir, QUADGRAMS_FILE, header)?;

		let model = Self {
			vocabulary,
			bigrams,
			trigrams,
			quadgrams,
			corpus_checksum: header.corpus_checksum,
			tokenizer,
		};
		model.check()?;

		info!("All dictionaries are loaded from {}", dir.display());
		Ok(model)
	}

	/// Saves the four tables of the model to `dir`, creating it if needed.
	pub fn save<P: AsRef<Path>>(&self, dir: P) -> ModelResult<()> {
		let dir = dir.as_ref();
		let header = Header::new(self.corpus_checksum);

		write_table(dir, VOCABULARY_FILE, header, &self.vocabulary)?;
		write_table(dir, BIGRAMS_FILE, header, &self.bigrams)?;
		write_table(dir, TRIGRAMS_FILE, header, &self.trigrams)?;
		write_table(dir, QUADGRAMS_FILE, header, &self.quadgrams)?;

		info!("Dictionaries are saved to {}", dir.display());
		Ok(())
	}

	fn check(&self) -> ModelResult<()> {
		self.vocabulary
			.check()
			.map_err(|e| ModelError::Inconsistent(format!("{VOCABULARY_FILE}: {e}")))?;

		let slots = [(&self.bigrams, BIGRAMS_FILE), (&self.trigrams, TRIGRAMS_FILE), (&self.quadgrams, QUADGRAMS_FILE)];
		for ((table, name), order) in slots.into_iter().zip(ORDERS) {
			table.check(order).map_err(|e| ModelError::Inconsistent(format!("{name}: {e}")))?;
		}
		Ok(())
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	pub fn bigrams(&self) -> &NGramTable {
		&self.bigrams
	}

	pub fn trigrams(&self) -> &NGramTable {
		&self.trigrams
	}

	pub fn quadgrams(&self) -> &NGramTable {
		&self.quadgrams
	}

	pub fn summary(&self) -> ModelSummary {
		ModelSummary {
			vocabulary: self.vocabulary.len(),
			bigram_contexts: self.bigrams.len(),
			trigram_contexts: self.trigrams.len(),
			quadgram_contexts: self.quadgrams.len(),
		}
	}

	/// Backoff order: quadgrams, trigrams, bigrams.
	fn tables(&self) -> [&NGramTable; 3] {
		[&self.quadgrams, &self.trigrams, &self.bigrams]
	}

	/// Tokenizes `text` with the model's tokenizer.
	///
	/// Tokens are not lowercased here; callers lowercase the text first.
	pub(crate) fn tokens(&self, text: &str) -> Vec<String> {
		self.tokenizer.tokenize(text).into_iter().map(str::to_owned).collect()
	}

	/// Returns the most frequent vocabulary words starting with `initials`.
	///
	/// See `Vocabulary::possible_words`.
	pub fn possible_words(&self, initials: &str, count: usize, return_all: bool) -> Vec<String> {
		self.vocabulary.possible_words(initials, count, return_all)
	}

	/// Predicts the words most likely to follow `context`.
	///
	/// Backs off from the quadgram table (last 3 tokens) to trigrams (last 2)
	/// and bigrams (last token). The first table that knows the context answers,
	/// even with fewer than `count` words; lower orders are then never consulted.
	/// Returns an empty list when no table knows the context. Case-insensitive.
	pub fn predict_next_word(&self, context: &str, count: usize) -> Vec<String> {
		self.next_words(&self.tokens(&context.to_lowercase()), count)
	}

	pub(crate) fn next_words(&self, context: &[String], count: usize) -> Vec<String> {
		self.tables()
			.into_iter()
			.find_map(|table| table.successors_of_tail(context))
			.map(|successors| successors.top(count))
			.unwrap_or_default()
	}

	/// Completes the last, possibly partial, word of `sentence`.
	///
	/// Uses the same backoff as `predict_next_word` on the tokens before the
	/// last one, keeping only successors starting with the last token. The first
	/// table yielding at least one match answers. Without any match, falls back
	/// to `possible_words` on the last token alone. Case-insensitive.
	pub fn complete_last_word(&self, sentence: &str, count: usize) -> Vec<String> {
		self.last_word_completions(&self.tokens(&sentence.to_lowercase()), count)
	}

	pub(crate) fn last_word_completions(&self, tokens: &[String], count: usize) -> Vec<String> {
		let (last_word, context) = match tokens.split_last() {
			Some((last_word, context)) => (last_word.as_str(), context),
			None => ("", tokens),
		};

		for table in self.tables() {
			if let Some(successors) = table.successors_of_tail(context) {
				let words = successors.top_with_prefix(last_word, count);
				if !words.is_empty() {
					return words;
				}
			}
		}

		// Not using the context if none of the n-gram tables matched
		self.possible_words(last_word, count, false)
	}
}

/// Reads an n-gram table and makes sure it belongs to the same build as `header`.
fn read_ngrams(dir: &Path, name: &str, header: Header) -> ModelResult<NGramTable> {
	let (table_header, table) = read_table::<NGramTable>(dir, name)?;
	if table_header != header {
		return Err(ModelError::Inconsistent(format!("{name} was built from another corpus than {VOCABULARY_FILE}")));
	}
	Ok(table)
}

/// CRC32 of the corpus, stored in every table header to tie the four tables together.
fn corpus_checksum(sentences: &[String]) -> u32 {
	let mut hasher = crc32fast::Hasher::new();
	for sentence in sentences {
		hasher.update(sentence.as_bytes());
		hasher.update(b"\n");
	}
	hasher.finalize()
}
