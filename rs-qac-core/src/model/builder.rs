use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use super::ngram_model::{NGramCounter, NGramTable};
use super::vocabulary::{Vocabulary, VocabularyCounter};
use crate::text::{Lexicon, Tokenizer};

/// N-gram orders of the model, lowest first.
pub(crate) const ORDERS: [usize; 3] = [2, 3, 4];

/// Tables produced by one build pass: vocabulary and `[bigrams, trigrams, quadgrams]`.
pub(crate) type BuiltTables = (Vocabulary, [NGramTable; 3]);

/// All counters of a model for a chunk of the corpus.
struct ModelCounter {
	vocabulary: VocabularyCounter,
	ngrams: [NGramCounter; 3],
}

impl Default for ModelCounter {
	fn default() -> Self {
		Self {
			vocabulary: VocabularyCounter::default(),
			ngrams: ORDERS.map(NGramCounter::new),
		}
	}
}

impl ModelCounter {
	/// Feeds one sentence to every counter.
	///
	/// The vocabulary sees the original casing (recognition tries title and
	/// lower case), the n-gram counters see the lowercased sentence.
	fn add_sentence<L, T>(&mut self, sentence: &str, lexicon: &L, tokenizer: &T)
	where
		L: Lexicon + ?Sized,
		T: Tokenizer + ?Sized,
	{
		self.vocabulary.add_tokens(&tokenizer.tokenize(sentence), lexicon);

		let lowered = sentence.to_lowercase();
		let tokens = tokenizer.tokenize(&lowered);
		for counter in &mut self.ngrams {
			counter.add_tokens(&tokens);
		}
	}

	fn merge(&mut self, other: Self) -> Result<(), String> {
		self.vocabulary.merge(other.vocabulary);
		for (counter, partial) in self.ngrams.iter_mut().zip(other.ngrams) {
			counter.merge(partial)?;
		}
		Ok(())
	}

	fn freeze(self) -> BuiltTables {
		(self.vocabulary.freeze(), self.ngrams.map(NGramCounter::freeze))
	}
}

/// Builds the vocabulary and the three n-gram tables from a corpus.
///
/// # Behavior
/// - Splits sentences into chunks (based on CPU cores * factor).
/// - Counts each chunk on its own scoped thread.
/// - Merges all partial counters, then ranks every successor list once.
///
/// # Notes
/// - Counting is commutative, so the result does not depend on the order in
///   which partial counters arrive.
pub(crate) fn build_tables<L, T>(sentences: &[String], lexicon: &L, tokenizer: &T) -> Result<BuiltTables, String>
where
	L: Lexicon + Sync + ?Sized,
	T: Tokenizer + Sync + ?Sized,
{
	info!("Creating word distribution and n-grams. {} sentences to be processed.", sentences.len());

	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = sentences.len().div_ceil(chunks).max(1);

	let (tx, rx) = mpsc::channel();
	let merged = thread::scope(|scope| {
		for chunk in sentences.chunks(chunk_size) {
			let tx = tx.clone();
			scope.spawn(move || {
				let mut partial = ModelCounter::default();
				for sentence in chunk {
					partial.add_sentence(sentence, lexicon, tokenizer);
				}
				// `rx` outlives the scope, sending cannot fail.
				let _ = tx.send(partial);
			});
		}
		drop(tx);

		let mut merged = ModelCounter::default();
		for partial in rx.iter() {
			merged.merge(partial)?;
		}
		Ok::<_, String>(merged)
	})?;

	let (vocabulary, tables) = merged.freeze();
	info!("Finished creating word distribution: {} words.", vocabulary.len());
	for table in &tables {
		debug!("Finished creating {}-grams: {} contexts.", table.order(), table.len());
	}
	Ok((vocabulary, tables))
}
