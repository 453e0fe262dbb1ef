#![allow(dead_code)]

use rs_qac_core::model::language_model::LanguageModel;
use rs_qac_core::model::ngram_model::NGramTable;
use rs_qac_core::text::WordList;

pub type Entries = Vec<(Vec<&'static str>, Vec<(&'static str, u32)>)>;

/// Vocabulary {"the": 5, "cat": 3, "cap": 2} and the bigram `the -> {cat: 4, dog: 1}`.
pub fn scenario_model() -> LanguageModel {
	with_bigrams(vec![("cat", 4), ("dog", 1)])
}

/// Same vocabulary, but no successor of "the" starts with "ca".
pub fn vocabulary_only_model() -> LanguageModel {
	with_bigrams(vec![("dog", 1)])
}

fn with_bigrams(after_the: Vec<(&'static str, u32)>) -> LanguageModel {
	LanguageModel::from_tables(
		[("the", 5), ("cat", 3), ("cap", 2)].into_iter().collect(),
		NGramTable::from_counts(2, vec![(vec!["the"], after_the)]),
		NGramTable::from_counts(3, Entries::new()),
		NGramTable::from_counts(4, Entries::new()),
	)
	.unwrap()
}

pub fn corpus() -> Vec<String> {
	[
		"How to cook rice in a pot",
		"How to cook rice without a rice cooker",
		"How to cook pasta al dente",
		"How to make bread at home",
		"How to make pizza dough",
		"Best way to cook rice",
		"Best way to learn Rust",
		"The best pizza in New York",
		"The best pasta recipe",
		"Where to buy bread in Paris",
	]
	.into_iter()
	.map(str::to_owned)
	.collect()
}

pub fn lexicon() -> WordList {
	[
		"how", "to", "cook", "rice", "in", "a", "pot", "without", "cooker", "pasta", "make", "bread", "at",
		"home", "pizza", "dough", "al", "dente", "best", "way", "learn", "the", "recipe", "where", "buy", "Paris", "New", "York",
	]
	.into_iter()
	.collect()
}

pub fn trained_model() -> LanguageModel {
	LanguageModel::build(&corpus(), &lexicon()).unwrap()
}
