mod common;

use std::fs;

use common::{corpus, lexicon, trained_model};
use rs_qac_core::error::ModelError;
use rs_qac_core::model::language_model::LanguageModel;
use rs_qac_core::model::persistence::{BIGRAMS_FILE, QUADGRAMS_FILE, TRIGRAMS_FILE, VOCABULARY_FILE};
use rstest::rstest;
use tempfile::tempdir;

#[test]
fn save_then_load_reproduces_suggestions() {
	let dir = tempdir().unwrap();
	let model = trained_model();
	model.save(dir.path()).unwrap();

	let loaded = LanguageModel::load(dir.path()).unwrap();
	assert_eq!(loaded.vocabulary(), model.vocabulary());
	assert_eq!(loaded.summary(), model.summary());

	for query in ["how to", "how to ", "the best p", "best", "where", ""] {
		for (branches, levels) in [(1, 1), (2, 2), (3, 3)] {
			assert_eq!(
				loaded.autocomplete_query(query, branches, levels),
				model.autocomplete_query(query, branches, levels),
				"query '{query}' diverged after reload"
			);
		}
	}
}

#[test]
fn saving_twice_writes_identical_bytes() {
	let first = tempdir().unwrap();
	let second = tempdir().unwrap();
	trained_model().save(first.path()).unwrap();
	LanguageModel::load(first.path()).unwrap().save(second.path()).unwrap();

	for name in [VOCABULARY_FILE, BIGRAMS_FILE, TRIGRAMS_FILE, QUADGRAMS_FILE] {
		assert_eq!(fs::read(first.path().join(name)).unwrap(), fs::read(second.path().join(name)).unwrap());
	}
}

#[test]
fn save_creates_missing_directory() {
	let dir = tempdir().unwrap();
	let nested = dir.path().join("data").join("autocomplete_query");
	trained_model().save(&nested).unwrap();
	assert!(LanguageModel::load(&nested).is_ok());
}

#[rstest]
#[case(VOCABULARY_FILE)]
#[case(BIGRAMS_FILE)]
#[case(TRIGRAMS_FILE)]
#[case(QUADGRAMS_FILE)]
fn partial_model_sets_are_rejected(#[case] missing: &str) {
	let dir = tempdir().unwrap();
	trained_model().save(dir.path()).unwrap();
	fs::remove_file(dir.path().join(missing)).unwrap();

	match LanguageModel::load(dir.path()) {
		Err(ModelError::MissingTable(name)) => assert_eq!(name, missing),
		other => panic!("expected MissingTable({missing}), got {other:?}"),
	}
}

#[rstest]
#[case(BIGRAMS_FILE)]
#[case(QUADGRAMS_FILE)]
fn tables_from_another_build_are_rejected(#[case] swapped: &str) {
	let dir = tempdir().unwrap();
	let other = tempdir().unwrap();
	trained_model().save(dir.path()).unwrap();

	let mut smaller = corpus();
	smaller.truncate(3);
	LanguageModel::build(&smaller, &lexicon()).unwrap().save(other.path()).unwrap();
	fs::copy(other.path().join(swapped), dir.path().join(swapped)).unwrap();

	assert!(matches!(LanguageModel::load(dir.path()), Err(ModelError::Inconsistent(_))));
}

#[test]
fn table_in_the_wrong_slot_is_rejected() {
	let dir = tempdir().unwrap();
	trained_model().save(dir.path()).unwrap();
	fs::copy(dir.path().join(TRIGRAMS_FILE), dir.path().join(BIGRAMS_FILE)).unwrap();

	assert!(matches!(LanguageModel::load(dir.path()), Err(ModelError::Inconsistent(_))));
}

#[test]
fn corrupted_table_is_rejected() {
	let dir = tempdir().unwrap();
	trained_model().save(dir.path()).unwrap();
	let path = dir.path().join(TRIGRAMS_FILE);
	let bytes = fs::read(&path).unwrap();
	fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

	assert!(LanguageModel::load(dir.path()).is_err());
}

#[test]
fn loading_an_empty_directory_fails() {
	let dir = tempdir().unwrap();
	assert!(matches!(LanguageModel::load(dir.path()), Err(ModelError::MissingTable(_))));
}
