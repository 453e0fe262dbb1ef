use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use rs_qac_core::io::read_corpus;
use rs_qac_core::model::expander::QueryExpander;
use rs_qac_core::model::language_model::LanguageModel;
use rs_qac_core::model::request::{Limits, SuggestRequest, DEFAULT_MAX_WORK};
use rs_qac_core::text::WordList;

#[derive(Parser, Debug)]
#[command(version, about = "Builds and inspects query autocompletion models")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Count a corpus and save the four model tables.
	Build {
		/// One sentence per line.
		#[arg(long)]
		corpus: PathBuf,

		/// Recognized words, one per line.
		#[arg(long)]
		words: PathBuf,

		#[arg(long, default_value = "./data/autocomplete_query")]
		out: PathBuf,
	},

	/// Expand a query with a saved model.
	Query {
		#[arg(long, default_value = "./data/autocomplete_query")]
		model: PathBuf,

		#[arg(long, default_value_t = 2, allow_negative_numbers = true)]
		branches: i64,

		#[arg(long, default_value_t = 2, allow_negative_numbers = true)]
		levels: i64,

		/// Largest `branches x levels` accepted.
		#[arg(long, default_value_t = DEFAULT_MAX_WORK)]
		max_work: usize,

		query: String,
	},
}

fn build(corpus: &Path, words: &Path, out: &Path) -> Result<LanguageModel, Box<dyn Error>> {
	let sentences = read_corpus(corpus)?;
	let lexicon = WordList::load(words)?;
	info!("{} unique sentences, {} recognized words", sentences.len(), lexicon.len());

	let model = LanguageModel::build(&sentences, &lexicon)?;
	model.save(out)?;
	Ok(model)
}

fn suggest(model: &LanguageModel, request: &SuggestRequest, limits: &Limits) -> Result<Vec<String>, Box<dyn Error>> {
	Ok(QueryExpander::new(model).answer(request, limits)?)
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	match Cli::parse().command {
		Command::Build { corpus, words, out } => {
			let summary = build(&corpus, &words, &out)?.summary();
			println!(
				"vocabulary: {}, bigram contexts: {}, trigram contexts: {}, quadgram contexts: {}",
				summary.vocabulary, summary.bigram_contexts, summary.trigram_contexts, summary.quadgram_contexts
			);
		}
		Command::Query { model, branches, levels, max_work, query } => {
			let model = LanguageModel::load(&model)?;
			let request = SuggestRequest { query, branches: Some(branches), levels: Some(levels) };
			for suggestion in suggest(&model, &request, &Limits { max_work })? {
				println!("{suggestion}");
			}
		}
	}

	Ok(())
}
