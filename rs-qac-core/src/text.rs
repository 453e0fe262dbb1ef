use std::collections::HashSet;
use std::io;
use std::path::Path;

use crate::io::read_file;

/// Splits text into tokens.
///
/// Tokens are slices of the input, in order of appearance. The same tokenizer
/// must be used to build a model and to query it, otherwise lookups silently miss.
pub trait Tokenizer {
	fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Default word tokenizer.
///
/// - Runs of alphanumeric characters form a word
/// - `'` and `-` stay inside a word when followed by an alphanumeric character
///   (`don't`, `well-known`)
/// - Every other non-whitespace character is a token of its own
/// - Whitespace only separates tokens
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
	fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
		let mut tokens = Vec::new();
		let mut word_start: Option<usize> = None;
		let mut chars = text.char_indices().peekable();

		while let Some((i, c)) = chars.next() {
			if c.is_alphanumeric() {
				word_start.get_or_insert(i);
				continue;
			}

			let joins_word = matches!(c, '\'' | '-')
				&& word_start.is_some()
				&& chars.peek().is_some_and(|(_, next)| next.is_alphanumeric());
			if joins_word {
				continue;
			}

			if let Some(start) = word_start.take() {
				tokens.push(&text[start..i]);
			}
			if !c.is_whitespace() {
				tokens.push(&text[i..i + c.len_utf8()]);
			}
		}

		if let Some(start) = word_start {
			tokens.push(&text[start..]);
		}
		tokens
	}
}

/// Recognized-word membership test.
pub trait Lexicon {
	/// Exact, case-sensitive membership.
	fn contains(&self, word: &str) -> bool;

	/// A word is recognized when its title-case or lowercase form is known.
	fn is_recognized(&self, word: &str) -> bool {
		self.contains(&title_case(word)) || self.contains(&word.to_lowercase())
	}
}

impl Lexicon for HashSet<String> {
	fn contains(&self, word: &str) -> bool {
		HashSet::contains(self, word)
	}
}

/// Word list loaded from a plain text file (one word per line).
#[derive(Debug, Default, Clone)]
pub struct WordList {
	words: HashSet<String>,
}

impl WordList {
	/// Loads a word list.
	///
	/// Blank lines and lines starting with `#` are ignored. Case is preserved,
	/// proper nouns are expected in title case.
	pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
		Ok(read_file(path)?
			.iter()
			.map(|line| line.trim())
			.filter(|line| !line.is_empty() && !line.starts_with('#'))
			.collect())
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

impl<S: Into<String>> FromIterator<S> for WordList {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self { words: iter.into_iter().map(Into::into).collect() }
	}
}

impl Lexicon for WordList {
	fn contains(&self, word: &str) -> bool {
		self.words.contains(word)
	}
}

/// Uppercases every letter that follows a non-letter, lowercases the others.
///
/// `"paris"` → `"Paris"`, `"WELL-KNOWN"` → `"Well-Known"`, `"o'neil"` → `"O'Neil"`
fn title_case(word: &str) -> String {
	let mut title = String::with_capacity(word.len());
	let mut after_letter = false;
	for c in word.chars() {
		if after_letter {
			title.extend(c.to_lowercase());
		} else {
			title.extend(c.to_uppercase());
		}
		after_letter = c.is_alphabetic();
	}
	title
}
