use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::{fs, io};

use tempfile::NamedTempFile;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads a training corpus, one sentence per line.
///
/// - Surrounding whitespace is trimmed and blank lines are skipped
/// - Duplicate sentences are dropped, the first occurrence keeps its position
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut seen = HashSet::new();
	Ok(read_file(filename)?
		.into_iter()
		.map(|line| line.trim().to_owned())
		.filter(|line| !line.is_empty() && seen.insert(line.clone()))
		.collect())
}

/// Writes `bytes` to `path` atomically.
///
/// The data goes to a temporary file in the destination directory which then
/// replaces `path`, so readers never observe a half-written file.
pub(crate) fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
	let path = path.as_ref();
	let parent = path.parent().unwrap_or_else(|| Path::new("."));
	fs::create_dir_all(parent)?;

	let mut temp_file = NamedTempFile::new_in(parent)?;
	temp_file.write_all(bytes)?;
	temp_file.flush()?;
	temp_file.persist(path).map_err(|e| e.error)?;
	Ok(())
}
