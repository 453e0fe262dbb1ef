use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::io::write_atomic;

/// Version of the on-disk layout; bumped on incompatible changes.
pub const FORMAT_VERSION: u16 = 1;

pub const VOCABULARY_FILE: &str = "vocabulary.bin";
pub const BIGRAMS_FILE: &str = "bigrams.bin";
pub const TRIGRAMS_FILE: &str = "trigrams.bin";
pub const QUADGRAMS_FILE: &str = "quadgrams.bin";

/// Metadata written in front of every table.
///
/// The four tables of a model must carry the same header, so tables from
/// different builds are never mixed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Header {
	pub format_version: u16,
	pub corpus_checksum: u32,
}

impl Header {
	pub fn new(corpus_checksum: u32) -> Self {
		Self { format_version: FORMAT_VERSION, corpus_checksum }
	}
}

#[derive(Serialize)]
struct ArtifactRef<'a, P> {
	header: Header,
	payload: &'a P,
}

#[derive(Deserialize)]
struct Artifact<P> {
	header: Header,
	payload: P,
}

/// Serializes one table with `postcard` and writes it atomically to `dir/name`.
pub(crate) fn write_table<P: Serialize>(dir: &Path, name: &str, header: Header, payload: &P) -> ModelResult<()> {
	let bytes = postcard::to_stdvec(&ArtifactRef { header, payload })?;
	write_atomic(dir.join(name), &bytes)?;
	Ok(())
}

/// Reads one table written by `write_table`.
///
/// # Errors
/// - `MissingTable` if the file does not exist
/// - `Inconsistent` if it was written with another format version
pub(crate) fn read_table<P: DeserializeOwned>(dir: &Path, name: &str) -> ModelResult<(Header, P)> {
	let bytes = match std::fs::read(dir.join(name)) {
		Ok(bytes) => bytes,
		Err(e) if e.kind() == ErrorKind::NotFound => return Err(ModelError::MissingTable(name.to_owned())),
		Err(e) => return Err(e.into()),
	};

	let artifact: Artifact<P> = postcard::from_bytes(&bytes)?;
	if artifact.header.format_version != FORMAT_VERSION {
		return Err(ModelError::Inconsistent(format!(
			"{name} has format version {}, expected {FORMAT_VERSION}",
			artifact.header.format_version
		)));
	}
	Ok((artifact.header, artifact.payload))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn table_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let header = Header::new(42);
		write_table(dir.path(), "numbers.bin", header, &vec![1u32, 2, 3]).unwrap();

		let (read_header, payload): (Header, Vec<u32>) = read_table(dir.path(), "numbers.bin").unwrap();
		assert_eq!(read_header, header);
		assert_eq!(payload, vec![1, 2, 3]);
	}

	#[test]
	fn missing_table_is_reported_by_name() {
		let dir = tempfile::tempdir().unwrap();
		let err = read_table::<Vec<u32>>(dir.path(), BIGRAMS_FILE).unwrap_err();
		assert!(matches!(err, ModelError::MissingTable(name) if name == BIGRAMS_FILE));
	}

	#[test]
	fn other_format_version_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let header = Header { format_version: FORMAT_VERSION + 1, corpus_checksum: 0 };
		write_table(dir.path(), "old.bin", header, &0u8).unwrap();

		let err = read_table::<u8>(dir.path(), "old.bin").unwrap_err();
		assert!(matches!(err, ModelError::Inconsistent(_)));
	}

	#[test]
	fn garbage_is_a_codec_error() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("bad.bin"), [0xff]).unwrap();

		let err = read_table::<String>(dir.path(), "bad.bin").unwrap_err();
		assert!(matches!(err, ModelError::Codec(_)));
	}
}
