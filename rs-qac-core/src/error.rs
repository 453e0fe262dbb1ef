use thiserror::Error;

/// Failure to build, save or load a persisted model.
///
/// Loading is all-or-nothing: any of these aborts startup.
#[derive(Error, Debug)]
pub enum ModelError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Encoding error: {0}")]
	Codec(#[from] postcard::Error),

	#[error("Missing model table: {0}")]
	MissingTable(String),

	#[error("Inconsistent model: {0}")]
	Inconsistent(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// A suggestion request rejected before any work is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
	#[error("branches x levels ({branches} x {levels}) exceeds the limit of {ceiling}")]
	TooExpensive {
		branches: usize,
		levels: usize,
		ceiling: usize,
	},
}
