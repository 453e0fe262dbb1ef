use serde::{Deserialize, Serialize};

use crate::error::RequestError;

pub const DEFAULT_BRANCHES: i64 = 2;
pub const DEFAULT_LEVELS: i64 = 2;
pub const DEFAULT_MAX_WORK: usize = 20;

/// A suggestion request as received from a client.
///
/// `branches` and `levels` are optional and signed: missing values take the
/// defaults, negative values behave like zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SuggestRequest {
	pub query: String,

	#[serde(default)]
	pub branches: Option<i64>,

	#[serde(default)]
	pub levels: Option<i64>,
}

/// Upper bound on the work a single request may ask for.
///
/// The number of suggestions grows as `branches ^ levels`, so the product
/// `branches x levels` is capped.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
	pub max_work: usize,
}

impl Default for Limits {
	fn default() -> Self {
		Self { max_work: DEFAULT_MAX_WORK }
	}
}

impl SuggestRequest {
	pub fn new(query: &str) -> Self {
		Self { query: query.to_owned(), branches: None, levels: None }
	}

	/// Candidates kept per prediction step.
	pub fn branches(&self) -> usize {
		clamp(self.branches.unwrap_or(DEFAULT_BRANCHES))
	}

	/// Number of chained prediction steps.
	pub fn levels(&self) -> usize {
		clamp(self.levels.unwrap_or(DEFAULT_LEVELS))
	}

	/// Rejects requests whose `branches x levels` exceeds `limits.max_work`.
	pub fn validate(&self, limits: &Limits) -> Result<(), RequestError> {
		let (branches, levels) = (self.branches(), self.levels());
		if branches.checked_mul(levels).is_none_or(|work| work > limits.max_work) {
			return Err(RequestError::TooExpensive { branches, levels, ceiling: limits.max_work });
		}
		Ok(())
	}
}

fn clamp(value: i64) -> usize {
	usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}
