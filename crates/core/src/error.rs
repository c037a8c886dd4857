//! Error types shared across stages and pipeline execution.

use thiserror::Error;

/// Errors surfaced by stage construction and pipeline runs.
#[derive(Debug, Error)]
pub enum Error {
	/// A stage was configured with invalid or unsupported options.
	#[error("invalid configuration for {stage}: {message}")]
	Configuration { stage: String, message: String },

	/// A structural query or shorthand selector failed to parse or evaluate.
	#[error("query failed in {stage}: {message}")]
	Query { stage: String, message: String },

	/// A stage failed mid-run; carries its position and label for context.
	#[error("stage {index} ({label}) failed: {source}")]
	Stage {
		index: usize,
		label: String,
		#[source]
		source: Box<Error>,
	},
}

pub type Result<T> = std::result::Result<T, Error>;
