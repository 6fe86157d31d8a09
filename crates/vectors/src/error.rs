//! Error types for vector text files.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, merging, or writing vector files.
#[derive(Debug, Error)]
pub enum VectorsError {
	/// A file could not be opened or created.
	#[error("failed to open {path}: {error}")]
	Open {
		/// Path that failed to open.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Reading or writing failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The first line is not `count dim`.
	#[error("malformed header on line {line}: {content:?}")]
	MalformedHeader {
		/// One-based line number.
		line: usize,
		/// The offending line.
		content: String,
	},

	/// A vector line is not `word v1 ... vdim`.
	#[error("malformed vector on line {line}: {reason}")]
	MalformedRow {
		/// One-based line number.
		line: usize,
		/// What was wrong with it.
		reason: String,
	},

	/// The two files being merged disagree on dimension.
	#[error("number of dimensions of word ({primary}) and context ({context}) vectors don't match")]
	DimensionMismatch {
		/// Dimension of the primary file.
		primary: usize,
		/// Dimension of the context file.
		context: usize,
	},
}

/// Result type for vector file operations.
pub type Result<T> = std::result::Result<T, VectorsError>;
