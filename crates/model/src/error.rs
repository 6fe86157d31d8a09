//! Error types for opening and reading binary models.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or querying a model.
#[derive(Debug, Error)]
pub enum ModelError {
	/// The model file could not be opened.
	#[error("failed to open model {path}: {error}")]
	Open {
		/// Path that failed to open.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Reading the header, vocabulary, or a matrix row failed.
	#[error("I/O error reading model: {0}")]
	Io(#[from] std::io::Error),

	/// The leading magic number does not identify a model file.
	#[error("bad magic number {found:#010x}, expected {expected:#010x}")]
	BadMagic {
		/// Magic number read from the file.
		found: u32,
		/// Magic number this reader understands.
		expected: u32,
	},

	/// The file was written by an incompatible format version.
	#[error("unsupported model version {found}, expected {expected}")]
	UnsupportedVersion {
		/// Version read from the file.
		found: u32,
		/// Version this reader understands.
		expected: u32,
	},

	/// Header fields violate the format's invariants.
	#[error("invalid model header: {0}")]
	InvalidHeader(String),

	/// A vocabulary entry is not valid UTF-8.
	#[error("vocabulary entry {index} is not valid UTF-8")]
	InvalidUtf8 {
		/// Zero-based position of the entry in the vocabulary table.
		index: u32,
	},

	/// The file ends before the last matrix row.
	#[error("model file is truncated: expected at least {expected} bytes, found {actual}")]
	Truncated {
		/// Length implied by the header.
		expected: u64,
		/// Actual file length.
		actual: u64,
	},
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
