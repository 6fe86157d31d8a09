//! Model file builder for tests.
//!
//! Models are produced by the trainer; this writer exists so tests can
//! create small files with known contents.

use std::io::{self, Write};
use std::path::Path;

use crate::header::{FORMAT_VERSION, Header, MAGIC};

/// In-memory description of a model file.
#[derive(Debug, Clone)]
pub struct ModelWriter {
	/// Header fields written verbatim, even when inconsistent.
	pub header: Header,
	/// Vocabulary entries in row order.
	pub vocab: Vec<String>,
	/// Matrix rows; each must have `header.dim` values.
	pub rows: Vec<Vec<f64>>,
	/// Overrides the magic number.
	pub magic: u32,
	/// Overrides the version.
	pub version: u32,
}

impl ModelWriter {
	/// Creates a consistent model from vocabulary and rows.
	///
	/// Rows past the vocabulary are buckets.
	pub fn new(vocab: &[&str], rows: Vec<Vec<f64>>, minn: u32, maxn: u32) -> Self {
		let dim = rows.first().map_or(1, Vec::len) as u32;
		Self {
			header: Header {
				vocab_size: vocab.len() as u32,
				total_rows: rows.len() as u32,
				dim,
				minn,
				maxn,
			},
			vocab: vocab.iter().map(|w| (*w).to_owned()).collect(),
			rows,
			magic: MAGIC,
			version: FORMAT_VERSION,
		}
	}

	/// Serializes the model.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::new();
		let header = &self.header;
		for value in [
			self.magic,
			self.version,
			header.vocab_size,
			header.total_rows,
			header.dim,
			header.minn,
			header.maxn,
		] {
			out.extend_from_slice(&value.to_le_bytes());
		}
		for word in &self.vocab {
			out.extend_from_slice(&(word.len() as u32).to_le_bytes());
			out.extend_from_slice(word.as_bytes());
		}
		for value in self.rows.iter().flatten() {
			out.extend_from_slice(&value.to_le_bytes());
		}
		out
	}

	/// Writes the model to `path`.
	pub fn write_to(&self, path: &Path) -> io::Result<()> {
		let mut file = std::fs::File::create(path)?;
		file.write_all(&self.to_bytes())?;
		file.sync_all()
	}
}
