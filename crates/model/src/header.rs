//! Binary model header and vocabulary table.
//!
//! Layout, all integers little-endian `u32`:
//!
//! ```text
//! magic  version  vocab_size  total_rows  dim  minn  maxn
//! vocab_size x (len, len bytes of UTF-8)
//! total_rows x dim f64 values, row-major
//! ```

use std::io::Read;

use rustc_hash::FxHashMap;

use crate::error::{ModelError, Result};

/// Magic number identifying a model file.
pub const MAGIC: u32 = 0xbea2_5956;

/// Format version this reader understands.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the fixed-width part of the header in bytes.
pub const HEADER_SIZE: u64 = 7 * U32_BYTES;

const U32_BYTES: u64 = size_of::<u32>() as u64;

/// Size of one matrix element in bytes.
pub const F64_BYTES: u64 = size_of::<f64>() as u64;

/// Fixed-width header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	/// Number of in-vocabulary rows at the top of the matrix.
	pub vocab_size: u32,
	/// Vocabulary rows plus hashed bucket rows.
	pub total_rows: u32,
	/// Embedding dimension.
	pub dim: u32,
	/// Minimum subword length, zero when subwords are disabled.
	pub minn: u32,
	/// Maximum subword length.
	pub maxn: u32,
}

impl Header {
	/// Number of hashed subword buckets following the vocabulary rows.
	pub const fn bucket_count(&self) -> u32 {
		self.total_rows - self.vocab_size
	}

	/// Whether subwords are inferred for queries without explicit subwords.
	pub const fn subwords_enabled(&self) -> bool {
		self.minn > 0
	}

	/// Bytes occupied by a single row.
	pub const fn row_bytes(&self) -> u64 {
		self.dim as u64 * F64_BYTES
	}

	/// Bytes occupied by the whole matrix, or `None` if that overflows `u64`.
	pub const fn matrix_bytes(&self) -> Option<u64> {
		self.row_bytes().checked_mul(self.total_rows as u64)
	}

	fn validate(&self) -> Result<()> {
		if self.total_rows < self.vocab_size {
			return Err(ModelError::InvalidHeader(format!(
				"total rows {} is smaller than vocabulary size {}",
				self.total_rows, self.vocab_size
			)));
		}
		if self.dim == 0 {
			return Err(ModelError::InvalidHeader("dimension is zero".into()));
		}
		if self.matrix_bytes().is_none() {
			return Err(ModelError::InvalidHeader(format!(
				"matrix of {} rows x {} values does not fit in a file",
				self.total_rows, self.dim
			)));
		}
		if self.minn > self.maxn {
			return Err(ModelError::InvalidHeader(format!(
				"minn {} is greater than maxn {}",
				self.minn, self.maxn
			)));
		}
		Ok(())
	}
}

/// Bidirectional mapping between vocabulary words and their row indices.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
	words: Vec<String>,
	index: FxHashMap<String, u32>,
	duplicates: usize,
}

impl Vocabulary {
	/// Appends `word` as the next row. A repeated word is re-pointed at the
	/// new row; the earlier row stays reachable only through [`Self::word`].
	pub fn push(&mut self, word: String) {
		let row = self.words.len() as u32;
		if self.index.insert(word.clone(), row).is_some() {
			self.duplicates += 1;
		}
		self.words.push(word);
	}

	/// Row index of `word`.
	pub fn index_of(&self, word: &str) -> Option<u32> {
		self.index.get(word).copied()
	}

	/// Word stored at row `index`.
	pub fn word(&self, index: u32) -> Option<&str> {
		self.words.get(index as usize).map(String::as_str)
	}

	/// Number of rows in the table, duplicates included.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Number of entries that repeated an earlier word.
	pub fn duplicates(&self) -> usize {
		self.duplicates
	}

	/// Words in row order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
		self.words.iter().map(String::as_str)
	}
}

/// Header, vocabulary, and the offset at which the matrix starts.
#[derive(Debug, Clone)]
pub struct ParsedHeader {
	/// Fixed-width fields.
	pub header: Header,
	/// Vocabulary table in file order.
	pub vocab: Vocabulary,
	/// Byte offset of row 0.
	pub matrix_offset: u64,
}

/// Reads the header and vocabulary from the start of a model stream.
///
/// Consumes exactly the header and vocabulary bytes; the matrix is not read.
pub fn parse<R: Read>(mut reader: R) -> Result<ParsedHeader> {
	let magic = read_u32(&mut reader)?;
	if magic != MAGIC {
		return Err(ModelError::BadMagic { found: magic, expected: MAGIC });
	}
	let version = read_u32(&mut reader)?;
	if version != FORMAT_VERSION {
		return Err(ModelError::UnsupportedVersion {
			found: version,
			expected: FORMAT_VERSION,
		});
	}

	let vocab_size = read_u32(&mut reader)?;
	let total_rows = read_u32(&mut reader)?;
	let dim = read_u32(&mut reader)?;
	let minn = read_u32(&mut reader)?;
	let maxn = read_u32(&mut reader)?;
	let header = Header {
		vocab_size,
		total_rows,
		dim,
		minn,
		maxn,
	};
	header.validate()?;

	let mut vocab = Vocabulary::default();
	let mut offset = HEADER_SIZE;
	for index in 0..vocab_size {
		let len = read_u32(&mut reader)?;
		let mut bytes = Vec::new();
		// `take` bounds the allocation by what the stream actually holds.
		(&mut reader).take(u64::from(len)).read_to_end(&mut bytes)?;
		if bytes.len() as u64 != u64::from(len) {
			return Err(ModelError::Io(std::io::ErrorKind::UnexpectedEof.into()));
		}
		let word = String::from_utf8(bytes).map_err(|_| ModelError::InvalidUtf8 { index })?;
		vocab.push(word);
		offset += U32_BYTES + u64::from(len);
	}

	if vocab.duplicates() > 0 {
		tracing::warn!(duplicates = vocab.duplicates(), "vocabulary contains repeated words, later rows win");
	}

	Ok(ParsedHeader {
		header,
		vocab,
		matrix_offset: offset,
	})
}

fn read_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
	let mut buf = [0u8; U32_BYTES as usize];
	reader.read_exact(&mut buf)?;
	Ok(u32::from_le_bytes(buf))
}

#[cfg(test)]
mod tests;
