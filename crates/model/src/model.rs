//! Opened model: parsed header and vocabulary plus lazily read rows.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ModelError, Result};
use crate::hash::BucketHasher;
use crate::header::{self, Header, Vocabulary};
use crate::query::QueryLine;
use crate::store::VectorStore;
use crate::subword::{self, Subwords};

/// Averaged vector for one query, with the bookkeeping needed for
/// diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Representation {
	/// Mean of every contributing row, or all zeros.
	pub vector: Vec<f64>,
	/// Rows that went into the mean.
	pub contributions: usize,
	/// Whether the word itself had a vocabulary row.
	pub in_vocabulary: bool,
}

impl Representation {
	/// Whether anything at all was found for the query.
	pub const fn is_resolved(&self) -> bool {
		self.contributions > 0
	}
}

/// A read-only model file.
///
/// The header and vocabulary are parsed on open; matrix rows are read on
/// demand, so memory use does not grow with the matrix. The file handle is
/// released when the model is dropped.
#[derive(Debug)]
pub struct Model {
	header: Header,
	vocab: Vocabulary,
	matrix_offset: u64,
	hasher: Option<BucketHasher>,
	store: VectorStore,
}

impl Model {
	/// Opens and parses the model at `path`.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let file = File::open(path).map_err(|error| ModelError::Open {
			path: path.to_path_buf(),
			error,
		})?;
		let model = Self::from_file(file)?;
		info!(
			path = %path.display(),
			vocab_size = model.header.vocab_size,
			buckets = model.header.bucket_count(),
			dim = model.header.dim,
			minn = model.header.minn,
			maxn = model.header.maxn,
			"opened model"
		);
		Ok(model)
	}

	/// Parses a model from an already open file positioned at its start.
	pub fn from_file(file: File) -> Result<Self> {
		let parsed = header::parse(BufReader::new(&file))?;
		let header = parsed.header;

		let expected = header
			.matrix_bytes()
			.and_then(|bytes| parsed.matrix_offset.checked_add(bytes))
			.ok_or_else(|| ModelError::InvalidHeader("matrix extends past the largest file offset".into()))?;
		let actual = file.metadata()?.len();
		if actual < expected {
			return Err(ModelError::Truncated { expected, actual });
		}

		let hasher = BucketHasher::for_header(&header);
		if hasher.is_none() {
			debug!("model has no subword buckets, subword lookups are skipped");
		}

		Ok(Self {
			store: VectorStore::new(file, parsed.matrix_offset, header.dim as usize, header.total_rows),
			header,
			vocab: parsed.vocab,
			matrix_offset: parsed.matrix_offset,
			hasher,
		})
	}

	/// Header fields.
	pub const fn header(&self) -> &Header {
		&self.header
	}

	/// Vocabulary table.
	pub const fn vocabulary(&self) -> &Vocabulary {
		&self.vocab
	}

	/// Embedding dimension.
	pub const fn dim(&self) -> usize {
		self.header.dim as usize
	}

	/// Byte offset of the first matrix row.
	pub const fn matrix_offset(&self) -> u64 {
		self.matrix_offset
	}

	/// Reads matrix row `index`.
	///
	/// # Panics
	///
	/// Panics if `index` is not below the header's total row count.
	pub fn row(&self, index: u32) -> Result<Vec<f64>> {
		Ok(self.store.row(index)?)
	}

	/// Matrix row used for `subword`, or `None` when the model has no buckets.
	pub fn bucket_index(&self, subword: &str) -> Option<u32> {
		self.hasher.map(|h| h.row_index(subword))
	}

	/// Subwords inferred for `word` under this model's `minn`/`maxn`.
	pub fn subwords(&self, word: &str) -> Vec<String> {
		subword::extract(word, self.header.minn as usize, self.header.maxn as usize)
	}

	/// Vector for `word`, inferring subwords when the model enables them.
	pub fn represent(&self, word: &str) -> Result<Vec<f64>> {
		Ok(self.compute(word, None::<std::iter::Empty<&str>>)?.vector)
	}

	/// Vector for `word` using exactly `subwords`, even when empty.
	pub fn represent_with<S: AsRef<str>>(&self, word: &str, subwords: &[S]) -> Result<Vec<f64>> {
		Ok(self.compute(word, Some(subwords.iter().map(|s| s.as_ref())))?.vector)
	}

	/// Full representation for a parsed query line.
	pub fn represent_query(&self, query: &QueryLine) -> Result<Representation> {
		match &query.subwords {
			Some(subwords) => self.compute(&query.word, Some(subwords.iter().map(String::as_str))),
			None => self.compute(&query.word, None::<std::iter::Empty<&str>>),
		}
	}

	/// Representations for `queries`, in input order.
	///
	/// Rows are read in parallel when the `parallel` feature is enabled.
	pub fn represent_batch(&self, queries: &[QueryLine]) -> Result<Vec<Representation>> {
		#[cfg(all(feature = "parallel", any(unix, windows)))]
		let results = {
			use rayon::prelude::*;
			queries.par_iter().map(|q| self.represent_query(q)).collect()
		};
		#[cfg(not(all(feature = "parallel", any(unix, windows))))]
		let results = queries.iter().map(|q| self.represent_query(q)).collect();
		results
	}

	fn compute<'s, I>(&self, word: &str, explicit: Option<I>) -> Result<Representation>
	where
		I: IntoIterator<Item = &'s str>,
	{
		let mut vector = vec![0.0; self.dim()];
		let mut contributions = 0usize;

		let in_vocabulary = match self.vocab.index_of(word) {
			Some(index) => {
				self.store.add_row_to(index, &mut vector)?;
				contributions += 1;
				true
			}
			None => false,
		};

		match explicit {
			Some(subwords) => {
				for sw in subwords {
					contributions += self.add_subword(sw, &mut vector)?;
				}
			}
			None if self.header.subwords_enabled() => {
				let wrapped = subword::wrap(word);
				for sw in Subwords::new(&wrapped, self.header.minn as usize, self.header.maxn as usize) {
					contributions += self.add_subword(sw, &mut vector)?;
				}
			}
			None => {}
		}

		if contributions > 0 {
			let n = contributions as f64;
			vector.iter_mut().for_each(|v| *v /= n);
		}

		Ok(Representation {
			vector,
			contributions,
			in_vocabulary,
		})
	}

	fn add_subword(&self, subword: &str, acc: &mut [f64]) -> Result<usize> {
		let Some(hasher) = self.hasher else {
			return Ok(0);
		};
		self.store.add_row_to(hasher.row_index(subword), acc)?;
		Ok(1)
	}
}
