//! Folding separately trained context vectors into word vectors.
//!
//! The context file may carry one vector per `(word, position)` pair, named
//! `word_<position>`; that is signalled by it declaring more vectors than
//! the primary file. Context vectors are summed per word and the sum is
//! added onto the primary vector of the same word.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Result, VectorsError};
use crate::text::{self, VectorReader};

/// Counters describing a finished merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
	/// Vectors written to the output.
	pub primary_rows: usize,
	/// Primary words with no context vector.
	pub primary_unmatched: usize,
	/// Distinct context words, after suffix stripping.
	pub context_words: usize,
	/// Context words with no primary vector.
	pub context_unmatched: usize,
}

/// Input and output locations for [`merge_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePaths {
	/// Word vectors.
	pub vectors: PathBuf,
	/// Context vectors.
	pub context: PathBuf,
	/// Merged output.
	pub output: PathBuf,
}

impl MergePaths {
	/// Uses `<vectors>.context` and `<vectors>.merged` next to `vectors`.
	pub fn beside(vectors: impl Into<PathBuf>) -> Self {
		let vectors = vectors.into();
		Self {
			context: with_suffix(&vectors, ".context"),
			output: with_suffix(&vectors, ".merged"),
			vectors,
		}
	}
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
	let mut name = path.as_os_str().to_owned();
	name.push(suffix);
	PathBuf::from(name)
}

/// Strips a trailing `_<position>` from a context word.
///
/// Returns `None` when the word has no `_`.
pub fn strip_position(word: &str) -> Option<&str> {
	word.rsplit_once('_').map(|(base, _)| base)
}

/// Merges the files named by `paths`.
///
/// The output is staged in a temporary file beside it and only moved into
/// place once the merge succeeds, so a failed merge leaves no output.
pub fn merge_files(paths: &MergePaths) -> Result<MergeStats> {
	let primary = open(&paths.vectors)?;
	let context = open(&paths.context)?;

	let dir = match paths.output.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let staged = NamedTempFile::new_in(dir).map_err(|error| VectorsError::Open {
		path: paths.output.clone(),
		error,
	})?;
	let mut output = BufWriter::new(staged);
	let stats = merge(primary, context, &mut output)?;
	let staged = output.into_inner().map_err(io::IntoInnerError::into_error)?;
	staged.persist(&paths.output).map_err(|e| VectorsError::Open {
		path: paths.output.clone(),
		error: e.error,
	})?;
	Ok(stats)
}

fn open(path: &Path) -> Result<BufReader<File>> {
	File::open(path).map(BufReader::new).map_err(|error| VectorsError::Open {
		path: path.to_path_buf(),
		error,
	})
}

/// Writes `primary` with every vector increased by its word's summed
/// context vectors.
pub fn merge<P: BufRead, C: BufRead, W: Write>(primary: P, context: C, out: &mut W) -> Result<MergeStats> {
	let primary = VectorReader::new(primary)?;
	let context = VectorReader::new(context)?;
	let (primary_header, context_header) = (primary.header(), context.header());
	if primary_header.dim != context_header.dim {
		return Err(VectorsError::DimensionMismatch {
			primary: primary_header.dim,
			context: context_header.dim,
		});
	}

	let positional = context_header.count > primary_header.count;
	debug!(positional, context_count = context_header.count, "aggregating context vectors");
	let mut sums = aggregate(context, positional)?;

	let mut stats = MergeStats {
		context_words: sums.len(),
		..MergeStats::default()
	};
	text::write_header(out, primary_header)?;
	for row in primary {
		let (word, mut values) = row?;
		match sums.get_mut(&word) {
			Some(entry) => {
				values.iter_mut().zip(&entry.sum).for_each(|(v, c)| *v += c);
				entry.matched = true;
			}
			None => stats.primary_unmatched += 1,
		}
		text::write_row(out, &word, &values)?;
		stats.primary_rows += 1;
	}
	stats.context_unmatched = sums.values().filter(|entry| !entry.matched).count();

	Ok(stats)
}

#[derive(Debug)]
struct ContextSum {
	sum: Vec<f64>,
	matched: bool,
}

fn aggregate<C: BufRead>(context: VectorReader<C>, positional: bool) -> Result<FxHashMap<String, ContextSum>> {
	let mut sums: FxHashMap<String, ContextSum> = FxHashMap::default();
	let mut unsuffixed = 0usize;

	for row in context {
		let (mut word, values) = row?;
		if positional {
			match strip_position(&word).map(str::len) {
				Some(len) => word.truncate(len),
				None => unsuffixed += 1,
			}
		}
		match sums.get_mut(&word) {
			Some(entry) => entry.sum.iter_mut().zip(&values).for_each(|(s, v)| *s += v),
			None => {
				sums.insert(
					word,
					ContextSum {
						sum: values,
						matched: false,
					},
				);
			}
		}
	}

	if unsuffixed > 0 {
		warn!(count = unsuffixed, "context words without a position suffix were kept as-is");
	}
	Ok(sums)
}
