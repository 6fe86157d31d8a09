//! External shuffling of line-oriented corpora under a memory budget.
//!
//! Input is cut into chunks that fit the budget; each chunk is shuffled and
//! spilled to an anonymous temporary file. The spills are then drained in
//! rounds, taking an equal share of lines from each, and every round is
//! shuffled again before it is written out.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

/// Errors produced by [`shuffle`].
#[derive(Debug, Error)]
pub enum ShuffleError {
	/// Reading input, spilling, or writing output failed.
	#[error("I/O error while shuffling: {0}")]
	Io(#[from] io::Error),

	/// The memory budget is not a positive finite number.
	#[error("invalid memory budget: {0} GB")]
	InvalidMemory(f64),
}

/// Result type for shuffling.
pub type Result<T> = std::result::Result<T, ShuffleError>;

/// Memory budget for a shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleConfig {
	/// Bytes of line text held in memory at once.
	pub memory_bytes: usize,
}

impl ShuffleConfig {
	/// Budget used when none is configured, in gigabytes.
	pub const DEFAULT_GIGABYTES: f64 = 4.0;

	/// Budget for roughly `gigabytes` of resident memory.
	///
	/// Per-line overhead makes resident memory about eight times the raw
	/// line bytes, so only an eighth of the figure is used for text.
	pub fn from_gigabytes(gigabytes: f64) -> Result<Self> {
		if !gigabytes.is_finite() || gigabytes <= 0.0 {
			return Err(ShuffleError::InvalidMemory(gigabytes));
		}
		let memory_bytes = (gigabytes / 8.0 * (1u64 << 30) as f64) as usize;
		Ok(Self {
			memory_bytes: memory_bytes.max(1),
		})
	}
}

impl Default for ShuffleConfig {
	fn default() -> Self {
		Self {
			memory_bytes: (Self::DEFAULT_GIGABYTES / 8.0 * (1u64 << 30) as f64) as usize,
		}
	}
}

/// Counters describing a finished shuffle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShuffleStats {
	/// Lines written.
	pub lines: usize,
	/// Bytes of input read.
	pub bytes: usize,
	/// Temporary files used.
	pub spills: usize,
}

/// Writes the lines of `input` to `output` in random order.
///
/// Every output line ends with `\n`, including a final input line that did
/// not.
pub fn shuffle<R, W, G>(mut input: R, output: &mut W, config: &ShuffleConfig, rng: &mut G) -> Result<ShuffleStats>
where
	R: BufRead,
	W: Write,
	G: Rng + ?Sized,
{
	let budget = config.memory_bytes.max(1);
	let mut stats = ShuffleStats::default();
	let mut spills = Vec::new();
	let mut chunk = Vec::new();
	let mut chunk_bytes = 0usize;

	loop {
		let mut line = String::new();
		let read = input.read_line(&mut line)?;
		if read == 0 {
			break;
		}
		if !line.ends_with('\n') {
			line.push('\n');
		}
		stats.bytes += read;
		stats.lines += 1;
		chunk_bytes += line.len();
		chunk.push(line);

		if chunk_bytes >= budget {
			spills.push(spill(&mut chunk, rng)?);
			chunk_bytes = 0;
		}
	}

	if spills.is_empty() {
		chunk.shuffle(rng);
		write_lines(output, &chunk)?;
		return Ok(stats);
	}
	if !chunk.is_empty() {
		spills.push(spill(&mut chunk, rng)?);
	}
	stats.spills = spills.len();
	debug!(lines = stats.lines, spills = stats.spills, "spilled shuffled chunks");

	let avg_line_bytes = (stats.bytes / stats.lines).max(1);
	let mut readers: Vec<BufReader<File>> = spills.into_iter().map(BufReader::new).collect();
	let mut round = Vec::new();
	while !readers.is_empty() {
		let per_file = (budget / avg_line_bytes / readers.len()).max(1);
		let mut exhausted = Vec::new();
		for (i, reader) in readers.iter_mut().enumerate() {
			if read_lines(reader, per_file, &mut round)? == 0 {
				exhausted.push(i);
			}
		}
		round.shuffle(rng);
		write_lines(output, &round)?;
		round.clear();
		for i in exhausted.into_iter().rev() {
			readers.swap_remove(i);
		}
	}

	Ok(stats)
}

/// Shuffles and drains `chunk` into a rewound anonymous temporary file.
fn spill<G: Rng + ?Sized>(chunk: &mut Vec<String>, rng: &mut G) -> io::Result<File> {
	chunk.shuffle(rng);
	let mut writer = BufWriter::new(tempfile::tempfile()?);
	write_lines(&mut writer, chunk)?;
	chunk.clear();
	let mut file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
	file.seek(SeekFrom::Start(0))?;
	Ok(file)
}

fn read_lines<R: BufRead>(reader: &mut R, max: usize, into: &mut Vec<String>) -> io::Result<usize> {
	let mut count = 0;
	while count < max {
		let mut line = String::new();
		if reader.read_line(&mut line)? == 0 {
			break;
		}
		into.push(line);
		count += 1;
	}
	Ok(count)
}

fn write_lines<W: Write + ?Sized>(out: &mut W, lines: &[String]) -> io::Result<()> {
	for line in lines {
		out.write_all(line.as_bytes())?;
	}
	Ok(())
}

#[cfg(test)]
mod tests;
