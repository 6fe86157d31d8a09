use std::io::{BufRead, Write};

use anyhow::Context;
use lexvec_model::{Model, QueryLine};
use tracing::{debug, info};

const PROGRESS_EVERY: usize = 1000;

/// Tuning for [`embed`].
#[derive(Debug, Clone, Copy)]
pub struct EmbedOptions {
	/// Queries represented together; batches run in parallel.
	pub batch_size: usize,
}

impl Default for EmbedOptions {
	fn default() -> Self {
		Self { batch_size: 1024 }
	}
}

/// Counters describing a finished embed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedStats {
	/// Vectors written.
	pub queries: usize,
	/// Queries with neither a vocabulary row nor any subword row.
	pub unresolved: usize,
}

/// Reads query lines from `input` and writes one vector line per query.
pub fn embed<R: BufRead, W: Write>(model: &Model, input: R, out: &mut W, options: EmbedOptions) -> anyhow::Result<EmbedStats> {
	let batch_size = options.batch_size.max(1);
	let mut stats = EmbedStats::default();
	let mut batch = Vec::with_capacity(batch_size);
	let mut lines = input.lines();

	loop {
		batch.clear();
		for line in lines.by_ref() {
			let line = line.context("failed to read query line")?;
			if let Some(query) = QueryLine::parse(&line) {
				batch.push(query);
				if batch.len() == batch_size {
					break;
				}
			}
		}
		if batch.is_empty() {
			break;
		}

		let before = stats.queries;
		write_batch(model, &batch, out, &mut stats)?;
		if stats.queries / PROGRESS_EVERY > before / PROGRESS_EVERY {
			debug!(processed = stats.queries, "embedding progress");
		}
	}

	out.flush().context("failed to flush vectors")?;
	info!(queries = stats.queries, unresolved = stats.unresolved, "finished embedding");
	Ok(stats)
}

fn write_batch<W: Write>(model: &Model, batch: &[QueryLine], out: &mut W, stats: &mut EmbedStats) -> anyhow::Result<()> {
	let reps = model.represent_batch(batch).context("failed to read model rows")?;
	for (query, rep) in batch.iter().zip(&reps) {
		lexvec_vectors::write_row(out, &query.word, &rep.vector).context("failed to write vector")?;
		stats.queries += 1;
		if !rep.is_resolved() {
			stats.unresolved += 1;
		}
	}
	Ok(())
}
