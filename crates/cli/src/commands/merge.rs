use std::path::PathBuf;

use anyhow::Context;
use lexvec_vectors::{MergePaths, MergeStats};
use tracing::{info, warn};

/// Merges `vectors` with its context file, resolving default paths.
pub fn merge(vectors: PathBuf, context: Option<PathBuf>, output: Option<PathBuf>) -> anyhow::Result<MergeStats> {
	let mut paths = MergePaths::beside(vectors);
	if let Some(context) = context {
		paths.context = context;
	}
	if let Some(output) = output {
		paths.output = output;
	}

	let stats = lexvec_vectors::merge_files(&paths)
		.with_context(|| format!("failed to merge {} with {}", paths.vectors.display(), paths.context.display()))?;

	if stats.primary_unmatched > 0 {
		warn!(count = stats.primary_unmatched, "failed to find matching context vectors");
	}
	info!(
		output = %paths.output.display(),
		rows = stats.primary_rows,
		context_unmatched = stats.context_unmatched,
		"merged vectors"
	);
	Ok(stats)
}
