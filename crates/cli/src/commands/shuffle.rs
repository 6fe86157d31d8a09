use std::io::{BufRead, Write};

use anyhow::Context;
use lexvec_shuffle::{ShuffleConfig, ShuffleStats};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

/// Environment variable holding the memory budget in gigabytes.
pub const MEMORY_ENV: &str = "MEMORY";

/// Resolves the budget from the flag, then [`MEMORY_ENV`], then the default.
pub fn memory_budget(flag: Option<f64>, env: Option<&str>) -> anyhow::Result<ShuffleConfig> {
	let gigabytes = match (flag, env) {
		(Some(gb), _) => gb,
		(None, Some(raw)) => raw
			.trim()
			.parse()
			.with_context(|| format!("{MEMORY_ENV}={raw:?} is not a number of gigabytes"))?,
		(None, None) => ShuffleConfig::DEFAULT_GIGABYTES,
	};
	Ok(ShuffleConfig::from_gigabytes(gigabytes)?)
}

/// Shuffles `input` into `out`.
pub fn shuffle<R: BufRead, W: Write>(input: R, out: &mut W, config: &ShuffleConfig, seed: Option<u64>) -> anyhow::Result<ShuffleStats> {
	let mut rng = match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};
	let stats = lexvec_shuffle::shuffle(input, out, config, &mut rng).context("shuffle failed")?;
	out.flush().context("failed to flush output")?;
	info!(lines = stats.lines, spills = stats.spills, "finished shuffling");
	Ok(stats)
}
