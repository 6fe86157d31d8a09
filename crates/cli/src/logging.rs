//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Directory for an additional plain-text log file.
pub const LOG_DIR_ENV: &str = "LEXVEC_LOG_DIR";

/// Installs the global subscriber. Logs go to stderr; stdout carries data.
pub fn init(verbose: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);

	if let Some(log_dir) = std::env::var_os(LOG_DIR_ENV).map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("lexvec.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry()
				.with(filter())
				.with(stderr_layer)
				.with(file_layer)
				.init();

			tracing::debug!(path = %log_path.display(), "file logging initialized");
			return;
		}
	}

	tracing_subscriber::registry().with(filter()).with(stderr_layer).init();
}
