//! CLI schema for the lexvec binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lexvec")]
#[command(about = "Query subword embedding models and post-process vector files")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print `word v1 ... vD` for every query line (`word [subword ...]`)
	Embed {
		/// Binary model file
		model: PathBuf,

		/// Read queries from a file instead of stdin
		#[arg(short, long, value_name = "PATH")]
		input: Option<PathBuf>,

		/// Queries represented per parallel batch
		#[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
		batch_size: u32,
	},
	/// Add summed context vectors onto word vectors
	Merge {
		/// Word vector text file
		vectors: PathBuf,

		/// Context vector file (defaults to `<vectors>.context`)
		#[arg(long, value_name = "PATH")]
		context: Option<PathBuf>,

		/// Output file (defaults to `<vectors>.merged`)
		#[arg(short, long, value_name = "PATH")]
		output: Option<PathBuf>,
	},
	/// Shuffle stdin lines to stdout under a memory budget
	Shuffle {
		/// Memory budget in gigabytes (falls back to $MEMORY, then 4)
		#[arg(long, value_name = "GB")]
		memory: Option<f64>,

		/// Seed for a reproducible permutation
		#[arg(long)]
		seed: Option<u64>,
	},
	/// Print a model's header fields
	Inspect {
		/// Binary model file
		model: PathBuf,

		/// Also list the first N vocabulary words
		#[arg(long, value_name = "N", default_value_t = 0)]
		words: usize,
	},
}
