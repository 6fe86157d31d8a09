//! `lexvec` command-line tool.

mod cli;
mod commands;
mod logging;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use lexvec_model::Model;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	logging::init(cli.verbose);

	match cli.command {
		Command::Embed { model, input, batch_size } => {
			let model = Model::open(&model).with_context(|| format!("failed to load model {}", model.display()))?;
			let input: Box<dyn BufRead> = match input {
				Some(path) => Box::new(BufReader::new(
					File::open(&path).with_context(|| format!("failed to open {}", path.display()))?,
				)),
				None => Box::new(io::stdin().lock()),
			};
			let mut out = BufWriter::new(io::stdout().lock());
			let options = commands::EmbedOptions {
				batch_size: batch_size as usize,
			};
			commands::embed(&model, input, &mut out, options)?;
		}
		Command::Merge { vectors, context, output } => {
			commands::merge(vectors, context, output)?;
		}
		Command::Shuffle { memory, seed } => {
			let env = std::env::var(commands::MEMORY_ENV).ok();
			let config = commands::memory_budget(memory, env.as_deref())?;
			let mut out = BufWriter::new(io::stdout().lock());
			commands::shuffle(io::stdin().lock(), &mut out, &config, seed)?;
		}
		Command::Inspect { model, words } => {
			let model = Model::open(&model).with_context(|| format!("failed to load model {}", model.display()))?;
			commands::inspect(&model, words, &mut BufWriter::new(io::stdout().lock())).context("failed to write header")?;
		}
	}

	Ok(())
}
