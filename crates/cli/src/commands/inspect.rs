use std::io::Write;

use lexvec_model::Model;
use lexvec_model::header::{FORMAT_VERSION, MAGIC};

/// Writes the model's header fields and its first `words` vocabulary entries.
pub fn inspect<W: Write>(model: &Model, words: usize, out: &mut W) -> std::io::Result<()> {
	let header = model.header();
	writeln!(out, "magic          {MAGIC:#010x}")?;
	writeln!(out, "version        {FORMAT_VERSION}")?;
	writeln!(out, "vocab_size     {}", header.vocab_size)?;
	writeln!(out, "total_rows     {}", header.total_rows)?;
	writeln!(out, "buckets        {}", header.bucket_count())?;
	writeln!(out, "dim            {}", header.dim)?;
	writeln!(out, "minn           {}", header.minn)?;
	writeln!(out, "maxn           {}", header.maxn)?;
	writeln!(out, "matrix_offset  {}", model.matrix_offset())?;

	let vocab = model.vocabulary();
	if vocab.duplicates() > 0 {
		writeln!(out, "duplicates     {}", vocab.duplicates())?;
	}
	for (index, word) in vocab.iter().take(words).enumerate() {
		writeln!(out, "{index}\t{word}")?;
	}
	out.flush()
}
