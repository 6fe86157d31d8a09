//! The `count dim` / `word v1 ... vdim` text format.

use std::io::{self, BufRead, Write};

use crate::error::{Result, VectorsError};

/// First line of a vector file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorFileHeader {
	/// Number of vectors the file declares.
	pub count: usize,
	/// Values per vector.
	pub dim: usize,
}

impl VectorFileHeader {
	/// Parses `count dim`.
	pub fn parse(line: &str) -> Result<Self> {
		let malformed = || VectorsError::MalformedHeader {
			line: 1,
			content: line.trim_end().to_owned(),
		};
		let mut fields = line.split_whitespace();
		let count = fields.next().and_then(|f| f.parse().ok()).ok_or_else(malformed)?;
		let dim = fields.next().and_then(|f| f.parse().ok()).ok_or_else(malformed)?;
		if fields.next().is_some() {
			return Err(malformed());
		}
		Ok(Self { count, dim })
	}
}

/// Reader over a vector file: the header, then one `(word, vector)` per
/// non-blank line.
#[derive(Debug)]
pub struct VectorReader<R> {
	reader: R,
	header: VectorFileHeader,
	line: usize,
	buf: String,
}

impl<R: BufRead> VectorReader<R> {
	/// Reads the header line.
	pub fn new(mut reader: R) -> Result<Self> {
		let mut buf = String::new();
		reader.read_line(&mut buf)?;
		let header = VectorFileHeader::parse(&buf)?;
		Ok(Self {
			reader,
			header,
			line: 1,
			buf,
		})
	}

	/// The parsed header.
	pub const fn header(&self) -> VectorFileHeader {
		self.header
	}
}

impl<R: BufRead> Iterator for VectorReader<R> {
	type Item = Result<(String, Vec<f64>)>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			self.buf.clear();
			match self.reader.read_line(&mut self.buf) {
				Ok(0) => return None,
				Ok(_) => {}
				Err(e) => return Some(Err(e.into())),
			}
			self.line += 1;
			if self.buf.trim().is_empty() {
				continue;
			}
			return Some(parse_row(&self.buf, self.header.dim, self.line));
		}
	}
}

/// Parses `word v1 ... vdim`. Values past `dim` are ignored.
pub fn parse_row(line: &str, dim: usize, line_no: usize) -> Result<(String, Vec<f64>)> {
	let mut fields = line.split_whitespace();
	let word = fields.next().ok_or_else(|| VectorsError::MalformedRow {
		line: line_no,
		reason: "empty line".into(),
	})?;

	let mut values = Vec::with_capacity(dim);
	for field in fields.take(dim) {
		let value = field.parse::<f64>().map_err(|e| VectorsError::MalformedRow {
			line: line_no,
			reason: format!("{field:?} is not a number: {e}"),
		})?;
		values.push(value);
	}
	if values.len() < dim {
		return Err(VectorsError::MalformedRow {
			line: line_no,
			reason: format!("expected {dim} values for {word:?}, found {}", values.len()),
		});
	}
	Ok((word.to_owned(), values))
}

/// Writes the `count dim` header line.
pub fn write_header<W: Write>(out: &mut W, header: VectorFileHeader) -> io::Result<()> {
	writeln!(out, "{} {}", header.count, header.dim)
}

/// Writes `word v1 ... vdim` with six decimals per value.
pub fn write_row<W: Write>(out: &mut W, word: &str, values: &[f64]) -> io::Result<()> {
	out.write_all(word.as_bytes())?;
	for value in values {
		write!(out, " {value:.6}")?;
	}
	out.write_all(b"\n")
}
