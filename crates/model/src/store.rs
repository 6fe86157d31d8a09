//! Random-access reads of matrix rows straight from the model file.
//!
//! Rows are fetched with positioned reads, so the store holds no cursor and
//! can serve concurrent callers through a shared reference.

use std::fs::File;
use std::io;

use crate::header::F64_BYTES;

/// Row-major `rows x dim` matrix of little-endian `f64` values in a file.
#[derive(Debug)]
pub struct VectorStore {
	file: File,
	base: u64,
	dim: usize,
	rows: u32,
}

impl VectorStore {
	/// Creates a store for the matrix starting at byte `base` of `file`.
	pub fn new(file: File, base: u64, dim: usize, rows: u32) -> Self {
		Self { file, base, dim, rows }
	}

	/// Number of rows.
	pub const fn rows(&self) -> u32 {
		self.rows
	}

	/// Values per row.
	pub const fn dim(&self) -> usize {
		self.dim
	}

	/// Reads row `index`.
	///
	/// # Panics
	///
	/// Panics if `index` is not below [`Self::rows`].
	pub fn row(&self, index: u32) -> io::Result<Vec<f64>> {
		let mut row = vec![0.0; self.dim];
		self.add_row_to(index, &mut row)?;
		Ok(row)
	}

	/// Adds row `index` element-wise onto `acc`.
	///
	/// # Panics
	///
	/// Panics if `index` is not below [`Self::rows`] or `acc` does not have
	/// [`Self::dim`] elements.
	pub fn add_row_to(&self, index: u32, acc: &mut [f64]) -> io::Result<()> {
		assert!(index < self.rows, "row {index} out of range for matrix with {} rows", self.rows);
		assert_eq!(acc.len(), self.dim, "accumulator length must equal the model dimension");

		let row_bytes = self.dim * F64_BYTES as usize;
		let mut buf = vec![0u8; row_bytes];
		let offset = (row_bytes as u64)
			.checked_mul(u64::from(index))
			.and_then(|rel| self.base.checked_add(rel))
			.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "row offset overflows u64"))?;
		read_exact_at(&self.file, &mut buf, offset)?;

		for (slot, chunk) in acc.iter_mut().zip(buf.chunks_exact(F64_BYTES as usize)) {
			let mut bytes = [0u8; F64_BYTES as usize];
			bytes.copy_from_slice(chunk);
			*slot += f64::from_le_bytes(bytes);
		}
		Ok(())
	}
}

#[cfg(unix)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
	use std::os::unix::fs::FileExt;
	file.read_exact_at(buf, offset)
}

#[cfg(windows)]
fn read_exact_at(file: &File, mut buf: &mut [u8], mut offset: u64) -> io::Result<()> {
	use std::os::windows::fs::FileExt;
	while !buf.is_empty() {
		match file.seek_read(buf, offset) {
			Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
			Ok(n) => {
				let rest = buf;
				buf = &mut rest[n..];
				offset += n as u64;
			}
			Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
			Err(e) => return Err(e),
		}
	}
	Ok(())
}

// Shares the file cursor; callers on these targets read rows sequentially.
#[cfg(not(any(unix, windows)))]
fn read_exact_at(mut file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
	use std::io::{Read, Seek, SeekFrom};
	file.seek(SeekFrom::Start(offset))?;
	file.read_exact(buf)
}
