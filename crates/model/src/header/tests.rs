use std::io::Cursor;

use super::*;
use crate::fixture::ModelWriter;

fn small_model() -> ModelWriter {
	ModelWriter::new(
		&["the", "cat"],
		vec![vec![1.0, 2.0, 3.0]; 5],
		2,
		3,
	)
}

#[test]
fn round_trips_header_and_vocab() {
	let writer = small_model();
	let parsed = parse(Cursor::new(writer.to_bytes())).expect("header should parse");

	assert_eq!(
		parsed.header,
		Header {
			vocab_size: 2,
			total_rows: 5,
			dim: 3,
			minn: 2,
			maxn: 3,
		}
	);
	assert_eq!(parsed.header.bucket_count(), 3);
	assert_eq!(parsed.vocab.index_of("the"), Some(0));
	assert_eq!(parsed.vocab.index_of("cat"), Some(1));
	assert_eq!(parsed.vocab.word(1), Some("cat"));
	assert_eq!(parsed.vocab.index_of("dog"), None);
}

#[test]
fn matrix_offset_follows_vocab() {
	let parsed = parse(Cursor::new(small_model().to_bytes())).expect("header should parse");
	assert_eq!(parsed.matrix_offset, HEADER_SIZE + (4 + 3) + (4 + 3));
}

#[test]
fn stops_before_matrix() {
	let bytes = small_model().to_bytes();
	let mut cursor = Cursor::new(bytes);
	let parsed = parse(&mut cursor).expect("header should parse");
	assert_eq!(cursor.position(), parsed.matrix_offset);
}

#[test]
fn rejects_bad_magic() {
	let mut writer = small_model();
	writer.magic = 0xdead_beef;
	let err = parse(Cursor::new(writer.to_bytes())).expect_err("magic should be rejected");
	assert!(matches!(err, ModelError::BadMagic { found: 0xdead_beef, .. }), "got: {err}");
}

#[test]
fn rejects_bad_magic_before_reading_more() {
	let err = parse(Cursor::new(b"GIF89a".to_vec())).expect_err("short foreign file should be rejected");
	assert!(matches!(err, ModelError::BadMagic { .. }), "got: {err}");
}

#[test]
fn rejects_unsupported_version() {
	let mut writer = small_model();
	writer.version = 2;
	let err = parse(Cursor::new(writer.to_bytes())).expect_err("version should be rejected");
	assert!(matches!(err, ModelError::UnsupportedVersion { found: 2, expected: 1 }), "got: {err}");
}

#[test]
fn rejects_fewer_rows_than_vocab() {
	let mut writer = small_model();
	writer.header.total_rows = 1;
	let err = parse(Cursor::new(writer.to_bytes())).expect_err("row count should be rejected");
	assert!(matches!(err, ModelError::InvalidHeader(_)), "got: {err}");
}

#[test]
fn rejects_zero_dim() {
	let mut writer = small_model();
	writer.header.dim = 0;
	let err = parse(Cursor::new(writer.to_bytes())).expect_err("zero dim should be rejected");
	assert!(matches!(err, ModelError::InvalidHeader(_)), "got: {err}");
}

#[test]
fn rejects_inverted_subword_range() {
	let mut writer = small_model();
	writer.header.minn = 4;
	let err = parse(Cursor::new(writer.to_bytes())).expect_err("minn > maxn should be rejected");
	assert!(matches!(err, ModelError::InvalidHeader(_)), "got: {err}");
}

#[test]
fn truncated_vocab_is_io_error() {
	let bytes = small_model().to_bytes();
	let cut = (HEADER_SIZE + 4 + 1) as usize;
	let err = parse(Cursor::new(bytes[..cut].to_vec())).expect_err("truncated vocab should fail");
	assert!(matches!(err, ModelError::Io(_)), "got: {err}");
}

#[test]
fn rejects_non_utf8_words() {
	let mut bytes = small_model().to_bytes();
	bytes[HEADER_SIZE as usize + 4] = 0xff;
	let err = parse(Cursor::new(bytes)).expect_err("invalid UTF-8 should fail");
	assert!(matches!(err, ModelError::InvalidUtf8 { index: 0 }), "got: {err}");
}

#[test]
fn duplicate_words_resolve_to_later_row() {
	let writer = ModelWriter::new(&["a", "b", "a"], vec![vec![0.0]; 4], 0, 0);
	let parsed = parse(Cursor::new(writer.to_bytes())).expect("header should parse");
	assert_eq!(parsed.vocab.index_of("a"), Some(2));
	assert_eq!(parsed.vocab.word(0), Some("a"));
	assert_eq!(parsed.vocab.len(), 3);
	assert_eq!(parsed.vocab.duplicates(), 1);
}

#[test]
fn empty_vocab_is_valid() {
	let writer = ModelWriter::new(&[], vec![vec![0.5, 0.5]; 2], 3, 6);
	let parsed = parse(Cursor::new(writer.to_bytes())).expect("header should parse");
	assert!(parsed.vocab.is_empty());
	assert_eq!(parsed.header.bucket_count(), 2);
	assert_eq!(parsed.matrix_offset, HEADER_SIZE);
}

#[test]
fn matrix_size_overflow_is_invalid_header() {
	let mut writer = small_model();
	writer.header.dim = u32::MAX;
	writer.header.total_rows = u32::MAX;
	let err = parse(Cursor::new(writer.to_bytes())).expect_err("overflowing matrix size should be rejected");
	assert!(matches!(err, ModelError::InvalidHeader(_)), "got: {err}");
}
