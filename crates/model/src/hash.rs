//! Subword hashing into the fixed bucket space that follows the vocabulary rows.
//!
//! The hash is 32-bit FNV-1: every byte first multiplies the state by the
//! FNV prime and then xors the byte in. Models are produced with exactly this
//! order, so swapping it for FNV-1a would silently move every subword to a
//! different bucket.

use std::num::NonZeroU32;

use crate::header::Header;

/// Initial hash state.
pub const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// Multiplier applied before each byte is mixed in.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Hashes `bytes` with wrapping unsigned 32-bit arithmetic.
#[inline]
pub fn hash(bytes: &[u8]) -> u32 {
	bytes
		.iter()
		.fold(FNV_OFFSET_BASIS, |h, &b| h.wrapping_mul(FNV_PRIME) ^ u32::from(b))
}

/// Maps subwords to matrix rows in `[vocab_size, vocab_size + bucket_count)`.
///
/// Distinct subwords may share a bucket; the model was trained with that
/// aliasing, so lookups never probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketHasher {
	vocab_size: u32,
	bucket_count: NonZeroU32,
}

impl BucketHasher {
	/// Creates a hasher, or `None` when there are no buckets to hash into.
	pub fn new(vocab_size: u32, bucket_count: u32) -> Option<Self> {
		let bucket_count = NonZeroU32::new(bucket_count)?;
		vocab_size.checked_add(bucket_count.get())?;
		Some(Self { vocab_size, bucket_count })
	}

	/// Creates the hasher described by a parsed header.
	pub fn for_header(header: &Header) -> Option<Self> {
		Self::new(header.vocab_size, header.bucket_count())
	}

	/// Number of hashed buckets.
	pub const fn bucket_count(&self) -> u32 {
		self.bucket_count.get()
	}

	/// Bucket slot of `subword`, relative to the first bucket row.
	#[inline]
	pub fn bucket(&self, subword: &str) -> u32 {
		hash(subword.as_bytes()) % self.bucket_count
	}

	/// Absolute matrix row of `subword`.
	#[inline]
	pub fn row_index(&self, subword: &str) -> u32 {
		self.vocab_size + self.bucket(subword)
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(b"", 0x811c_9dc5)]
	#[case(b"a", 0x050c_5d7e)]
	#[case(b"foobar", 0x31f0_b262)]
	#[case(b"<ab>", 0x041b_9b00)]
	#[case("<\u{e9}".as_bytes(), 0xa3bc_1187)]
	fn known_vectors(#[case] input: &[u8], #[case] expected: u32) {
		assert_eq!(hash(input), expected);
	}

	#[test]
	fn multiply_happens_before_xor() {
		let fnv1a = (FNV_OFFSET_BASIS ^ u32::from(b'a')).wrapping_mul(FNV_PRIME);
		assert_ne!(hash(b"a"), fnv1a);
		assert_eq!(hash(b"a"), FNV_OFFSET_BASIS.wrapping_mul(FNV_PRIME) ^ u32::from(b'a'));
	}

	#[test]
	fn no_buckets_means_no_hasher() {
		assert!(BucketHasher::new(10, 0).is_none());
		assert!(BucketHasher::new(u32::MAX, 1).is_none());
	}

	#[test]
	fn row_index_offsets_by_vocab() {
		let hasher = BucketHasher::new(2, 3).expect("non-empty bucket space");
		assert_eq!(hasher.bucket("<ab>"), 0x041b_9b00 % 3);
		assert_eq!(hasher.row_index("<ab>"), 2 + 0x041b_9b00 % 3);
	}

	proptest! {
		#[test]
		fn hash_is_pure(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
			prop_assert_eq!(hash(&bytes), hash(&bytes));
		}

		#[test]
		fn row_index_stays_in_bucket_space(
			subword in "\\PC{0,16}",
			vocab_size in 0u32..1_000_000,
			bucket_count in 1u32..2_000_000,
		) {
			let hasher = BucketHasher::new(vocab_size, bucket_count).expect("non-empty bucket space");
			let row = hasher.row_index(&subword);
			prop_assert!(row >= vocab_size);
			prop_assert!(row < vocab_size + bucket_count);
		}
	}
}
