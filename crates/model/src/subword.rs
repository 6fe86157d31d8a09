//! Character n-gram segmentation of bracket-wrapped words.

/// Wraps `word` in the boundary markers used during training.
pub fn wrap(word: &str) -> String {
	let mut wrapped = String::with_capacity(word.len() + 2);
	wrapped.push('<');
	wrapped.push_str(word);
	wrapped.push('>');
	wrapped
}

/// Returns every subword of `"<" + word + ">"` whose length lies in
/// `[minn, maxn]`, grouped by start position and ordered by length.
///
/// Lengths count characters, so multi-byte words never split inside a
/// code point.
///
/// The whole wrapped word is included when it fits the range, which the
/// trainer never emits; for short words this yields a superset of the
/// trainer's subwords and can shift the averaged vector slightly.
pub fn extract(word: &str, minn: usize, maxn: usize) -> Vec<String> {
	let wrapped = wrap(word);
	Subwords::new(&wrapped, minn, maxn).map(str::to_owned).collect()
}

/// Iterator over the n-grams of an already wrapped word.
///
/// Yields slices of the input. A clone continues from the same position
/// without sharing any state with the iterator it came from.
#[derive(Debug, Clone)]
pub struct Subwords<'a> {
	text: &'a str,
	/// Byte offset of every char boundary, including the end of `text`.
	bounds: Vec<usize>,
	minn: usize,
	maxn: usize,
	start: usize,
	len: usize,
}

impl<'a> Subwords<'a> {
	/// Creates the iterator. A `minn` of zero is treated as one.
	pub fn new(text: &'a str, minn: usize, maxn: usize) -> Self {
		let bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
		let minn = minn.max(1);
		Self {
			text,
			bounds,
			minn,
			maxn,
			start: 0,
			len: minn,
		}
	}

	fn char_len(&self) -> usize {
		self.bounds.len() - 1
	}
}

impl<'a> Iterator for Subwords<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<&'a str> {
		let chars = self.char_len();
		while self.start + self.minn <= chars {
			let longest = self.maxn.min(chars - self.start);
			if self.len <= longest {
				let slice = &self.text[self.bounds[self.start]..self.bounds[self.start + self.len]];
				self.len += 1;
				return Some(slice);
			}
			self.start += 1;
			self.len = self.minn;
		}
		None
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn start_then_length_order() {
		assert_eq!(
			extract("ab", 1, 4),
			["<", "<a", "<ab", "<ab>", "a", "ab", "ab>", "b", "b>", ">"]
		);
	}

	#[test]
	fn covers_every_length_in_range() {
		let mut got = extract("ab", 1, 4);
		got.sort_by_key(|s| (s.chars().count(), s.clone()));
		let mut want = ["<", "a", "b", ">", "<a", "ab", "b>", "<ab", "ab>", "<ab>"].map(String::from).to_vec();
		want.sort_by_key(|s| (s.chars().count(), s.clone()));
		assert_eq!(got, want);
	}

	#[test]
	fn whole_wrapped_word_is_included_when_in_range() {
		assert!(extract("ab", 2, 4).iter().any(|s| s == "<ab>"));
		assert!(!extract("ab", 2, 3).iter().any(|s| s == "<ab>"));
	}

	#[test]
	fn too_short_yields_nothing() {
		assert!(extract("ab", 5, 6).is_empty());
		assert!(extract("", 3, 6).is_empty());
	}

	#[test]
	fn empty_word_wraps_to_markers() {
		assert_eq!(extract("", 1, 2), ["<", "<>", ">"]);
	}

	#[test]
	fn trigrams_of_where() {
		assert_eq!(extract("where", 3, 3), ["<wh", "whe", "her", "ere", "re>"]);
	}

	#[test]
	fn multibyte_chars_are_never_split() {
		assert_eq!(extract("é", 2, 2), ["<é", "é>"]);
	}

	#[test]
	fn zero_minn_emits_no_empty_subwords() {
		assert_eq!(extract("a", 0, 1), ["<", "a", ">"]);
	}

	#[test]
	fn iterator_clone_restarts_independently() {
		let wrapped = wrap("abc");
		let mut iter = Subwords::new(&wrapped, 2, 3);
		let fresh = iter.clone();
		iter.next();
		assert_eq!(fresh.count(), iter.count() + 1);
	}

	proptest! {
		#[test]
		fn lengths_stay_in_range(word in "\\PC{0,12}", minn in 1usize..5, extra in 0usize..4) {
			let maxn = minn + extra;
			let wrapped_len = word.chars().count() + 2;
			let subwords = extract(&word, minn, maxn);
			for sw in &subwords {
				let n = sw.chars().count();
				prop_assert!(n >= minn && n <= maxn);
			}
			let expected: usize = (minn..=maxn.min(wrapped_len)).map(|l| wrapped_len + 1 - l).sum();
			prop_assert_eq!(subwords.len(), expected);
		}
	}
}
