//! Line-oriented query input.

/// One query: a word and, optionally, the subwords to use instead of the
/// inferred n-grams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLine {
	/// Word to represent.
	pub word: String,
	/// Caller-supplied subwords, used verbatim when present.
	pub subwords: Option<Vec<String>>,
}

impl QueryLine {
	/// Parses `word [subword ...]`, split on whitespace.
	///
	/// Returns `None` for blank lines.
	pub fn parse(line: &str) -> Option<Self> {
		let mut fields = line.split_whitespace();
		let word = fields.next()?.to_owned();
		let rest: Vec<String> = fields.map(str::to_owned).collect();
		Some(Self {
			word,
			subwords: (!rest.is_empty()).then_some(rest),
		})
	}

	/// Query for `word` with inferred subwords.
	pub fn word(word: impl Into<String>) -> Self {
		Self {
			word: word.into(),
			subwords: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_field_infers_subwords() {
		assert_eq!(QueryLine::parse("hello\n"), Some(QueryLine::word("hello")));
	}

	#[test]
	fn extra_fields_are_explicit_subwords() {
		let query = QueryLine::parse("hello  <he\tllo>").expect("non-blank line");
		assert_eq!(query.word, "hello");
		assert_eq!(query.subwords, Some(vec!["<he".to_owned(), "llo>".to_owned()]));
	}

	#[test]
	fn blank_lines_are_skipped() {
		assert_eq!(QueryLine::parse(""), None);
		assert_eq!(QueryLine::parse("   \t"), None);
	}
}
