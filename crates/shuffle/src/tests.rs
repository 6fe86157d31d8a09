use std::io::Cursor;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn run(input: &str, memory_bytes: usize, seed: u64) -> (String, ShuffleStats) {
	let mut out = Vec::new();
	let config = ShuffleConfig { memory_bytes };
	let stats = shuffle(Cursor::new(input), &mut out, &config, &mut StdRng::seed_from_u64(seed)).expect("shuffle should succeed");
	(String::from_utf8(out).expect("output is UTF-8"), stats)
}

fn sorted_lines(text: &str) -> Vec<&str> {
	let mut lines: Vec<&str> = text.lines().collect();
	lines.sort_unstable();
	lines
}

#[test]
fn empty_input_gives_empty_output() {
	let (out, stats) = run("", 1024, 1);
	assert!(out.is_empty());
	assert_eq!(stats, ShuffleStats::default());
}

#[test]
fn final_line_gains_newline() {
	let (out, stats) = run("a\nb\nc", 1024, 7);
	assert_eq!(stats.lines, 3);
	assert_eq!(sorted_lines(&out), ["a", "b", "c"]);
	assert!(out.ends_with('\n'));
	assert_eq!(out.len(), 6);
}

#[test]
fn small_budget_spills_to_disk() {
	let input: String = (0..500).map(|i| format!("line {i}\n")).collect();
	let (out, stats) = run(&input, 64, 3);
	assert!(stats.spills > 1);
	assert_eq!(sorted_lines(&out), sorted_lines(&input));
}

#[test]
fn same_seed_same_permutation() {
	let input: String = (0..200).map(|i| format!("{i}\n")).collect();
	assert_eq!(run(&input, 100, 42).0, run(&input, 100, 42).0);
}

#[test]
fn actually_reorders() {
	let input: String = (0..200).map(|i| format!("{i}\n")).collect();
	assert_ne!(run(&input, 1 << 20, 9).0, input);
}

#[test]
fn rejects_nonpositive_budget() {
	assert!(matches!(ShuffleConfig::from_gigabytes(0.0), Err(ShuffleError::InvalidMemory(_))));
	assert!(matches!(ShuffleConfig::from_gigabytes(f64::NAN), Err(ShuffleError::InvalidMemory(_))));
	assert_eq!(ShuffleConfig::from_gigabytes(8.0).expect("valid budget").memory_bytes, 1 << 30);
	assert_eq!(ShuffleConfig::default().memory_bytes, 1 << 29);
}

proptest! {
	#[test]
	fn preserves_every_line(lines in proptest::collection::vec("[a-z0-9 ]{0,12}", 0..80), memory in 1usize..256, seed in any::<u64>()) {
		let input: String = lines.iter().map(|l| format!("{l}\n")).collect();
		let (out, stats) = run(&input, memory, seed);
		prop_assert_eq!(stats.lines, lines.len());
		prop_assert_eq!(sorted_lines(&out), sorted_lines(&input));
	}
}
