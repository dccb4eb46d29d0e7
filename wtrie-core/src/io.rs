use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Scan direction for [`alpha_compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Compare from the beginning of the strings.
	FromStart,
	/// Compare from the end of the strings.
	FromEnd,
}

/// Reads a whole text file into a single string buffer.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	Ok(read_file(filename)?.lines().map(str::to_owned).collect())
}

/// Case-insensitive comparison over the alphabetic characters of two
/// strings, scanning from either end.
///
/// Non-alphabetic characters are skipped on both sides. When one side
/// runs out of alphabetic characters the strings compare equal, so this
/// is a sorting aid, not a total order.
pub fn alpha_compare(a: &str, b: &str, direction: Direction) -> Ordering {
	let letters = |s: &str| -> Vec<char> {
		let mut letters: Vec<char> = s
			.chars()
			.filter(|c| c.is_alphabetic())
			.flat_map(char::to_lowercase)
			.collect();
		if direction == Direction::FromEnd {
			letters.reverse();
		}
		letters
	};

	for (x, y) in letters(a).into_iter().zip(letters(b)) {
		match x.cmp(&y) {
			Ordering::Equal => continue,
			other => return other,
		}
	}
	Ordering::Equal
}

/// Sorts lines with [`alpha_compare`].
pub fn sort_lines(lines: &mut [String], direction: Direction) {
	lines.sort_by(|a, b| alpha_compare(a, b, direction));
}
