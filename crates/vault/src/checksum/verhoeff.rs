//! Verhoeff checksum over the dihedral group D5.
//!
//! The three tables are fixed constants: changing any entry changes which
//! identifiers validate.

use super::IDENTIFIER_LEN;

/// Multiplication table of D5.
const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Position-dependent permutation, applied with period 8.
const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Multiplicative inverse of each element of D5.
const INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Fold `digits` right-to-left, treating the rightmost digit as position
/// `offset`.
fn fold(digits: &[u8], offset: usize) -> u8 {
    digits
        .iter()
        .rev()
        .enumerate()
        .fold(0u8, |c, (i, &d)| {
            D[c as usize][P[(i + offset) % 8][d as usize] as usize]
        })
}

/// Parse exactly `len` ASCII digits into their numeric values.
fn digits_of(text: &str, len: usize) -> Option<Vec<u8>> {
    let bytes = text.as_bytes();
    if bytes.len() != len || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(bytes.iter().map(|b| b - b'0').collect())
}

/// Returns `true` iff `identifier` is exactly 12 ASCII digits and its
/// Verhoeff check value is zero.
///
/// Never panics; any other shape (signs, separators, whitespace, wrong
/// length) is simply invalid.
pub fn is_valid(identifier: &str) -> bool {
    match digits_of(identifier, IDENTIFIER_LEN) {
        Some(digits) => fold(&digits, 0) == 0,
        None => false,
    }
}

/// Compute the check digit for the first eleven digits of an identifier.
///
/// Returns `None` unless `partial` is exactly 11 ASCII digits. Appending the
/// returned digit yields an identifier for which [`is_valid`] holds.
pub fn check_digit(partial: &str) -> Option<u8> {
    let digits = digits_of(partial, IDENTIFIER_LEN - 1)?;
    Some(INV[fold(&digits, 1) as usize])
}
