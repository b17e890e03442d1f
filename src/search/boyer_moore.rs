use std::collections::HashMap;

use crate::types::{Pattern, Symbol};

/// Bad-character jump distances for one pattern.
///
/// Every symbol except the final one maps to `m - i - 1` for its last
/// position `i`. The final symbol maps to `m` only when it appears nowhere
/// earlier. Symbols outside the table shift by the full pattern length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftTable<S: Symbol> {
    shifts: HashMap<S, usize>,
    pattern_len: usize,
}

impl<S: Symbol> ShiftTable<S> {
    #[must_use]
    pub fn build(pattern: &Pattern<'_, S>) -> Self {
        let symbols = pattern.as_slice();
        let m = symbols.len();

        let mut shifts: HashMap<S, usize> = symbols[..m - 1]
            .iter()
            .enumerate()
            .map(|(i, &s)| (s, m - i - 1))
            .collect();
        shifts.entry(pattern.last()).or_insert(m);

        Self {
            shifts,
            pattern_len: m,
        }
    }

    /// Jump distance for `symbol`, falling back to the pattern length.
    #[must_use]
    pub fn shift(&self, symbol: S) -> usize {
        self.shifts.get(&symbol).copied().unwrap_or(self.pattern_len)
    }

    /// Raw table entry, without the fallback.
    #[must_use]
    pub fn get(&self, symbol: S) -> Option<usize> {
        self.shifts.get(&symbol).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

/// First occurrence of `pattern` in `text`.
///
/// Windows are compared right to left. On a mismatch the window advances by
/// the shift of the symbol under the window's *last* position, whichever
/// position actually mismatched.
#[must_use]
pub fn find<S: Symbol>(text: &[S], pattern: &Pattern<'_, S>) -> Option<usize> {
    let needle = pattern.as_slice();
    let (n, m) = (text.len(), needle.len());
    if m > n {
        return None;
    }

    let table = ShiftTable::build(pattern);
    let mut i = 0;
    while i <= n - m {
        let window = &text[i..i + m];
        // rposition finds the rightmost mismatch; None means full match
        let mismatch = window
            .iter()
            .zip(needle)
            .rposition(|(t, p)| t != p);
        if mismatch.is_none() {
            return Some(i);
        }
        i += table.shift(window[m - 1]);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(p: &str) -> ShiftTable<char> {
        let chars: Vec<char> = p.chars().collect();
        ShiftTable::build(&Pattern::new(&chars).unwrap())
    }

    fn bm(text: &str, pattern: &str) -> Option<usize> {
        let t: Vec<char> = text.chars().collect();
        let p: Vec<char> = pattern.chars().collect();
        find(&t, &Pattern::new(&p).unwrap())
    }

    #[test]
    fn shift_table_last_occurrence_wins() {
        // "abcab": a@0→4, b@1→3, c@2→2, a@3→1; last symbol b already present
        let t = table("abcab");
        assert_eq!(t.get('a'), Some(1));
        assert_eq!(t.get('b'), Some(3));
        assert_eq!(t.get('c'), Some(2));
        assert_eq!(t.len(), 3);
        assert!(!t.is_empty());
    }

    #[test]
    fn shift_table_final_symbol_inserted_only_when_absent() {
        let t = table("abcd");
        assert_eq!(t.get('d'), Some(4));
        assert_eq!(t.get('a'), Some(3));

        // final 'a' already recorded at position 0, keeps shift 2
        let t = table("aba");
        assert_eq!(t.get('a'), Some(2));
        assert_eq!(t.get('b'), Some(1));
    }

    #[test]
    fn shift_table_single_symbol_pattern() {
        let t = table("x");
        assert_eq!(t.get('x'), Some(1));
        assert_eq!(t.shift('y'), 1);
    }

    #[test]
    fn shift_falls_back_to_pattern_length() {
        let t = table("needle");
        assert_eq!(t.get('z'), None);
        assert_eq!(t.shift('z'), 6);
    }

    #[test]
    fn finds_first_occurrence() {
        assert_eq!(bm("abcxabcdabxabcdabcdabcy", "abcdabcy"), Some(15));
        assert_eq!(bm("aaaaa", "aa"), Some(0));
        assert_eq!(bm("here is a simple example", "example"), Some(17));
    }

    #[test]
    fn not_found_cases() {
        assert_eq!(bm("hello", "world"), None);
        assert_eq!(bm("x", "xx"), None);
        assert_eq!(bm("", "a"), None);
    }

    #[test]
    fn match_at_end_of_text() {
        assert_eq!(bm("abcabd", "abd"), Some(3));
        assert_eq!(bm("same", "same"), Some(0));
    }

    #[test]
    fn works_on_bytes() {
        let p = Pattern::new(b"Tools".as_slice()).unwrap();
        assert_eq!(find(b"Software Tools", &p), Some(9));
    }
}
