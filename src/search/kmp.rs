use crate::types::{Pattern, Symbol};

/// Longest proper prefix of `pattern` that is also a suffix of
/// `pattern[..=i]`, for every `i`. `lps[0]` is always 0.
#[must_use]
pub fn lps_table<S: Symbol>(pattern: &Pattern<'_, S>) -> Vec<usize> {
    let p = pattern.as_slice();
    let mut lps = vec![0; p.len()];
    let mut length = 0;
    let mut i = 1;

    while i < p.len() {
        if p[i] == p[length] {
            length += 1;
            lps[i] = length;
            i += 1;
        } else if length != 0 {
            length = lps[length - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }
    lps
}

/// First occurrence of `pattern` in `text`. Never moves backwards in `text`.
#[must_use]
pub fn find<S: Symbol>(text: &[S], pattern: &Pattern<'_, S>) -> Option<usize> {
    let p = pattern.as_slice();
    let m = p.len();
    if m > text.len() {
        return None;
    }

    let lps = lps_table(pattern);
    let (mut i, mut j) = (0, 0);

    while i < text.len() {
        if text[i] == p[j] {
            i += 1;
            j += 1;
            if j == m {
                return Some(i - j);
            }
        } else if j != 0 {
            j = lps[j - 1];
        } else {
            i += 1;
        }
    }
    None
}
