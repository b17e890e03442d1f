use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// How to turn file bytes into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    /// Invalid UTF-8 sequences are dropped, not replaced.
    Lossy,
    /// Invalid UTF-8 is an error.
    #[default]
    Strict,
}

/// A text held fully in memory, pre-split into chars for the matchers.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub name: String,
    pub text: String,
    pub chars: Vec<char>,
    pub line_count: usize,
}

impl Corpus {
    /// Read and decode `path`. The corpus is named after the file stem.
    pub fn load(path: &Path, decoding: Decoding) -> Result<Self, SearchError> {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SearchError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(SearchError::IoError {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        let name = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
        Self::from_bytes(name, path, &bytes, decoding)
    }

    /// Decode already-read bytes. `path` is only used in error messages.
    pub fn from_bytes(
        name: impl Into<String>,
        path: &Path,
        bytes: &[u8],
        decoding: Decoding,
    ) -> Result<Self, SearchError> {
        let text = decode(bytes, decoding).map_err(|offset| SearchError::DecodeError {
            path: path.to_path_buf(),
            offset,
        })?;
        let line_count = line_count(text.as_bytes());
        let chars = text.chars().collect();
        Ok(Self {
            name: name.into(),
            text,
            chars,
            line_count,
        })
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }
}

/// Decode `bytes` as UTF-8. On failure under [`Decoding::Strict`] the error
/// is the byte offset of the first invalid sequence.
pub fn decode(bytes: &[u8], decoding: Decoding) -> Result<String, usize> {
    match decoding {
        Decoding::Strict => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| e.valid_up_to()),
        Decoding::Lossy => Ok(decode_dropping_invalid(bytes)),
    }
}

/// Like `String::from_utf8_lossy`, but invalid sequences vanish instead of
/// becoming U+FFFD. A truncated sequence at the end is dropped too.
fn decode_dropping_invalid(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                // valid_up_to guarantees this prefix is UTF-8
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(skip) => bytes = &rest[skip..],
                    None => return out,
                }
            }
        }
    }
}

/// Lines as an editor counts them: a trailing newline does not open a new line.
fn line_count(buf: &[u8]) -> usize {
    if buf.is_empty() {
        return 0;
    }
    let newlines = memchr::memchr_iter(b'\n', buf).count();
    if buf.ends_with(b"\n") {
        newlines
    } else {
        newlines + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn lossy_drops_invalid_bytes() {
        let bytes = b"Inter\xffnational \xc3\x28Journal";
        let text = decode(bytes, Decoding::Lossy).unwrap();
        assert_eq!(text, "International (Journal");
        assert!(!text.contains('\u{fffd}'));
    }

    #[test]
    fn lossy_drops_truncated_tail() {
        // first two bytes of a three-byte sequence
        let text = decode(b"Tools\xe2\x82", Decoding::Lossy).unwrap();
        assert_eq!(text, "Tools");
    }

    #[test]
    fn lossy_keeps_valid_multibyte() {
        let text = decode("Текст 1".as_bytes(), Decoding::Lossy).unwrap();
        assert_eq!(text, "Текст 1");
    }

    #[test]
    fn strict_reports_offset() {
        assert_eq!(decode(b"abc\xffdef", Decoding::Strict), Err(3));
        assert_eq!(decode(b"abc", Decoding::Strict).unwrap(), "abc");
    }

    #[test]
    fn line_counting() {
        assert_eq!(line_count(b""), 0);
        assert_eq!(line_count(b"one"), 1);
        assert_eq!(line_count(b"one\n"), 1);
        assert_eq!(line_count(b"one\ntwo"), 2);
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("Ω first\nsecond\n".as_bytes()).unwrap();
        let corpus = Corpus::load(file.path(), Decoding::Strict).unwrap();
        assert_eq!(corpus.line_count, 2);
        assert_eq!(corpus.char_count(), 15);
        assert_eq!(corpus.chars[0], 'Ω');
    }

    #[test]
    fn load_missing_file() {
        let err = Corpus::load(Path::new("/nonexistent/article_1.txt"), Decoding::Lossy)
            .unwrap_err();
        assert!(matches!(err, SearchError::NotFound { .. }));
    }

    #[test]
    fn strict_load_fails_on_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok \xc0 not ok").unwrap();
        let err = Corpus::load(file.path(), Decoding::Strict).unwrap_err();
        assert!(matches!(err, SearchError::DecodeError { offset: 3, .. }));

        let corpus = Corpus::load(file.path(), Decoding::Lossy).unwrap();
        assert_eq!(corpus.text, "ok  not ok");
    }

    #[test]
    fn nul_bytes_are_text() {
        let bytes = b"header\x00 International Journal";
        for decoding in [Decoding::Lossy, Decoding::Strict] {
            let corpus = Corpus::from_bytes("t", Path::new("t.txt"), bytes, decoding).unwrap();
            assert_eq!(corpus.char_count(), bytes.len());
            assert_eq!(corpus.chars[6], '\0');
            let needle: Vec<char> = "Journal".chars().collect();
            let pattern = crate::Pattern::new(&needle).unwrap();
            let comparison = crate::search::search_all(&corpus.chars, &pattern);
            assert_eq!(comparison.consensus(), Some(Some(22)));
        }
    }

    #[test]
    fn crlf_is_kept() {
        let corpus =
            Corpus::from_bytes("t", Path::new("t.txt"), b"one\r\ntwo", Decoding::Strict).unwrap();
        assert_eq!(corpus.text, "one\r\ntwo");
        assert_eq!(corpus.line_count, 2);
        let found = crate::find(crate::Algorithm::KnuthMorrisPratt, &corpus.text, "two");
        assert_eq!(found.unwrap(), Some(5));
    }
}
