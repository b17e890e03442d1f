#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,  // u128 → u64 after reducing mod a u64 modulus
    clippy::cast_possible_wrap,        // char index → i64 sentinel; indices fit
    clippy::module_name_repetitions,   // Rust naming conventions
    clippy::similar_names,             // i/j/m/n in matcher loops
    clippy::missing_errors_doc,        // errors are the SearchError variants
    clippy::missing_panics_doc,        // same
)]

pub mod bisect;
pub mod corpus;
pub mod error;
pub(crate) mod format;
pub mod search;
pub mod types;

pub use corpus::{Corpus, Decoding};
pub use error::SearchError;
pub use search::rabin_karp::{HashParams, Scan};
pub use search::{Algorithm, Comparison, Outcome};
pub use types::{NOT_FOUND, Pattern, Symbol};

/// First occurrence of `pattern` in `text` as a char index.
pub fn find(algorithm: Algorithm, text: &str, pattern: &str) -> Result<Option<usize>, SearchError> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    Ok(algorithm.find(&text, &Pattern::new(&pattern)?))
}

/// Everything the CLI prints for one `find` invocation.
#[derive(Debug, Clone)]
pub struct FindReport {
    pub pattern: String,
    pub corpus: String,
    pub char_count: usize,
    pub line_count: usize,
    pub comparison: Comparison,
    pub params: HashParams,
    /// Collision statistics, present when Rabin-Karp ran.
    pub rabin_karp: Option<Scan>,
}

impl FindReport {
    /// Run `algorithms` over `corpus` in order.
    pub fn build(
        corpus: &Corpus,
        pattern: &str,
        algorithms: &[Algorithm],
        params: HashParams,
    ) -> Result<Self, SearchError> {
        let needle: Vec<char> = pattern.chars().collect();
        let needle = Pattern::new(&needle)?;

        let rabin_karp = algorithms
            .contains(&Algorithm::RabinKarp)
            .then(|| search::rabin_karp::scan(&corpus.chars, &needle, params));
        // the scan already carries the Rabin-Karp position
        let outcomes = algorithms
            .iter()
            .map(|&algorithm| Outcome {
                algorithm,
                position: match (algorithm, rabin_karp) {
                    (Algorithm::RabinKarp, Some(scan)) => scan.position,
                    _ => algorithm.find_with(&corpus.chars, &needle, params),
                },
            })
            .collect();

        Ok(Self {
            pattern: pattern.to_string(),
            corpus: corpus.name.clone(),
            char_count: corpus.char_count(),
            line_count: corpus.line_count,
            comparison: Comparison { outcomes },
            params,
            rabin_karp,
        })
    }

    #[must_use]
    pub fn render(&self) -> String {
        format::find_report(self)
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        format::find_report_json(self)
    }
}

/// Instrumented binary search over `values`, rendered for the CLI.
pub fn run_bisect(values: &[f64], target: f64, json: bool) -> Result<String, SearchError> {
    if values.windows(2).any(|w| w[0] > w[1]) {
        return Err(SearchError::InvalidArgument {
            name: "values".into(),
            reason: "must be sorted in ascending order".into(),
        });
    }
    let result = bisect::search(values, target);
    if json {
        Ok(serde_json::to_string_pretty(&format::bisect_json(target, &result))
            .expect("serde_json::Value is always serializable"))
    } else {
        Ok(format::bisect(target, &result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn find_by_str() {
        assert_eq!(
            find(Algorithm::BoyerMoore, "abcxabcdabxabcdabcdabcy", "abcdabcy").unwrap(),
            Some(15)
        );
        assert_eq!(find(Algorithm::RabinKarp, "hello", "world").unwrap(), None);
    }

    #[test]
    fn find_rejects_empty_pattern() {
        for a in Algorithm::ALL {
            assert!(matches!(find(a, "text", ""), Err(SearchError::EmptyPattern)));
        }
    }

    #[test]
    fn report_includes_rabin_karp_stats_only_when_run() {
        let corpus =
            Corpus::from_bytes("t", Path::new("t.txt"), b"b,ab", Decoding::Strict).unwrap();
        let all = FindReport::build(&corpus, "ab", &Algorithm::ALL, HashParams::default()).unwrap();
        assert_eq!(all.rabin_karp.map(|s| s.spurious_hits), Some(1));
        assert_eq!(all.comparison.consensus(), Some(Some(2)));

        let bm_only =
            FindReport::build(&corpus, "ab", &[Algorithm::BoyerMoore], HashParams::default())
                .unwrap();
        assert!(bm_only.rabin_karp.is_none());
    }

    #[test]
    fn report_rabin_karp_position_comes_from_scan() {
        let corpus =
            Corpus::from_bytes("t", Path::new("t.txt"), b"mississippi", Decoding::Strict).unwrap();
        let params = HashParams::new(256, 1).unwrap();
        let report = FindReport::build(&corpus, "ssip", &Algorithm::ALL, params).unwrap();
        let scan = report.rabin_karp.unwrap();
        let rk = report
            .comparison
            .outcomes
            .iter()
            .find(|o| o.algorithm == Algorithm::RabinKarp)
            .unwrap();
        assert_eq!(rk.position, scan.position);
        assert_eq!(report.comparison.consensus(), Some(Some(5)));
        assert_eq!(report.params.modulus(), 1);
        assert_eq!(report.to_json()["rabin_karp"]["modulus"], 1);
    }

    #[test]
    fn bisect_rejects_unsorted() {
        assert!(run_bisect(&[3.0, 1.0], 1.0, false).is_err());
        assert!(run_bisect(&[1.0, 3.0], 3.0, false).unwrap().contains("index 1"));
    }
}
