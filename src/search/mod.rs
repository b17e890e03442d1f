pub mod boyer_moore;
pub mod kmp;
pub mod rabin_karp;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{Pattern, Symbol};
use rabin_karp::HashParams;

/// The three matchers. Order here is report order and tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "Boyer-Moore")]
    BoyerMoore,
    #[serde(rename = "Knuth-Morris-Pratt")]
    KnuthMorrisPratt,
    #[serde(rename = "Rabin-Karp")]
    RabinKarp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::BoyerMoore,
        Algorithm::KnuthMorrisPratt,
        Algorithm::RabinKarp,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BoyerMoore => "Boyer-Moore",
            Self::KnuthMorrisPratt => "Knuth-Morris-Pratt",
            Self::RabinKarp => "Rabin-Karp",
        }
    }

    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::BoyerMoore => "bm",
            Self::KnuthMorrisPratt => "kmp",
            Self::RabinKarp => "rk",
        }
    }

    /// Run this matcher with default hash parameters.
    #[must_use]
    pub fn find<S: Symbol>(self, text: &[S], pattern: &Pattern<'_, S>) -> Option<usize> {
        self.find_with(text, pattern, HashParams::default())
    }

    /// `params` only matters to Rabin-Karp.
    #[must_use]
    pub fn find_with<S: Symbol>(
        self,
        text: &[S],
        pattern: &Pattern<'_, S>,
        params: HashParams,
    ) -> Option<usize> {
        match self {
            Self::BoyerMoore => boyer_moore::find(text, pattern),
            Self::KnuthMorrisPratt => kmp::find(text, pattern),
            Self::RabinKarp => rabin_karp::find_with(text, pattern, params),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    /// Accepts the short name or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.short_name().eq_ignore_ascii_case(s) || a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SearchError::InvalidArgument {
                name: "algorithm".into(),
                reason: format!("unknown algorithm \"{s}\" (expected bm, kmp or rk)"),
            })
    }
}

/// Result of one matcher on one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub algorithm: Algorithm,
    pub position: Option<usize>,
}

/// Results of several matchers on the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub outcomes: Vec<Outcome>,
}

impl Comparison {
    /// True when every matcher returned the same position (or all none).
    #[must_use]
    pub fn agree(&self) -> bool {
        self.outcomes
            .windows(2)
            .all(|w| w[0].position == w[1].position)
    }

    /// The shared position when all matchers agree.
    #[must_use]
    pub fn consensus(&self) -> Option<Option<usize>> {
        match self.outcomes.first() {
            Some(first) if self.agree() => Some(first.position),
            _ => None,
        }
    }
}

/// Run `algorithms` one after another over the same input.
#[must_use]
pub fn compare<S: Symbol>(
    algorithms: &[Algorithm],
    text: &[S],
    pattern: &Pattern<'_, S>,
    params: HashParams,
) -> Comparison {
    let outcomes = algorithms
        .iter()
        .map(|&algorithm| Outcome {
            algorithm,
            position: algorithm.find_with(text, pattern, params),
        })
        .collect();
    Comparison { outcomes }
}

/// Every algorithm, default parameters.
#[must_use]
pub fn search_all<S: Symbol>(text: &[S], pattern: &Pattern<'_, S>) -> Comparison {
    compare(&Algorithm::ALL, text, pattern, HashParams::default())
}
