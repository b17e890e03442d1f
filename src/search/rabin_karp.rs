use crate::error::SearchError;
use crate::types::{Pattern, Symbol};

pub const DEFAULT_BASE: u64 = 256;
/// Small on purpose: collisions on real text are frequent, which keeps the
/// verification path exercised.
pub const DEFAULT_MODULUS: u64 = 101;

/// Polynomial hash parameters. `modulus` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    base: u64,
    modulus: u64,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
        }
    }
}

impl HashParams {
    pub fn new(base: u64, modulus: u64) -> Result<Self, SearchError> {
        if modulus == 0 {
            return Err(SearchError::InvalidArgument {
                name: "modulus".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self { base, modulus })
    }

    #[must_use]
    pub fn base(&self) -> u64 {
        self.base
    }

    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// `Σ code(s[i]) · base^(len-i-1) mod modulus`, evaluated in Horner form.
    #[must_use]
    pub fn hash<S: Symbol>(&self, s: &[S]) -> u64 {
        s.iter()
            .fold(0, |h, &sym| self.add_trailing(self.mul(h, self.base), sym))
    }

    /// `base^exp mod modulus` by square-and-multiply.
    #[must_use]
    pub fn pow(&self, mut exp: usize) -> u64 {
        let mut result = 1 % self.modulus;
        let mut b = self.base % self.modulus;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, b);
            }
            b = self.mul(b, b);
            exp >>= 1;
        }
        result
    }

    fn mul(&self, a: u64, b: u64) -> u64 {
        ((u128::from(a) * u128::from(b)) % u128::from(self.modulus)) as u64
    }

    fn add_trailing<S: Symbol>(&self, h: u64, sym: S) -> u64 {
        ((u128::from(h) + u128::from(sym.code())) % u128::from(self.modulus)) as u64
    }
}

/// Hash of a fixed-width window that can slide one symbol at a time.
#[derive(Debug, Clone, Copy)]
pub struct RollingHash {
    params: HashParams,
    value: u64,
    /// Weight of the leading symbol, `base^(width-1) mod modulus`.
    lead_weight: u64,
}

impl RollingHash {
    #[must_use]
    pub fn new<S: Symbol>(params: HashParams, window: &[S]) -> Self {
        Self {
            params,
            value: params.hash(window),
            lead_weight: params.pow(window.len().saturating_sub(1)),
        }
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Drop `leading` from the front of the window and append `trailing`.
    pub fn roll<S: Symbol>(&mut self, leading: S, trailing: S) {
        let p = self.params;
        let lead = p.mul(leading.code() % p.modulus, self.lead_weight);
        // add modulus before subtracting so the value stays non-negative
        let without_lead = ((u128::from(self.value) + u128::from(p.modulus) - u128::from(lead))
            % u128::from(p.modulus)) as u64;
        self.value = p.add_trailing(p.mul(without_lead, p.base), trailing);
    }
}

/// What a Rabin-Karp scan saw on its way to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scan {
    pub position: Option<usize>,
    /// Windows whose hash equalled the pattern hash.
    pub hash_hits: usize,
    /// Hash hits rejected by direct comparison (collisions).
    pub spurious_hits: usize,
}

/// First occurrence of `pattern` in `text` with the default parameters.
#[must_use]
pub fn find<S: Symbol>(text: &[S], pattern: &Pattern<'_, S>) -> Option<usize> {
    find_with(text, pattern, HashParams::default())
}

#[must_use]
pub fn find_with<S: Symbol>(
    text: &[S],
    pattern: &Pattern<'_, S>,
    params: HashParams,
) -> Option<usize> {
    scan(text, pattern, params).position
}

/// Full scan, counting hash hits and collisions along the way.
#[must_use]
pub fn scan<S: Symbol>(text: &[S], pattern: &Pattern<'_, S>, params: HashParams) -> Scan {
    let needle = pattern.as_slice();
    let (n, m) = (text.len(), needle.len());
    let mut result = Scan::default();
    if m > n {
        return result;
    }

    let target = params.hash(needle);
    let mut window = RollingHash::new(params, &text[..m]);

    for i in 0..=n - m {
        if window.value() == target {
            result.hash_hits += 1;
            if &text[i..i + m] == needle {
                result.position = Some(i);
                return result;
            }
            result.spurious_hits += 1;
        }
        if i < n - m {
            window.roll(text[i], text[i + m]);
        }
    }
    result
}
