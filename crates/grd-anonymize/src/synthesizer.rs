//! Per-run identity synthesis context.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::error::{AnonymizeError, Result};
use crate::names::{SURNAMES, Sex};
use crate::national_id::{BODY_MAX, BODY_MIN, NationalId};

/// Default number of draws before giving up on a fresh identifier.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Generates synthetic names and identifiers for one run.
///
/// Every identifier handed out is remembered, so the same context never
/// issues a value twice. Independent runs should use independent contexts
/// (or call [`reset`](Self::reset)).
#[derive(Debug)]
pub struct IdentitySynthesizer<R: Rng = StdRng> {
    rng: R,
    issued: HashSet<NationalId>,
    max_attempts: u32,
    body_range: RangeInclusive<u32>,
}

impl IdentitySynthesizer<StdRng> {
    /// Reproducible synthesizer seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Synthesizer seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> IdentitySynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            body_range: BODY_MIN..=BODY_MAX,
        }
    }

    /// Sets the retry budget for [`national_id`](Self::national_id). Zero is
    /// treated as one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Restricts the numeric bodies that may be drawn. An empty range is
    /// collapsed to its start.
    #[must_use]
    pub fn with_body_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.body_range = if range.is_empty() {
            *range.start()..=*range.start()
        } else {
            range
        };
        self
    }

    /// Forename from the pool for `sex` followed by two distinct surnames.
    pub fn full_name(&mut self, sex: Sex) -> String {
        let forename = pick(&mut self.rng, sex.forenames());
        let first = pick(&mut self.rng, SURNAMES);
        let mut second = pick(&mut self.rng, SURNAMES);
        while second == first {
            second = pick(&mut self.rng, SURNAMES);
        }
        format!("{forename} {first} {second}")
    }

    /// Draws a checksum-valid identifier not issued before in this run.
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizeError::IdentifierSpaceExhausted`] when every draw
    /// within the retry budget collides with an issued identifier.
    pub fn national_id(&mut self) -> Result<NationalId> {
        for _ in 0..self.max_attempts {
            let candidate = NationalId::from_body(self.rng.random_range(self.body_range.clone()));
            if self.issued.insert(candidate) {
                return Ok(candidate);
            }
        }
        warn!(
            attempts = self.max_attempts,
            issued = self.issued.len(),
            "identifier space exhausted"
        );
        Err(AnonymizeError::IdentifierSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Number of identifiers issued so far.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    /// Forgets every issued identifier.
    pub fn reset(&mut self) {
        self.issued.clear();
    }
}

fn pick<R: Rng>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool[rng.random_range(0..pool.len())]
}
