//! Id suffixes for toggle widgets.
//!
//! Ids only need to be unique within one rendered document. [`RandomIds`]
//! draws uniformly from `[0, limit)` and tolerates the (birthday-bound)
//! chance of a collision: with the default limit, a document holding 200
//! annotations collides with probability of roughly 0.2%. Callers that need
//! a hard guarantee can wrap any source in [`UniqueIds`] or use the
//! monotonic [`CountingIds`].

use core::fmt;
use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

pub const DEFAULT_ID_LIMIT: u64 = 10_000_000;

// redraws attempted by `UniqueIds` before accepting a duplicate
const MAX_REDRAWS: usize = 64;

/// Source of numeric id suffixes.
pub trait IdSource {
    /// Returns a value in `[0, limit)`. A `limit` of zero is treated as one.
    fn next_id(&mut self, limit: u64) -> u64;
}

impl<S: IdSource + ?Sized> IdSource for &mut S {
    fn next_id(&mut self, limit: u64) -> u64 {
        (**self).next_id(limit)
    }
}

/// Uniform, independent draws.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of ids, for tests and stable output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIds {
    fn next_id(&mut self, limit: u64) -> u64 {
        self.rng.gen_range(0..limit.max(1))
    }
}

/// Hands out `start, start + 1, ...`, wrapping at the limit.
#[derive(Debug, Clone, Default)]
pub struct CountingIds {
    next: u64,
}

impl CountingIds {
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl IdSource for CountingIds {
    fn next_id(&mut self, limit: u64) -> u64 {
        let ret = self.next % limit.max(1);
        self.next = ret + 1;
        ret
    }
}

/// Remembers every id it has issued and redraws on collision.
#[derive(Debug, Clone, Default)]
pub struct UniqueIds<S = RandomIds> {
    inner: S,
    issued: HashSet<u64>,
}

impl<S: IdSource> UniqueIds<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            issued: HashSet::new(),
        }
    }
}

impl<S: IdSource> IdSource for UniqueIds<S> {
    fn next_id(&mut self, limit: u64) -> u64 {
        let mut id = self.inner.next_id(limit);
        for _ in 0..MAX_REDRAWS {
            if self.issued.insert(id) {
                return id;
            }
            id = self.inner.next_id(limit);
        }
        warn!(id, limit, "id space exhausted, reusing an issued id");
        id
    }
}

/// DOM id shared by a margin note's label and checkbox: `mn-{tag}.{nonce}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToggleId(String);

impl ToggleId {
    /// `tag` defaults to `auto` when absent or blank.
    pub fn new(tag: Option<&str>, nonce: u64) -> Self {
        let tag = tag.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("auto");
        ToggleId(format!("mn-{tag}.{nonce}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToggleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn random_in_range() {
        let mut ids = RandomIds::seeded(42);
        for limit in [1, 2, 7, 1000, DEFAULT_ID_LIMIT] {
            for _ in 0..500 {
                assert!(ids.next_id(limit) < limit);
            }
        }
        assert_eq!(ids.next_id(0), 0);
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = RandomIds::seeded(7);
        let mut b = RandomIds::seeded(7);
        let xs: Vec<u64> = (0..20).map(|_| a.next_id(DEFAULT_ID_LIMIT)).collect();
        let ys: Vec<u64> = (0..20).map(|_| b.next_id(DEFAULT_ID_LIMIT)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn uniform_chi_square() {
        const BUCKETS: u64 = 10;
        const DRAWS: u64 = 100_000;

        let mut ids = RandomIds::seeded(0x5eed);
        let mut counts = [0u64; BUCKETS as usize];
        for _ in 0..DRAWS {
            counts[ids.next_id(BUCKETS) as usize] += 1;
        }

        let expected = (DRAWS / BUCKETS) as f64;
        let chi: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        // 9 degrees of freedom, p = 0.001
        assert!(chi < 27.88, "chi-square {chi} over {counts:?}");
    }

    #[test]
    fn counting_wraps() {
        let mut ids = CountingIds::starting_at(2);
        let got: Vec<u64> = (0..5).map(|_| ids.next_id(4)).collect();
        assert_eq!(got, vec![2, 3, 0, 1, 2]);
    }

    struct Script(Vec<u64>);

    impl IdSource for Script {
        fn next_id(&mut self, _limit: u64) -> u64 {
            if self.0.len() > 1 {
                self.0.remove(0)
            } else {
                self.0[0]
            }
        }
    }

    #[test]
    fn unique_redraws() {
        let mut ids = UniqueIds::new(Script(vec![3, 3, 3, 5, 3, 9]));
        assert_eq!(ids.next_id(10), 3);
        assert_eq!(ids.next_id(10), 5);
        assert_eq!(ids.next_id(10), 9);
    }

    #[test]
    fn unique_gives_up() {
        let mut ids = UniqueIds::new(Script(vec![1]));
        assert_eq!(ids.next_id(10), 1);
        // nothing else to draw: still answers, just not uniquely
        assert_eq!(ids.next_id(10), 1);
    }

    #[test]
    fn unique_random() {
        let mut ids = UniqueIds::new(RandomIds::seeded(1));
        let mut seen = HashSet::new();
        for _ in 0..200 {
            assert!(seen.insert(ids.next_id(DEFAULT_ID_LIMIT)));
        }
    }

    #[test]
    fn toggle_id_format() {
        assert_eq!(ToggleId::new(None, 12).as_str(), "mn-auto.12");
        assert_eq!(ToggleId::new(Some("fig"), 3).to_string(), "mn-fig.3");
        assert_eq!(ToggleId::new(Some(" "), 0).as_str(), "mn-auto.0");
    }
}
