//! Injectable randomness.
//!
//! Fallback selection and simulated typing latency are the only
//! non-deterministic behaviours in FlexCore.  Both go through the traits in
//! this module so hosts use real entropy while tests pin the outcome.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Index selection
// ---------------------------------------------------------------------------

/// Source of uniformly distributed indices.
pub trait RandomSource: Send {
    /// Return an index in `0..upper`.  Returns `0` when `upper` is `0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Thread-local entropy from [`rand::thread_rng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Reproducible sequence from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }
}

/// Always returns the same index (wrapped into range).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom {
    index: usize,
}

impl FixedRandom {
    /// Create a source that always yields `index % upper`.
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl RandomSource for FixedRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.index % upper
    }
}

// ---------------------------------------------------------------------------
// Delays
// ---------------------------------------------------------------------------

/// Source of simulated latencies.
pub trait DelaySource: Send {
    /// Return the delay to wait before the next reply.
    fn next_delay(&mut self) -> Duration;
}

/// Delay drawn uniformly from `[min, max]` with millisecond resolution.
#[derive(Debug, Clone, Copy)]
pub struct UniformDelay {
    min: Duration,
    max: Duration,
}

impl UniformDelay {
    /// Create a uniform delay over `[min, max]`.  The bounds are swapped if
    /// given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lower bound.
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> Duration {
        self.max
    }
}

impl Default for UniformDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(2000))
    }
}

impl DelaySource for UniformDelay {
    fn next_delay(&mut self) -> Duration {
        let lo = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let hi = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        if lo >= hi {
            return self.min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
    }
}

/// Constant delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    /// No delay at all.
    pub fn zero() -> Self {
        Self(Duration::ZERO)
    }
}

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        let mut random = ThreadRandom;
        for _ in 0..200 {
            assert!(random.next_index(4) < 4);
        }
        assert_eq!(random.next_index(0), 0);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        let xs: Vec<usize> = (0..16).map(|_| a.next_index(10)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.next_index(10)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn fixed_random_wraps() {
        let mut random = FixedRandom::new(5);
        assert_eq!(random.next_index(4), 1);
        assert_eq!(random.next_index(10), 5);
        assert_eq!(random.next_index(0), 0);
    }

    #[test]
    fn uniform_delay_stays_within_bounds() {
        let mut delay = UniformDelay::new(Duration::from_millis(10), Duration::from_millis(20));
        for _ in 0..100 {
            let d = delay.next_delay();
            assert!(d >= Duration::from_millis(10));
            assert!(d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn uniform_delay_swaps_reversed_bounds() {
        let delay = UniformDelay::new(Duration::from_secs(2), Duration::from_secs(1));
        assert_eq!(delay.min(), Duration::from_secs(1));
        assert_eq!(delay.max(), Duration::from_secs(2));
    }

    #[test]
    fn degenerate_uniform_delay_returns_min() {
        let mut delay = UniformDelay::new(Duration::from_millis(7), Duration::from_millis(7));
        assert_eq!(delay.next_delay(), Duration::from_millis(7));
    }

    #[test]
    fn fixed_delay_zero() {
        assert_eq!(FixedDelay::zero().next_delay(), Duration::ZERO);
    }
}
