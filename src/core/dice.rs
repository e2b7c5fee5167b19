//! Randomness seam for every stochastic roll in the engine.
//!
//! Engine code never reaches for a global generator. Callers hand in a
//! `&mut impl Dice`: the game uses a seeded `ChaCha8Rng`, tests use
//! [`ScriptedDice`] to force exact outcomes.

use rand::Rng;
use std::collections::VecDeque;

/// Source of the four kinds of draws the game makes.
pub trait Dice {
    /// Uniform integer in `0..100`, compared against percentage chances.
    fn roll_percent(&mut self) -> u32;

    /// Uniform integer in `min..=max`. Returns `min` when `max < min`.
    fn roll_range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform fraction in `[0, 1)`.
    fn roll_fraction(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// True with probability `chance` (one fraction draw).
    fn chance(&mut self, chance: f64) -> bool {
        self.roll_fraction() < chance
    }
}

impl<R: Rng + ?Sized> Dice for R {
    fn roll_percent(&mut self) -> u32 {
        self.gen_range(0..100)
    }

    fn roll_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn roll_fraction(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Deterministic dice fed from per-kind queues.
///
/// Empty queues fall back to fixed rolls: percent 99 (nothing dodges),
/// range midpoint, fraction 0.99 (every chance check fails, chests are
/// epic), pick 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    percents: VecDeque<u32>,
    ranges: VecDeque<i32>,
    fractions: VecDeque<f64>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_percents(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.percents.extend(rolls);
        self
    }

    /// Values outside the requested range are clamped into it.
    pub fn with_ranges(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.ranges.extend(rolls);
        self
    }

    pub fn with_fractions(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.fractions.extend(rolls);
        self
    }

    /// Values are reduced modulo the pool length.
    pub fn with_picks(mut self, rolls: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(rolls);
        self
    }

    /// Number of queued rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.percents.len() + self.ranges.len() + self.fractions.len() + self.picks.len()
    }
}

impl Dice for ScriptedDice {
    fn roll_percent(&mut self) -> u32 {
        self.percents.pop_front().unwrap_or(99).min(99)
    }

    fn roll_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        match self.ranges.pop_front() {
            Some(value) => value.clamp(min, max),
            None => (min + max) / 2,
        }
    }

    fn roll_fraction(&mut self) -> f64 {
        self.fractions
            .pop_front()
            .unwrap_or(0.99)
            .clamp(0.0, 0.999_999)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.picks.pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rng_rolls_stay_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rng.roll_percent() < 100);
            let r = rng.roll_range(8, 15);
            assert!((8..=15).contains(&r));
            let f = rng.roll_fraction();
            assert!((0.0..1.0).contains(&f));
            assert!(rng.pick(5) < 5);
        }
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(rng.roll_range(4, 4), 4);
        assert_eq!(rng.roll_range(6, 2), 6);
    }

    #[test]
    fn test_scripted_defaults() {
        let mut dice = ScriptedDice::new();
        assert_eq!(dice.roll_percent(), 99);
        assert_eq!(dice.roll_range(8, 14), 11);
        assert!(!dice.chance(0.5));
        assert_eq!(dice.pick(4), 0);
    }

    #[test]
    fn test_scripted_queue_order_and_clamping() {
        let mut dice = ScriptedDice::new()
            .with_percents([3, 150])
            .with_ranges([100, -5])
            .with_picks([7]);
        assert_eq!(dice.remaining(), 5);
        assert_eq!(dice.roll_percent(), 3);
        assert_eq!(dice.roll_percent(), 99);
        assert_eq!(dice.roll_range(10, 25), 25);
        assert_eq!(dice.roll_range(10, 25), 10);
        assert_eq!(dice.pick(5), 2);
        assert_eq!(dice.remaining(), 0);
    }
}
