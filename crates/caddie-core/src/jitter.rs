//! Seeded jitter for scatter legibility.
//!
//! Coincident shots would draw on top of each other, so the chart nudges each
//! marker by a sub-yard amount. The offsets are display-only and never feed a
//! mean, covariance or ellipse.
//!
//! A seed always draws the same ChaCha8 stream, independent of the `rand`
//! release.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::Point2;

/// Seed the chart uses unless configured otherwise.
pub const DEFAULT_JITTER_SEED: u64 = 42;

/// Full width of the lateral nudge in yards.
pub const LATERAL_SPREAD_YARDS: f64 = 1.2;

/// Full width of the carry nudge in yards.
pub const CARRY_SPREAD_YARDS: f64 = 0.8;

/// Restartable uniform stream on `[0, 1)`, seeded through ChaCha8.
#[derive(Debug, Clone)]
pub struct DeterministicJitter {
    seed: u64,
    rng: ChaCha8Rng,
}

impl DeterministicJitter {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Next value in `[0, 1)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Restart the stream from the current seed.
    pub fn reset(&mut self) {
        self.reseed(self.seed);
    }

    /// Offset `point` by `(r - 0.5) * spread` on each axis, drawing the
    /// lateral value first.
    pub fn nudge(&mut self, point: Point2, spread: Point2) -> Point2 {
        let dx = (self.next() - 0.5) * spread.x;
        let dy = (self.next() - 0.5) * spread.y;
        Point2::new(point.x + dx, point.y + dy)
    }
}

/// Jitter every point from a fresh stream seeded with `seed`.
#[must_use]
pub fn jitter_points(points: &[Point2], seed: u64) -> Vec<Point2> {
    let spread = Point2::new(LATERAL_SPREAD_YARDS, CARRY_SPREAD_YARDS);
    let mut jitter = DeterministicJitter::new(seed);
    points.iter().map(|p| jitter.nudge(*p, spread)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_in_unit_interval() {
        let mut jitter = DeterministicJitter::new(7);
        for _ in 0..1_000 {
            let v = jitter.next();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn reseeding_reproduces_history() {
        let mut jitter = DeterministicJitter::new(DEFAULT_JITTER_SEED);
        let first: Vec<f64> = (0..16).map(|_| jitter.next()).collect();
        jitter.reseed(DEFAULT_JITTER_SEED);
        let second: Vec<f64> = (0..16).map(|_| jitter.next()).collect();
        assert_eq!(first, second);

        jitter.reset();
        assert_eq!(jitter.next(), first[0]);
    }

    #[test]
    fn stream_is_chacha8_for_the_seed() {
        let mut jitter = DeterministicJitter::new(DEFAULT_JITTER_SEED);
        let mut rng = ChaCha8Rng::seed_from_u64(DEFAULT_JITTER_SEED);
        for _ in 0..32 {
            assert_eq!(jitter.next(), rng.random::<f64>());
        }
    }

    #[test]
    fn distinct_seeds_diverge_immediately() {
        let a = DeterministicJitter::new(1).next();
        let b = DeterministicJitter::new(2).next();
        assert_ne!(a, b);
    }

    #[test]
    fn nudge_stays_within_half_spread() {
        let points = vec![Point2::new(0.0, 150.0); 50];
        for p in jitter_points(&points, 3) {
            assert!(p.x.abs() <= LATERAL_SPREAD_YARDS / 2.0);
            assert!((p.y - 150.0).abs() <= CARRY_SPREAD_YARDS / 2.0);
        }
    }

    #[test]
    fn jitter_points_is_deterministic() {
        let points = [Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)];
        assert_eq!(jitter_points(&points, 9), jitter_points(&points, 9));
    }
}
