use serde::{Deserialize, Serialize};

/// Multiplier of the Numerical Recipes linear congruential generator.
pub const LCG_MULTIPLIER: u32 = 1_664_525;
/// Increment of the Numerical Recipes linear congruential generator.
pub const LCG_INCREMENT: u32 = 1_013_904_223;

const LCG_MODULUS: f64 = 4_294_967_296.0;

/// Advances `seed` by one LCG step.
///
/// Returns the drawn value in `[0, 1)` together with the seed to use for the next draw. The
/// arithmetic wraps at 32 bits so the sequence is identical on every platform.
pub const fn next_random(seed: u32) -> (f64, u32) {
    let next_seed = seed.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
    (next_seed as f64 / LCG_MODULUS, next_seed)
}

/// Stateful wrapper over [`next_random`] for callers that draw many values in a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    seed: u32,
}

impl Lcg {
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Seed that the next draw will start from.
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    pub fn next_value(&mut self) -> f64 {
        let (value, next_seed) = next_random(self.seed);
        self.seed = next_seed;
        value
    }

    /// Draws one step and returns the raw seed instead of the scaled value.
    pub fn next_seed(&mut self) -> u32 {
        self.seed = next_random(self.seed).1;
        self.seed
    }
}

impl Iterator for Lcg {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn matches_reference_sequence() {
        let seeds: Vec<u32> = {
            let mut lcg = Lcg::new(1);
            (0..5).map(|_| lcg.next_seed()).collect()
        };
        assert_eq!(
            seeds,
            [1015568748, 1586005467, 2165703038, 3027450565, 217083232]
        );
    }

    #[test]
    fn value_is_seed_over_two_pow_32() {
        let (value, seed) = next_random(0);
        assert_eq!(seed, LCG_INCREMENT);
        assert_eq!(value, 1013904223.0 / 4294967296.0);

        let (value, seed) = next_random(1);
        assert_eq!(seed, 1015568748);
        assert!((value - 0.23645552527159452).abs() < 1e-15);
    }

    #[test]
    fn values_stay_in_unit_interval() {
        for value in Lcg::new(u32::MAX).take(1000) {
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn iterator_and_next_random_agree() {
        let mut lcg = Lcg::new(42);
        let (first, seed) = next_random(42);
        assert_eq!(lcg.next(), Some(first));
        assert_eq!(lcg.seed(), seed);
    }
}
