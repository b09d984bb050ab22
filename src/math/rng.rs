use std::ops::{Range, RangeInclusive};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng as _, SeedableRng};
use rand_pcg::Pcg32;

use crate::graphics::{Argb, Pixel};

pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Explicitly owned random source. Every scene gets its own, so a fixed
/// seed replays the same run.
pub struct Rng(Pcg32);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    pub fn int(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.0.random_range(range)
    }

    pub fn float(&mut self, range: Range<f32>) -> f32 {
        self.0.random_range(range)
    }

    pub fn float_incl(&mut self, range: RangeInclusive<f32>) -> f32 {
        self.0.random_range(range)
    }

    pub fn sign(&mut self) -> i32 {
        if self.0.random_bool(0.5) {
            1
        } else {
            -1
        }
    }

    pub fn channel(&mut self, range: RangeInclusive<u8>) -> u8 {
        self.0.random_range(range)
    }

    /// Random colour with every channel drawn from `range` and a fixed alpha.
    pub fn color(&mut self, range: RangeInclusive<u8>, alpha: u8) -> Argb {
        let r = self.channel(range.clone());
        let g = self.channel(range.clone());
        let b = self.channel(range);
        Argb::compose([alpha, r, g, b])
    }
}
