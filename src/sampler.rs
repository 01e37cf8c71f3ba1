use std::ops::RangeInclusive;

use rand::Rng;

use crate::{common::Error, weighted::WeightedTable};

pub const QUALITY_VALUES: [u8; 4] = [1, 2, 3, 4];
pub const QUALITY_WEIGHTS: [u32; 4] = [1, 3, 4, 2];

pub const INTERVAL_VALUES: [u32; 9] = [0, 1, 2, 3, 6, 10, 15, 20, 30];
pub const INTERVAL_WEIGHTS: [u32; 9] = [5, 10, 8, 6, 4, 3, 2, 1, 1];

pub const REPETITION_RANGE: RangeInclusive<u32> = 0..=10;
pub const E_FACTOR_RANGE: RangeInclusive<f64> = 1.3..=2.5;

/// Scheduling fields of a single synthetic review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewSample {
    pub quality: u8,
    pub interval: u32,
    pub repetition: u32,
    pub e_factor: f64,
}

/// Draws every field independently: quality and interval from their weighted
/// tables, repetition and ease factor uniformly.
#[derive(Debug, Clone)]
pub struct ReviewSampler {
    quality: WeightedTable<u8>,
    interval: WeightedTable<u32>,
}

impl ReviewSampler {
    /// # Errors
    ///
    /// Only if the built-in weight tables are malformed.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            quality: WeightedTable::new(&QUALITY_VALUES, &QUALITY_WEIGHTS)?,
            interval: WeightedTable::new(&INTERVAL_VALUES, &INTERVAL_WEIGHTS)?,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ReviewSample {
        ReviewSample {
            quality: self.quality.sample(rng),
            interval: self.interval.sample(rng),
            repetition: rng.random_range(REPETITION_RANGE),
            e_factor: rng.random_range(E_FACTOR_RANGE),
        }
    }

    #[cfg(test)]
    const fn quality_table(&self) -> &WeightedTable<u8> {
        &self.quality
    }

    #[cfg(test)]
    const fn interval_table(&self) -> &WeightedTable<u32> {
        &self.interval
    }
}
