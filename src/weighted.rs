use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};

use crate::common::{Error, LexSeedError};

/// A fixed domain of values, each drawn with probability proportional to its
/// weight.
///
/// Sampling is a cumulative-distribution draw: a uniform number in
/// `[0, total_weight)` is located among the running weight sums.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    values: Vec<T>,
    weights: Vec<u32>,
    index: WeightedIndex<u32>,
}

impl<T: Copy + PartialEq> WeightedTable<T> {
    /// # Errors
    ///
    /// When the lengths differ, the table is empty or all weights are zero.
    pub fn new(values: &[T], weights: &[u32]) -> Result<Self, Error> {
        if values.len() != weights.len() {
            return Err(LexSeedError::InvalidWeights(format!(
                "{} values but {} weights",
                values.len(),
                weights.len()
            ))
            .into());
        }

        let index = WeightedIndex::new(weights.iter().copied())
            .map_err(|err| LexSeedError::InvalidWeights(err.to_string()))?;

        Ok(Self {
            values: values.to_vec(),
            weights: weights.to_vec(),
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.values[self.index.sample(rng)]
    }

    /// The domain, in construction order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Normalised weight of `value`, zero when it is outside the domain.
    #[must_use]
    pub fn probability(&self, value: T) -> f64 {
        let total: u32 = self.weights.iter().sum();
        self.values
            .iter()
            .zip(&self.weights)
            .filter(|(v, _)| **v == value)
            .map(|(_, w)| f64::from(*w) / f64::from(total))
            .sum()
    }
}
