use chrono::{NaiveDateTime, TimeDelta};
use log::{debug, info};
use rand::{seq::IndexedRandom, Rng};

use crate::{
    common::Error,
    review::{ReviewRecord, WordId},
    sampler::ReviewSampler,
    store::Store,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Days of history, ending yesterday.
    pub days: u32,
    pub min_reviews_per_day: usize,
    pub max_reviews_per_day: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            days: 30,
            min_reviews_per_day: 3,
            max_reviews_per_day: 10,
        }
    }
}

impl GeneratorConfig {
    /// Inclusive bounds of a day's review count for `word_count` available
    /// words. Words are drawn without replacement so the upper bound never
    /// exceeds `word_count`.
    #[must_use]
    pub fn reviews_per_day_bounds(&self, word_count: usize) -> (usize, usize) {
        let upper = self.max_reviews_per_day.min(word_count);
        let lower = self.min_reviews_per_day.min(upper);
        (lower, upper)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Clear `review_history` before generating.
    pub reset: bool,
}

/// All reviews synthesized for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReviews {
    pub days_ago: u32,
    pub reviewed_at: NaiveDateTime,
    pub records: Vec<ReviewRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoWords,
    Generated {
        word_count: usize,
        inserted: usize,
        /// Review count per generated day, oldest day first.
        daily_counts: Vec<usize>,
        cleared: usize,
    },
}

pub struct Generator {
    config: GeneratorConfig,
    sampler: ReviewSampler,
}

impl Generator {
    /// # Errors
    ///
    /// If the review sampler cannot be built.
    pub fn new(config: GeneratorConfig) -> Result<Self, Error> {
        Ok(Self {
            config,
            sampler: ReviewSampler::new()?,
        })
    }

    /// Synthesizes review history for the `config.days` days before `now`,
    /// oldest day first. Empty `word_ids` yields nothing.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        word_ids: &[WordId],
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Vec<DailyReviews> {
        if word_ids.is_empty() {
            return vec![];
        }

        let (lower, upper) = self.config.reviews_per_day_bounds(word_ids.len());

        (1..=self.config.days)
            .rev()
            .map(|days_ago| {
                let reviewed_at = now - TimeDelta::days(i64::from(days_ago));
                let review_count = rng.random_range(lower..=upper);
                debug!("{days_ago} days ago: {review_count} reviews");

                let chosen: Vec<WordId> = word_ids
                    .choose_multiple(rng, review_count)
                    .copied()
                    .collect();

                let records = chosen
                    .into_iter()
                    .map(|word_id| {
                        let sample = self.sampler.sample(rng);
                        ReviewRecord {
                            word_id,
                            reviewed_at,
                            quality: sample.quality,
                            repetition: sample.repetition,
                            interval: sample.interval,
                            e_factor: sample.e_factor,
                        }
                    })
                    .collect();

                DailyReviews {
                    days_ago,
                    reviewed_at,
                    records,
                }
            })
            .collect()
    }

    /// Reads the words, generates their history and commits it as one unit.
    /// Returns `Outcome::NoWords` without writing anything when the store has
    /// no words.
    ///
    /// # Errors
    ///
    /// On any store failure. A failed write leaves the table untouched.
    pub fn run<R: Rng + ?Sized>(
        &self,
        store: &Store,
        options: RunOptions,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Result<Outcome, Error> {
        let word_ids = store.word_ids()?;
        self.run_with_words(store, &word_ids, options, now, rng)
    }

    /// Like [`Generator::run`] for word ids the caller has already read.
    ///
    /// # Errors
    ///
    /// On any store failure. A failed write leaves the table untouched,
    /// including the rows a reset would have deleted.
    pub fn run_with_words<R: Rng + ?Sized>(
        &self,
        store: &Store,
        word_ids: &[WordId],
        options: RunOptions,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Result<Outcome, Error> {
        if word_ids.is_empty() {
            info!("No words in store, nothing generated");
            return Ok(Outcome::NoWords);
        }
        info!("Found {} words", word_ids.len());

        let days = self.generate(word_ids, now, rng);
        let daily_counts: Vec<usize> = days.iter().map(|day| day.records.len()).collect();
        let records: Vec<ReviewRecord> = days.into_iter().flat_map(|day| day.records).collect();

        let batch = if options.reset {
            store.replace_reviews(&records)?
        } else {
            store.insert_reviews(&records)?
        };
        info!(
            "Inserted {} review records over {} days, cleared {}",
            batch.inserted,
            daily_counts.len(),
            batch.cleared
        );

        Ok(Outcome::Generated {
            word_count: word_ids.len(),
            inserted: batch.inserted,
            daily_counts,
            cleared: batch.cleared,
        })
    }
}
