use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    common::Error,
    store::{IntervalStat, Store},
};

pub const RECENT_DAYS_LIMIT: usize = 7;
pub const INTERVAL_STATS_LIMIT: usize = 10;

pub const NO_WORDS_MESSAGE: &str = "No words found in database. Please import words first.";
pub const SUCCESS_MESSAGE: &str = "[OK] Test data created successfully!";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSummary {
    pub interval: i64,
    pub avg_quality: f64,
    pub count: usize,
}

impl From<IntervalStat> for IntervalSummary {
    fn from(stat: IntervalStat) -> Self {
        Self {
            interval: stat.interval,
            avg_quality: stat.avg_quality,
            count: stat.count,
        }
    }
}

/// Summary of everything in `review_history`, not only the latest batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_reviews: usize,
    pub unique_words: usize,
    /// Date -> review count, most recent date first.
    pub recent_daily_counts: IndexMap<String, usize>,
    /// Ascending by interval.
    pub interval_stats: Vec<IntervalSummary>,
}

impl Report {
    /// # Errors
    ///
    /// On store query failure.
    pub fn collect(store: &Store) -> Result<Self, Error> {
        Ok(Self {
            total_reviews: store.review_count()?,
            unique_words: store.distinct_word_count()?,
            recent_daily_counts: store
                .recent_daily_counts(RECENT_DAYS_LIMIT)?
                .into_iter()
                .map(|daily| (daily.date, daily.count))
                .collect(),
            interval_stats: store
                .interval_stats(INTERVAL_STATS_LIMIT)?
                .into_iter()
                .map(IntervalSummary::from)
                .collect(),
        })
    }

    /// # Errors
    ///
    /// When serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[OK] Created {} review records", self.total_reviews)?;
        writeln!(f, "[OK] Covered {} unique words", self.unique_words)?;

        writeln!(f, "\nRecent daily counts:")?;
        for (date, count) in &self.recent_daily_counts {
            writeln!(f, "  {date}: {count} reviews")?;
        }

        writeln!(f, "\nInterval statistics:")?;
        for stat in &self.interval_stats {
            writeln!(
                f,
                "  Interval {} days: avg quality {:.2} ({} reviews)",
                stat.interval, stat.avg_quality, stat.count
            )?;
        }

        Ok(())
    }
}

/// What the CLI prints once the words are read, before anything is
/// generated. JSON mode keeps stdout for the document, so only the no-words
/// message survives there.
#[must_use]
pub fn render_words_found(word_count: usize, json: bool) -> String {
    if word_count == 0 {
        format!("{NO_WORDS_MESSAGE}\n")
    } else if json {
        String::new()
    } else {
        format!("Found {word_count} words in database\n")
    }
}

/// What the CLI prints after a committed batch.
///
/// # Errors
///
/// When JSON serialization fails.
pub fn render(report: &Report, json: bool) -> Result<String, Error> {
    if json {
        Ok(format!("{}\n", report.to_json()?))
    } else {
        Ok(format!("\n{report}\n{SUCCESS_MESSAGE}\n"))
    }
}
