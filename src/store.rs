use std::path::Path;

use log::{debug, warn};
use sqlite::{Connection, OpenFlags, State};

use crate::{
    common::{Error, LexSeedError},
    review::{ReviewRecord, WordId},
};

const SELECT_WORD_IDS: &str = "SELECT id FROM words ORDER BY id";

const INSERT_REVIEW: &str = "
    INSERT INTO review_history
        (word_id, reviewed_at, quality, repetition, interval, e_factor)
    VALUES (?, ?, ?, ?, ?, ?)
";

const RECENT_DAILY_COUNTS: &str = "
    SELECT DATE(reviewed_at) AS date, COUNT(*) AS count
      FROM review_history
     GROUP BY date
     ORDER BY date DESC
     LIMIT ?
";

const INTERVAL_STATS: &str = "
    SELECT interval, AVG(quality) AS avg_quality, COUNT(*) AS count
      FROM review_history
     GROUP BY interval
     ORDER BY interval ASC
     LIMIT ?
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalStat {
    pub interval: i64,
    pub avg_quality: f64,
    pub count: usize,
}

/// Rows touched by one committed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchWrite {
    pub cleared: usize,
    pub inserted: usize,
}

/// The LexRain database for the duration of one run. The connection closes
/// when the store is dropped.
pub struct Store {
    connection: Connection,
}

impl Store {
    /// Opens an existing database read-write with foreign keys enforced. A
    /// missing file is an error rather than a fresh empty database.
    ///
    /// # Errors
    ///
    /// When the file is missing or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::new().with_read_write())
            .map_err(|source| LexSeedError::StoreOpen {
                path: path.to_path_buf(),
                source,
            })?;
        connection.execute("PRAGMA foreign_keys = ON")?;
        debug!("Opened database {}", path.display());

        Ok(Self { connection })
    }

    /// # Errors
    ///
    /// On query failure, e.g. when the `words` table is missing.
    pub fn word_ids(&self) -> Result<Vec<WordId>, Error> {
        let mut statement = self.connection.prepare(SELECT_WORD_IDS)?;
        let mut ids = vec![];
        while let State::Row = statement.next()? {
            ids.push(statement.read::<i64, _>(0)?);
        }
        Ok(ids)
    }

    /// Appends all records inside a single transaction. Nothing is written
    /// unless every insert and the commit succeed.
    ///
    /// # Errors
    ///
    /// When an insert or the commit fails. The transaction is rolled back.
    pub fn insert_reviews(&self, records: &[ReviewRecord]) -> Result<BatchWrite, Error> {
        self.write_reviews(records, false)
    }

    /// Deletes the existing review history and inserts `records` in the same
    /// transaction. On failure the old history is kept.
    ///
    /// # Errors
    ///
    /// When the delete, an insert or the commit fails. The transaction is
    /// rolled back.
    pub fn replace_reviews(&self, records: &[ReviewRecord]) -> Result<BatchWrite, Error> {
        self.write_reviews(records, true)
    }

    fn write_reviews(&self, records: &[ReviewRecord], clear_first: bool) -> Result<BatchWrite, Error> {
        self.connection.execute("BEGIN TRANSACTION")?;

        match self.write_reviews_in_transaction(records, clear_first) {
            Ok(batch) => {
                debug!(
                    "Committed {} review records, cleared {}",
                    batch.inserted, batch.cleared
                );
                Ok(batch)
            }
            Err(err) => {
                if let Err(rollback_err) = self.connection.execute("ROLLBACK") {
                    warn!("Rollback failed: {rollback_err}");
                }
                Err(LexSeedError::Transaction(err).into())
            }
        }
    }

    fn write_reviews_in_transaction(
        &self,
        records: &[ReviewRecord],
        clear_first: bool,
    ) -> Result<BatchWrite, sqlite::Error> {
        let mut batch = BatchWrite::default();

        if clear_first {
            self.connection.execute("DELETE FROM review_history")?;
            batch.cleared = self.connection.change_count();
        }

        // Statement must be finalized before COMMIT.
        {
            let mut statement = self.connection.prepare(INSERT_REVIEW)?;
            for record in records {
                statement.reset()?;
                statement.bind((1, record.word_id))?;
                statement.bind((2, record.reviewed_at_iso().as_str()))?;
                statement.bind((3, i64::from(record.quality)))?;
                statement.bind((4, i64::from(record.repetition)))?;
                statement.bind((5, i64::from(record.interval)))?;
                statement.bind((6, record.e_factor))?;
                while statement.next()? != State::Done {}
            }
        }
        batch.inserted = records.len();

        self.connection.execute("COMMIT")?;
        Ok(batch)
    }

    /// # Errors
    ///
    /// On query failure.
    pub fn review_count(&self) -> Result<usize, Error> {
        self.count("SELECT COUNT(*) FROM review_history")
    }

    /// # Errors
    ///
    /// On query failure.
    pub fn distinct_word_count(&self) -> Result<usize, Error> {
        self.count("SELECT COUNT(DISTINCT word_id) FROM review_history")
    }

    /// Review counts per calendar day, most recent day first.
    ///
    /// # Errors
    ///
    /// On query failure.
    pub fn recent_daily_counts(&self, limit: usize) -> Result<Vec<DailyCount>, Error> {
        let mut statement = self.connection.prepare(RECENT_DAILY_COUNTS)?;
        statement.bind((1, i64::try_from(limit)?))?;

        let mut out = vec![];
        while let State::Row = statement.next()? {
            out.push(DailyCount {
                date: statement.read::<String, _>("date")?,
                count: usize::try_from(statement.read::<i64, _>("count")?)?,
            });
        }
        Ok(out)
    }

    /// Average quality per interval, smallest interval first.
    ///
    /// # Errors
    ///
    /// On query failure.
    pub fn interval_stats(&self, limit: usize) -> Result<Vec<IntervalStat>, Error> {
        let mut statement = self.connection.prepare(INTERVAL_STATS)?;
        statement.bind((1, i64::try_from(limit)?))?;

        let mut out = vec![];
        while let State::Row = statement.next()? {
            out.push(IntervalStat {
                interval: statement.read::<i64, _>("interval")?,
                avg_quality: statement.read::<f64, _>("avg_quality")?,
                count: usize::try_from(statement.read::<i64, _>("count")?)?,
            });
        }
        Ok(out)
    }

    fn count(&self, query: &str) -> Result<usize, Error> {
        let mut statement = self.connection.prepare(query)?;
        let count = match statement.next()? {
            State::Row => statement.read::<i64, _>(0)?,
            State::Done => 0,
        };
        Ok(usize::try_from(count)?)
    }
}
