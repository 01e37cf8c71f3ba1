use chrono::NaiveDateTime;

pub type WordId = i64;

/// `datetime.isoformat()`-compatible layout, readable by SQLite's `DATE()`.
pub const REVIEWED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One simulated study event, as stored in `review_history`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub word_id: WordId,
    pub reviewed_at: NaiveDateTime,
    pub quality: u8,
    pub repetition: u32,
    pub interval: u32,
    pub e_factor: f64,
}

impl ReviewRecord {
    #[must_use]
    pub fn reviewed_at_iso(&self) -> String {
        self.reviewed_at.format(REVIEWED_AT_FORMAT).to_string()
    }
}
