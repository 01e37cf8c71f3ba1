use std::path::PathBuf;

use log::warn;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum LexSeedError {
    #[error("Cannot open database {path:?}")]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: sqlite::Error,
    },
    #[error("Weighted table is invalid: {0}")]
    InvalidWeights(String),
    #[error("Transaction failed and was rolled back")]
    Transaction(#[source] sqlite::Error),
}

/// Removes every file in the working directory matching `pattern`.
///
/// Used to clean up database files left behind by earlier runs.
pub fn delete_all_files_by_glob(pattern: &str) {
    let Ok(paths) = glob::glob(pattern) else {
        warn!("Invalid glob pattern: {pattern}");
        return;
    };

    for path in paths.flatten() {
        if let Err(err) = std::fs::remove_file(&path) {
            warn!("Failed removing {}: {}", path.display(), err);
        }
    }
}
