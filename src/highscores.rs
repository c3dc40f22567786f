//! High score ledger
//!
//! Persisted as plain text, one score per line, sorted descending and capped
//! at [`MAX_HIGH_SCORES`] entries. Persistence is best-effort: read failures
//! yield an empty ledger and write failures are logged and dropped.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::HIGH_SCORE_FILE;
pub use crate::consts::MAX_HIGH_SCORES;
use crate::persistence;

/// Failure reading or writing the ledger file
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read score ledger {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write score ledger {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ranked list of past scores backed by a text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLedger {
    path: PathBuf,
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new(HIGH_SCORE_FILE)
    }
}

impl ScoreLedger {
    /// Ledger stored at `path` (the file need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top `limit` scores, best first. Never fails; I/O errors read as empty.
    pub fn load(&self, limit: usize) -> Vec<u64> {
        match self.try_load_all() {
            Ok(mut scores) => {
                scores.truncate(limit);
                scores
            }
            Err(e) => {
                log::warn!("{e}");
                Vec::new()
            }
        }
    }

    /// Merge `score` into the ledger, keeping the best `limit` entries.
    ///
    /// Write failures are logged and otherwise ignored.
    pub fn save(&self, score: u64, limit: usize) {
        match self.try_save(score, limit) {
            Ok(kept) => log::info!("Score {score} recorded ({kept} entries kept)"),
            Err(e) => log::warn!("{e}"),
        }
    }

    /// True if `score` beats every stored score, or nothing is stored yet
    pub fn is_new_high(&self, score: u64) -> bool {
        self.load(usize::MAX)
            .first()
            .is_none_or(|&best| score > best)
    }

    /// Every parseable entry, sorted descending (uncapped)
    pub fn try_load_all(&self) -> Result<Vec<u64>, LedgerError> {
        let text = persistence::read_text(&self.path).map_err(|source| LedgerError::Read {
            path: self.path.clone(),
            source,
        })?;

        let mut scores = text.as_deref().map(parse_scores).unwrap_or_default();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        Ok(scores)
    }

    /// Merge and persist, returning the number of entries written
    pub fn try_save(&self, score: u64, limit: usize) -> Result<usize, LedgerError> {
        let mut scores = self.try_load_all()?;
        scores.push(score);
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(limit);

        let contents: String = scores.iter().map(|s| format!("{s}\n")).collect();
        persistence::write_atomic(&self.path, &contents).map_err(|source| LedgerError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(scores.len())
    }
}

/// Parse one score per line; blank or malformed lines are skipped
fn parse_scores(text: &str) -> Vec<u64> {
    text.lines()
        .filter_map(|line| line.trim().parse::<u64>().ok())
        .collect()
}
