use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::positions::domain::position::Position;

#[derive(Error, Debug)]
pub enum PositionStoreError {
    #[error("failed to access position file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("position file {path} is truncated: expected {expected} bytes, found {actual}")]
    Truncated {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    #[error("position file {path} has {extra} unexpected trailing bytes")]
    TrailingBytes { path: PathBuf, extra: usize },
    #[error("cannot store {0} positions in a single file")]
    TooMany(usize),
}

/// Positions loaded from a candidate list, with the file they came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedPositions {
    pub positions: Vec<Position>,
    /// `None` when every candidate was missing or empty.
    pub source: Option<PathBuf>,
}

/// Persistence for parking space positions.
///
/// A missing file is an empty list, not an error. Any other I/O or format
/// failure is reported to the caller.
pub trait PositionStore {
    fn load(&self, path: &Path) -> Result<Vec<Position>, PositionStoreError>;

    /// Overwrites `path`. Last writer wins; there is no locking.
    fn save(&self, path: &Path, positions: &[Position]) -> Result<(), PositionStoreError>;

    /// Tries `candidates` in order and returns the first non-empty list.
    fn load_first_non_empty(
        &self,
        candidates: &[PathBuf],
    ) -> Result<LoadedPositions, PositionStoreError> {
        for candidate in candidates {
            let positions = self.load(candidate)?;
            if !positions.is_empty() {
                return Ok(LoadedPositions {
                    positions,
                    source: Some(candidate.clone()),
                });
            }
            log::debug!("No positions in {}", candidate.display());
        }
        Ok(LoadedPositions::default())
    }
}
