use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::positions::domain::position::Position;
use crate::positions::domain::position_store::{PositionStore, PositionStoreError};

const COUNT_BYTES: usize = 4;
const PAIR_BYTES: usize = 8;

/// Stores positions as a little-endian `u32` count followed by that many
/// `(i32 x, i32 y)` pairs.
///
/// Saves go through a sibling `.part` file that is renamed over the target,
/// so readers never observe a half-written file.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryPositionStore;

impl BinaryPositionStore {
    pub fn new() -> Self {
        Self
    }
}

impl PositionStore for BinaryPositionStore {
    fn load(&self, path: &Path) -> Result<Vec<Position>, PositionStoreError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PositionStoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        decode(path, &bytes)
    }

    fn save(&self, path: &Path, positions: &[Position]) -> Result<(), PositionStoreError> {
        let bytes = encode(positions)?;
        let io_err = |source: io::Error| PositionStoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut temp_name = path.as_os_str().to_os_string();
        temp_name.push(".part");
        let temp_path = Path::new(&temp_name);

        let mut file = fs::File::create(temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(temp_path, path).map_err(io_err)?;
        log::debug!("Saved {} positions to {}", positions.len(), path.display());
        Ok(())
    }
}

fn encode(positions: &[Position]) -> Result<Vec<u8>, PositionStoreError> {
    let count =
        u32::try_from(positions.len()).map_err(|_| PositionStoreError::TooMany(positions.len()))?;
    let mut bytes = Vec::with_capacity(COUNT_BYTES + positions.len() * PAIR_BYTES);
    bytes.extend_from_slice(&count.to_le_bytes());
    for p in positions {
        bytes.extend_from_slice(&p.x.to_le_bytes());
        bytes.extend_from_slice(&p.y.to_le_bytes());
    }
    Ok(bytes)
}

fn decode(path: &Path, bytes: &[u8]) -> Result<Vec<Position>, PositionStoreError> {
    let Some(header) = bytes.get(..COUNT_BYTES) else {
        return Err(PositionStoreError::Truncated {
            path: path.to_path_buf(),
            expected: COUNT_BYTES,
            actual: bytes.len(),
        });
    };
    let count = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;

    let expected = count
        .checked_mul(PAIR_BYTES)
        .and_then(|n| n.checked_add(COUNT_BYTES))
        .unwrap_or(usize::MAX);
    if bytes.len() < expected {
        return Err(PositionStoreError::Truncated {
            path: path.to_path_buf(),
            expected,
            actual: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(PositionStoreError::TrailingBytes {
            path: path.to_path_buf(),
            extra: bytes.len() - expected,
        });
    }

    Ok(bytes[COUNT_BYTES..]
        .chunks_exact(PAIR_BYTES)
        .map(|pair| {
            let x = i32::from_le_bytes([pair[0], pair[1], pair[2], pair[3]]);
            let y = i32::from_le_bytes([pair[4], pair[5], pair[6], pair[7]]);
            Position::new(x, y)
        })
        .collect())
}
