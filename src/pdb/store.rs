//! On-disk storage of pattern databases.
//!
//! One artefact holds everything the solver needs for one board size: the partition and, in the
//! same order, the per-group cost tables. The format is a flat binary layout with an XXH3-64
//! checksum over the whole content, so corruption and truncation are detected on load. Entries
//! are written in sorted key order, which makes the artefact bytes reproducible.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use itertools::Itertools as _;
use thiserror::Error;

use crate::pdb::{
    db::{PatternDb, PatternDbSet},
    partition::{Partition, PartitionError, TileGroup},
};

const MAGIC: [u8; 4] = *b"NPDB";
const FORMAT_VERSION: u16 = 1;

/// Error type for loading and saving pattern database artefacts.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Returned when there is no artefact for the requested board size.
    #[error("Missing: no pattern database artefact for a {size}x{size} board at {}", path.display())]
    Missing {
        /// The requested board size.
        size: usize,
        /// The path that was looked up.
        path: PathBuf,
    },

    /// Returned when reading or writing the artefact fails.
    #[error("Io: {0}")]
    Io(#[from] io::Error),

    /// Returned when the file does not start with the artefact magic bytes.
    #[error("BadMagic: file is not a pattern database artefact")]
    BadMagic,

    /// Returned when the artefact was written by an unknown format version.
    #[error("UnsupportedVersion: artefact format version {0} is not supported")]
    UnsupportedVersion(u16),

    /// Returned when the artefact is for a different board size than requested.
    #[error("WrongBoardSize: artefact is for a {found}x{found} board, expected {expected}x{expected}")]
    WrongBoardSize {
        /// The requested board size.
        expected: usize,
        /// The board size found in the artefact.
        found: usize,
    },

    /// Returned when the checksum does not match the content.
    #[error("ChecksumMismatch: artefact is corrupted")]
    ChecksumMismatch,

    /// Returned when the artefact ends in the middle of a record.
    #[error("Truncated: artefact ended unexpectedly")]
    Truncated,

    /// Returned when the stored groups do not form a valid partition.
    #[error("InvalidPartition: {0}")]
    InvalidPartition(#[from] PartitionError),
}

/// The artefact file name for a board size, `pattern_db_{N}.dat`.
#[must_use]
pub fn file_name(size: usize) -> String {
    format!("pattern_db_{size}.dat")
}

/// Writes the pattern databases to `path`.
pub fn save(databases: &PatternDbSet, path: &Path) -> Result<(), StoreError> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.push(databases.size() as u8);
    bytes.push(databases.databases().len() as u8);

    for db in databases.databases() {
        bytes.push(db.group().len() as u8);
        bytes.extend_from_slice(db.group().tiles());

        bytes.extend_from_slice(&(db.len() as u64).to_le_bytes());
        for (key, cost) in db.iter().sorted_unstable() {
            bytes.extend_from_slice(&key.to_le_bytes());
            bytes.push(cost);
        }
    }

    let checksum = xxhash_rust::xxh3::xxh3_64(&bytes);
    bytes.extend_from_slice(&checksum.to_le_bytes());

    fs::write(path, bytes)?;
    Ok(())
}

/// Reads the pattern databases for the given board size from `path`.
pub fn load(path: &Path, size: usize) -> Result<PatternDbSet, StoreError> {
    let bytes = fs::read(path)?;
    parse(&bytes, size)
}

/// Reads the pattern databases for the given board size from its default file name under `dir`.
///
/// A missing file is reported as [`StoreError::Missing`]; the solver cannot start without its
/// databases.
pub fn load_from_dir(dir: &Path, size: usize) -> Result<PatternDbSet, StoreError> {
    let path = dir.join(file_name(size));
    match fs::read(&path) {
        Ok(bytes) => parse(&bytes, size),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::Missing { size, path }),
        Err(e) => Err(StoreError::Io(e)),
    }
}

fn parse(bytes: &[u8], size: usize) -> Result<PatternDbSet, StoreError> {
    let Some(content_len) = bytes.len().checked_sub(8) else {
        return Err(StoreError::Truncated);
    };
    let (content, checksum) = bytes.split_at(content_len);

    let expected = u64::from_le_bytes(checksum.try_into().unwrap());
    if xxhash_rust::xxh3::xxh3_64(content) != expected {
        return Err(StoreError::ChecksumMismatch);
    }

    let mut reader = Reader::new(content);

    if reader.take(4)? != MAGIC.as_slice() {
        return Err(StoreError::BadMagic);
    }

    let version = reader.read_u16()?;
    if version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }

    let found = usize::from(reader.read_u8()?);
    if found != size {
        return Err(StoreError::WrongBoardSize {
            expected: size,
            found,
        });
    }

    let group_count = usize::from(reader.read_u8()?);
    let mut groups = Vec::with_capacity(group_count);
    let mut databases = Vec::with_capacity(group_count);

    for _ in 0..group_count {
        let tile_count = usize::from(reader.read_u8()?);
        let group = TileGroup::new(reader.take(tile_count)?.iter().copied());

        let entry_count = reader.read_u64()? as usize;
        let mut table = HashMap::with_capacity(entry_count);
        for _ in 0..entry_count {
            let key = reader.read_u128()?;
            let cost = reader.read_u8()?;
            table.insert(key, cost);
        }

        groups.push(group.clone());
        databases.push(PatternDb::new(group, table));
    }

    // The stored groups must still form a valid partition of the board.
    Partition::new(size, groups)?;

    Ok(PatternDbSet::new(size, databases))
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], StoreError> {
        if self.bytes.len() < n {
            return Err(StoreError::Truncated);
        }
        let (head, tail) = self.bytes.split_at(n);
        self.bytes = tail;
        Ok(head)
    }

    fn read_u8(&mut self) -> Result<u8, StoreError> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, StoreError> {
        Ok(u16::from_le_bytes(self.take(2)?.try_into().unwrap()))
    }

    fn read_u64(&mut self) -> Result<u64, StoreError> {
        Ok(u64::from_le_bytes(self.take(8)?.try_into().unwrap()))
    }

    fn read_u128(&mut self) -> Result<u128, StoreError> {
        Ok(u128::from_le_bytes(self.take(16)?.try_into().unwrap()))
    }
}
