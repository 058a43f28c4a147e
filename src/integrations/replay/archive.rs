// src/integrations/replay/archive.rs
//
// Replay container access
//
// A replay is an archive holding a user-data header plus named, compressed
// entries ("replay.details", "replay.tracker.events", ...). Reading the container
// format is delegated to whatever implements these traits; the extractor only asks
// for the header blob and entries by name.

use std::collections::HashMap;

use super::error::ExtractionError;

pub trait ReplayArchive {
    /// Raw user-data header, decoded by the protocol layer
    fn user_data_header(&self) -> &[u8];

    /// Uncompressed contents of a named entry
    fn read_entry(&self, name: &str) -> Result<Vec<u8>, ExtractionError>;
}

/// Opens replay containers.
///
/// Fails with `ExtractionError::Container` when the bytes are not a container.
/// Any `Fn(Vec<u8>) -> Result<Box<dyn ReplayArchive>, ExtractionError>` is an opener.
pub trait ArchiveOpener: Send + Sync {
    fn open(&self, contents: Vec<u8>) -> Result<Box<dyn ReplayArchive>, ExtractionError>;
}

impl<F> ArchiveOpener for F
where
    F: Fn(Vec<u8>) -> Result<Box<dyn ReplayArchive>, ExtractionError> + Send + Sync,
{
    fn open(&self, contents: Vec<u8>) -> Result<Box<dyn ReplayArchive>, ExtractionError> {
        self(contents)
    }
}

/// Already unpacked archive held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    header: Vec<u8>,
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryArchive {
    pub fn new(header: impl Into<Vec<u8>>) -> Self {
        Self {
            header: header.into(),
            entries: HashMap::new(),
        }
    }

    pub fn with_entry(mut self, name: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert_entry(name, contents);
        self
    }

    pub fn insert_entry(&mut self, name: &str, contents: impl Into<Vec<u8>>) {
        self.entries.insert(name.to_string(), contents.into());
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl ReplayArchive for MemoryArchive {
    fn user_data_header(&self) -> &[u8] {
        &self.header
    }

    fn read_entry(&self, name: &str) -> Result<Vec<u8>, ExtractionError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| ExtractionError::EntryNotFound(name.to_string()))
    }
}
