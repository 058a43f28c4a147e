// src/integrations/replay/mod.rs
//
// Replay container and protocol boundary
//
// ARCHITECTURE:
// - This is INFRASTRUCTURE, not DOMAIN
// - Container parsing and per-build protocol decoding live behind traits
// - The extractor service only sees header blobs, named entries and DecodedValue trees

pub mod archive;
pub mod error;
pub mod protocol;
pub mod source;
pub mod value;

pub use archive::{ArchiveOpener, MemoryArchive, ReplayArchive};
pub use error::{ExtractionError, UNSUCCESSFUL_EXTRACTION_MESSAGE};
pub use protocol::{ProtocolResolver, ReplayDecoder, ReplayHeader};
pub use source::{ReplaySource, REPLAY_EXTENSION};
pub use value::DecodedValue;

#[cfg(test)]
pub use protocol::{MockProtocolResolver, MockReplayDecoder};
