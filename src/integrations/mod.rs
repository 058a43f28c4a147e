// src/integrations/mod.rs
//
// External Integrations Module

pub mod replay;

pub use replay::{
    ArchiveOpener, DecodedValue, ExtractionError, MemoryArchive, ProtocolResolver, ReplayArchive,
    ReplayDecoder, ReplayHeader, ReplaySource,
};
