// src/integrations/replay/protocol.rs
//
// Per-build protocol decoding
//
// Every game build has its own binary protocol. The resolver decodes the replay
// header with the newest protocol it knows, which yields the base build; the
// matching decoder then reads the remaining entries.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use super::error::ExtractionError;
use super::value::DecodedValue;

#[cfg_attr(test, automock)]
pub trait ReplayDecoder: Send + Sync {
    /// Decode the `replay.details` entry
    fn decode_details(&self, contents: &[u8]) -> Result<DecodedValue, ExtractionError>;

    /// Decode the `replay.tracker.events` entry into ordered events
    fn decode_tracker_events(&self, contents: &[u8]) -> Result<Vec<DecodedValue>, ExtractionError>;
}

#[cfg_attr(test, automock)]
pub trait ProtocolResolver: Send + Sync {
    /// Decode the archive's user-data header
    fn decode_header(&self, contents: &[u8]) -> Result<DecodedValue, ExtractionError>;

    /// Decoder for a base build.
    ///
    /// Fails with `ExtractionError::UnsupportedBuild` when no protocol matches.
    fn resolve_decoder(&self, base_build: u32) -> Result<Arc<dyn ReplayDecoder>, ExtractionError>;
}

/// The parts of the replay header the extractor needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayHeader {
    pub base_build: u32,
    pub elapsed_game_loops: Option<u64>,
}

impl ReplayHeader {
    pub fn from_decoded(header: &DecodedValue) -> Result<Self, ExtractionError> {
        let base_build = header
            .path(&["m_version", "m_baseBuild"])
            .and_then(DecodedValue::as_int)
            .ok_or_else(|| ExtractionError::Decode("replay header has no base build".to_string()))?;

        let base_build = u32::try_from(base_build)
            .map_err(|_| ExtractionError::Decode(format!("invalid base build {}", base_build)))?;

        let elapsed_game_loops = header
            .get("m_elapsedGameLoops")
            .and_then(DecodedValue::as_int)
            .and_then(|loops| u64::try_from(loops).ok());

        Ok(Self {
            base_build,
            elapsed_game_loops,
        })
    }
}
