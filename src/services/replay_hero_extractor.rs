// src/services/replay_hero_extractor.rs
//
// Replay Hero Extractor
//
// Turns a replay file into the ten heroes that were played in it.
//
// FLOW:
// 1. Open the container and decode its header with the latest protocol
// 2. Resolve the decoder for the replay's base build
// 3. Read heroes from the details entry; done if there are ten
// 4. Otherwise read them from the tracker events; done if there are ten
// 5. Otherwise fail with the fixed "please report this" message
//
// Every error on the way ends up as a single message string. Callers never see
// a partial hero list.

use std::sync::Arc;

use crate::domain::{
    CrossValidation, ExtractedHeroes, ExtractionResult, ExtractionStrategy, HeroCatalog, HeroFilter,
    HEROES_PER_REPLAY,
};
use crate::events::{EventBus, ReplayExtractionFailed, ReplayHeroesExtracted};
use crate::integrations::replay::{
    ArchiveOpener, ExtractionError, ProtocolResolver, ReplayArchive, ReplayDecoder, ReplayHeader,
    ReplaySource,
};

use super::extraction_strategies::{heroes_from_details, heroes_from_tracker_events};

/// An opened replay with the decoder for its build
struct OpenedReplay {
    archive: Box<dyn ReplayArchive>,
    decoder: Arc<dyn ReplayDecoder>,
}

pub struct ReplayHeroExtractor {
    opener: Arc<dyn ArchiveOpener>,
    resolver: Arc<dyn ProtocolResolver>,
    catalog: Arc<HeroCatalog>,
    event_bus: Arc<EventBus>,
}

impl ReplayHeroExtractor {
    pub fn new(
        opener: Arc<dyn ArchiveOpener>,
        resolver: Arc<dyn ProtocolResolver>,
        catalog: Arc<HeroCatalog>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            opener,
            resolver,
            catalog,
            event_bus,
        }
    }

    /// Extract the ten heroes of a replay, or a user-facing failure message
    pub fn extract_heroes(&self, source: impl Into<ReplaySource>) -> ExtractionResult {
        let source = source.into();
        let description = source.describe();

        match self.try_extract(source) {
            Ok(extracted) => {
                log::info!(
                    "Extracted {} heroes from {} using {}",
                    extracted.heroes().len(),
                    description,
                    extracted.strategy()
                );
                self.event_bus.emit(ReplayHeroesExtracted::new(
                    extracted.heroes().to_vec(),
                    extracted.strategy(),
                ));
                ExtractionResult::Success(extracted)
            }
            Err(err) => {
                let message = err.to_string();
                log::warn!("Hero extraction failed for {}: {:?}", description, err);
                self.event_bus.emit(ReplayExtractionFailed::new(message.clone()));
                ExtractionResult::Failure(message)
            }
        }
    }

    /// Same as `extract_heroes`, keeping the error kind
    pub fn try_extract(&self, source: ReplaySource) -> Result<ExtractedHeroes, ExtractionError> {
        let replay = self.open(source)?;

        let heroes = heroes_from_details(
            replay.archive.as_ref(),
            replay.decoder.as_ref(),
            &self.catalog,
            HeroFilter::CatalogOnly,
        )?;
        if let Some(extracted) = ExtractedHeroes::new(heroes, ExtractionStrategy::Details) {
            return Ok(extracted);
        }

        log::debug!("Details did not yield {} heroes, scanning tracker events", HEROES_PER_REPLAY);

        let heroes = heroes_from_tracker_events(
            replay.archive.as_ref(),
            replay.decoder.as_ref(),
            &self.catalog,
            HeroFilter::CatalogOnly,
        )?;
        let found = heroes.len();

        ExtractedHeroes::new(heroes, ExtractionStrategy::TrackerEvents)
            .ok_or(ExtractionError::Incomplete { found })
    }

    /// Run both strategies unfiltered so their results can be compared
    pub fn cross_validate(&self, source: impl Into<ReplaySource>) -> Result<CrossValidation, ExtractionError> {
        let replay = self.open(source.into())?;

        let details = heroes_from_details(
            replay.archive.as_ref(),
            replay.decoder.as_ref(),
            &self.catalog,
            HeroFilter::Unfiltered,
        )?;
        let tracker_events = heroes_from_tracker_events(
            replay.archive.as_ref(),
            replay.decoder.as_ref(),
            &self.catalog,
            HeroFilter::Unfiltered,
        )?;

        Ok(CrossValidation {
            details,
            tracker_events,
        })
    }

    /// Read the header of a replay without extracting heroes
    pub fn read_header(&self, source: impl Into<ReplaySource>) -> Result<ReplayHeader, ExtractionError> {
        let contents = source.into().into_bytes()?;
        let archive = self.opener.open(contents)?;
        self.decode_header(archive.as_ref())
    }

    fn open(&self, source: ReplaySource) -> Result<OpenedReplay, ExtractionError> {
        let contents = source.into_bytes()?;
        let archive = self.opener.open(contents)?;
        let header = self.decode_header(archive.as_ref())?;
        let decoder = self.resolver.resolve_decoder(header.base_build)?;

        Ok(OpenedReplay { archive, decoder })
    }

    fn decode_header(&self, archive: &dyn ReplayArchive) -> Result<ReplayHeader, ExtractionError> {
        let decoded = self.resolver.decode_header(archive.user_data_header())?;
        ReplayHeader::from_decoded(&decoded)
    }
}
