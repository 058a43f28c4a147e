// src/services/extraction_strategies.rs
//
// Hero extraction strategies
//
// Two independent ways to read the ten heroes out of a decoded replay:
//
// - details: hero display names from the player list. Cheap, but the names are
//   localized and occasionally missing.
// - tracker events: the `PlayerSpawned` events carry a language-independent hero
//   key. Needs a scan of the event log, which can be long, so it stops at the
//   tenth hero.
//
// Both return whatever they found; deciding whether that is enough is the
// extractor's job.

use crate::domain::{HeroCatalog, HeroFilter, HeroId, HEROES_PER_REPLAY};
use crate::integrations::replay::{DecodedValue, ExtractionError, ReplayArchive, ReplayDecoder};

pub const DETAILS_ENTRY: &str = "replay.details";
pub const TRACKER_EVENTS_ENTRY: &str = "replay.tracker.events";

const PLAYER_SPAWNED_EVENT: &str = "PlayerSpawned";

/// Heroes named in the replay's player list, in player order
pub fn heroes_from_details(
    archive: &dyn ReplayArchive,
    decoder: &dyn ReplayDecoder,
    catalog: &HeroCatalog,
    filter: HeroFilter,
) -> Result<Vec<HeroId>, ExtractionError> {
    let contents = archive.read_entry(DETAILS_ENTRY)?;
    let details = decoder.decode_details(&contents)?;

    let players = details
        .get("m_playerList")
        .and_then(DecodedValue::as_list)
        .ok_or_else(|| ExtractionError::Decode("replay details have no player list".to_string()))?;

    let heroes = players
        .iter()
        .filter_map(|player| player.get("m_hero").and_then(DecodedValue::as_text))
        .map(|name| HeroId::canonicalize(&name))
        .filter(|hero| filter == HeroFilter::Unfiltered || catalog.contains(hero.as_str()))
        .collect();

    Ok(heroes)
}

/// Heroes announced by `PlayerSpawned` tracker events, in spawn order
pub fn heroes_from_tracker_events(
    archive: &dyn ReplayArchive,
    decoder: &dyn ReplayDecoder,
    catalog: &HeroCatalog,
    filter: HeroFilter,
) -> Result<Vec<HeroId>, ExtractionError> {
    let contents = archive.read_entry(TRACKER_EVENTS_ENTRY)?;
    let events = decoder.decode_tracker_events(&contents)?;

    let mut heroes = Vec::with_capacity(HEROES_PER_REPLAY);

    for event in events.iter().filter(|event| is_player_spawned(event)) {
        let Some(spawn_key) = spawned_hero_key(event) else {
            continue;
        };

        match catalog.hero_for_spawn_key(&spawn_key) {
            Some(hero) => heroes.push(hero.clone()),
            None if filter == HeroFilter::Unfiltered => heroes.push(HeroId::canonicalize(&spawn_key)),
            None => continue,
        }

        if heroes.len() == HEROES_PER_REPLAY {
            break;
        }
    }

    Ok(heroes)
}

fn is_player_spawned(event: &DecodedValue) -> bool {
    event
        .get("m_eventName")
        .and_then(DecodedValue::as_text)
        .is_some_and(|name| name == PLAYER_SPAWNED_EVENT)
}

/// The hero key is the value of the event's last string datum
fn spawned_hero_key(event: &DecodedValue) -> Option<String> {
    event
        .get("m_stringData")
        .and_then(DecodedValue::as_list)
        .and_then(|data| data.last())
        .and_then(|datum| datum.get("m_value"))
        .and_then(DecodedValue::as_text)
}
