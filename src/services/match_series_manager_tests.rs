// src/services/match_series_manager_tests.rs
//
// Match Series Manager Tests
//
// Every test starts from the same three series:
//   q1: no bans
//   q2: anduin, blaze
//   q3: brightwing, deathwing
//
// INVARIANTS TESTED:
// - A series reads back exactly its pre-bans
// - Edit keys are unique per series
// - Without the right edit key nothing changes
// - Ban pass runs before unban pass
// - Cho and Gall are always banned together after an update

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use uuid::Uuid;

    use crate::db::{create_test_pool, get_connection, initialize_database};
    use crate::domain::{DomainError, HeroCatalog, HeroId, MatchSeries};
    use crate::error::AppError;
    use crate::events::{EventBus, HeroBansUpdated};
    use crate::integrations::replay::{
        DecodedValue, ExtractionError, MemoryArchive, MockProtocolResolver, MockReplayDecoder,
        ReplayArchive, ReplayDecoder, ReplaySource, UNSUCCESSFUL_EXTRACTION_MESSAGE,
    };
    use crate::repositories::{MatchSeriesRepository, SqliteMatchSeriesRepository};
    use crate::services::{EditPermission, MatchSeriesManager, ReplayHeroExtractor};

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    struct Fixture {
        repo: Arc<dyn MatchSeriesRepository>,
        catalog: Arc<HeroCatalog>,
        event_bus: Arc<EventBus>,
        series: Vec<MatchSeries>,
    }

    fn heroes(ids: &[&str]) -> BTreeSet<HeroId> {
        ids.iter().map(|id| HeroId::from(*id)).collect()
    }

    fn pre_bans() -> Vec<(&'static str, BTreeSet<HeroId>)> {
        vec![
            ("q1", heroes(&[])),
            ("q2", heroes(&["anduin", "blaze"])),
            ("q3", heroes(&["brightwing", "deathwing"])),
        ]
    }

    fn setup() -> Fixture {
        let pool = Arc::new(create_test_pool().unwrap());
        initialize_database(&get_connection(&pool).unwrap()).unwrap();

        let catalog = Arc::new(HeroCatalog::load_embedded().unwrap());
        let repo: Arc<dyn MatchSeriesRepository> = Arc::new(SqliteMatchSeriesRepository::new(
            pool,
            Arc::clone(&catalog),
        ));
        let event_bus = Arc::new(EventBus::new());

        let series = pre_bans()
            .into_iter()
            .map(|(name, banned)| {
                MatchSeriesManager::create_new(
                    repo.as_ref(),
                    &catalog,
                    &event_bus,
                    name.to_string(),
                    &banned,
                )
                .unwrap()
            })
            .collect();

        Fixture {
            repo,
            catalog,
            event_bus,
            series,
        }
    }

    impl Fixture {
        fn open(&self, id: Uuid, edit_key: Option<&str>) -> MatchSeriesManager {
            MatchSeriesManager::open(
                Arc::clone(&self.repo),
                Arc::clone(&self.catalog),
                Arc::clone(&self.event_bus),
                id,
                edit_key,
            )
            .unwrap()
        }

        /// Manager holding the series' real edit key
        fn editor(&self, index: usize) -> MatchSeriesManager {
            let series = &self.series[index];
            self.open(series.id, Some(&series.edit_key.to_string()))
        }

        fn viewer(&self, index: usize) -> MatchSeriesManager {
            self.open(self.series[index].id, None)
        }
    }

    fn banned(manager: &MatchSeriesManager) -> BTreeSet<HeroId> {
        manager.banned_heroes().cloned().collect()
    }

    // ========================================================================
    // CREATION
    // ========================================================================

    #[test]
    fn test_series_read_back_their_pre_bans() {
        let fixture = setup();

        for (index, (name, expected)) in pre_bans().into_iter().enumerate() {
            let manager = fixture.viewer(index);

            assert_eq!(manager.match_series().name, name);
            assert_eq!(banned(&manager), expected);
        }
    }

    #[test]
    fn test_unique_edit_keys() {
        let fixture = setup();

        let keys: BTreeSet<Uuid> = fixture.series.iter().map(|series| series.edit_key).collect();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_create_emits_event() {
        let fixture = setup();

        let created: Vec<_> = fixture
            .event_bus
            .get_event_log()
            .into_iter()
            .filter(|entry| entry.event_type == "MatchSeriesCreated")
            .collect();
        assert_eq!(created.len(), 3);
    }

    #[test]
    fn test_create_does_not_pair_pre_bans() {
        let fixture = setup();

        let series = MatchSeriesManager::create_new(
            fixture.repo.as_ref(),
            &fixture.catalog,
            &fixture.event_bus,
            "cho only".to_string(),
            &heroes(&["cho"]),
        )
        .unwrap();

        assert!(series.is_banned("cho"));
        assert!(!series.is_banned("gall"));
    }

    #[test]
    fn test_create_rejects_unknown_hero() {
        let fixture = setup();

        let result = MatchSeriesManager::create_new(
            fixture.repo.as_ref(),
            &fixture.catalog,
            &fixture.event_bus,
            "typo".to_string(),
            &heroes(&["anduinn"]),
        );

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::UnknownHero(_)))
        ));
    }

    #[test]
    fn test_create_rejects_long_name() {
        let fixture = setup();

        let result = MatchSeriesManager::create_new(
            fixture.repo.as_ref(),
            &fixture.catalog,
            &fixture.event_bus,
            "x".repeat(51),
            &heroes(&[]),
        );

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvariantViolation(_)))
        ));
    }

    // ========================================================================
    // PERMISSIONS
    // ========================================================================

    #[test]
    fn test_open_missing_series_is_not_found() {
        let fixture = setup();

        let result = MatchSeriesManager::open(
            Arc::clone(&fixture.repo),
            Arc::clone(&fixture.catalog),
            Arc::clone(&fixture.event_bus),
            Uuid::new_v4(),
            None,
        );

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_permission_is_fixed_at_open() {
        let fixture = setup();

        assert_eq!(fixture.editor(0).permission(), EditPermission::Authorized);
        assert_eq!(fixture.viewer(0).permission(), EditPermission::ReadOnly);

        let other_key = fixture.series[1].edit_key.to_string();
        let manager = fixture.open(fixture.series[0].id, Some(&other_key));
        assert!(!manager.can_edit());
    }

    #[test]
    fn test_raise_on_unlawful_edit_attempt() {
        let fixture = setup();

        for (index, (_, expected)) in pre_bans().into_iter().enumerate() {
            let mut manager = fixture.viewer(index);

            let result = manager.set_hero_bans(&heroes(&["anduin", "qhira"]), &heroes(&[]));
            assert!(matches!(result, Err(AppError::PermissionDenied)));
            assert_eq!(banned(&manager), expected);
        }

        for (index, (_, expected)) in pre_bans().into_iter().enumerate() {
            let mut manager = fixture.open(fixture.series[index].id, Some("wrong_key"));

            let result = manager.set_hero_bans(&heroes(&[]), &heroes(&["anduin", "qhira"]));
            assert!(matches!(result, Err(AppError::PermissionDenied)));
            assert_eq!(banned(&fixture.viewer(index)), expected);
        }

        let rejected = fixture
            .event_bus
            .get_event_log()
            .into_iter()
            .filter(|entry| entry.event_type == "HeroBanRejected")
            .count();
        assert_eq!(rejected, 6);
    }

    #[test]
    fn test_edit_key_with_whitespace_is_accepted() {
        let fixture = setup();
        let key = format!("  {}\n", fixture.series[0].edit_key);

        assert!(fixture.open(fixture.series[0].id, Some(&key)).can_edit());
    }

    // ========================================================================
    // BAN UPDATES
    // ========================================================================

    #[test]
    fn test_bans() {
        let fixture = setup();

        let mut manager = fixture.editor(0);
        manager.set_hero_bans(&heroes(&["rexxar"]), &heroes(&[])).unwrap();
        assert_eq!(banned(&manager), heroes(&["rexxar"]));

        assert_eq!(banned(&fixture.viewer(0)), heroes(&["rexxar"]));

        let mut manager = fixture.editor(1);
        manager
            .set_hero_bans(&heroes(&["anduin", "probius"]), &heroes(&[]))
            .unwrap();
        assert_eq!(banned(&manager), heroes(&["anduin", "probius", "blaze"]));
    }

    #[test]
    fn test_unbans() {
        let fixture = setup();

        let mut manager = fixture.editor(2);
        manager
            .set_hero_bans(&heroes(&[]), &heroes(&["brightwing", "blaze"]))
            .unwrap();
        assert_eq!(banned(&manager), heroes(&["deathwing"]));

        let mut manager = fixture.editor(2);
        manager.set_hero_bans(&heroes(&[]), &heroes(&[])).unwrap();
        assert_eq!(banned(&manager), heroes(&["deathwing"]));
    }

    #[test]
    fn test_bans_unbans() {
        let fixture = setup();

        let mut manager = fixture.editor(2);
        manager
            .set_hero_bans(
                &heroes(&["brightwing", "anduin"]),
                &heroes(&["brightwing", "blaze"]),
            )
            .unwrap();
        assert_eq!(banned(&manager), heroes(&["deathwing", "anduin"]));

        let mut manager = fixture.editor(2);
        manager
            .set_hero_bans(&heroes(&["deathwing"]), &heroes(&["deathwing"]))
            .unwrap();
        assert_eq!(banned(&manager), heroes(&["anduin"]));
    }

    #[test]
    fn test_unknown_hero_changes_nothing() {
        let fixture = setup();

        let mut manager = fixture.editor(1);
        let result = manager.set_hero_bans(&heroes(&["rexxar", "notahero"]), &heroes(&[]));

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::UnknownHero(_)))
        ));
        assert_eq!(banned(&fixture.viewer(1)), heroes(&["anduin", "blaze"]));
    }

    #[test]
    fn test_update_emits_diff() {
        let fixture = setup();
        let updates = Arc::new(std::sync::Mutex::new(Vec::new()));

        let sink = Arc::clone(&updates);
        fixture
            .event_bus
            .subscribe::<HeroBansUpdated, _>(move |event| {
                sink.lock().unwrap().push(event.clone());
            });

        let mut manager = fixture.editor(1);
        manager
            .set_hero_bans(&heroes(&["probius"]), &heroes(&["blaze"]))
            .unwrap();

        let updates = updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].series_id, fixture.series[1].id);
        assert_eq!(updates[0].banned, vec![HeroId::from("probius")]);
        assert_eq!(updates[0].unbanned, vec![HeroId::from("blaze")]);
        assert!(!updates[0].paired_correction);
    }

    #[test]
    fn test_concurrent_managers_do_not_lose_updates() {
        let fixture = setup();

        let mut first = fixture.editor(0);
        let mut second = fixture.editor(0);

        first.set_hero_bans(&heroes(&["rexxar"]), &heroes(&[])).unwrap();
        second.set_hero_bans(&heroes(&["valla"]), &heroes(&[])).unwrap();

        assert_eq!(banned(&second), heroes(&["rexxar", "valla"]));
        assert_eq!(banned(&fixture.viewer(0)), heroes(&["rexxar", "valla"]));
    }

    // ========================================================================
    // PAIRED HEROES
    // ========================================================================

    #[test]
    fn test_cho_gall() {
        let fixture = setup();
        let mut manager = fixture.editor(2);

        manager.set_hero_bans(&heroes(&["cho"]), &heroes(&[])).unwrap();
        assert_eq!(
            banned(&manager),
            heroes(&["deathwing", "brightwing", "cho", "gall"])
        );

        // Gall is unbanned alone while Cho stays banned, so the pair is restored
        manager
            .set_hero_bans(&heroes(&["blaze"]), &heroes(&["gall"]))
            .unwrap();
        assert_eq!(
            banned(&manager),
            heroes(&["deathwing", "brightwing", "blaze", "cho", "gall"])
        );

        manager
            .set_hero_bans(&heroes(&["cho", "gall"]), &heroes(&[]))
            .unwrap();
        assert_eq!(
            banned(&manager),
            heroes(&["deathwing", "brightwing", "cho", "gall", "blaze"])
        );

        manager
            .set_hero_bans(&heroes(&["anduin"]), &heroes(&["cho", "gall"]))
            .unwrap();
        assert_eq!(
            banned(&manager),
            heroes(&["deathwing", "brightwing", "blaze", "anduin"])
        );
    }

    #[test]
    fn test_banning_gall_bans_cho() {
        let fixture = setup();
        let mut manager = fixture.editor(0);

        manager.set_hero_bans(&heroes(&["gall"]), &heroes(&[])).unwrap();

        assert_eq!(banned(&manager), heroes(&["cho", "gall"]));
        assert_eq!(banned(&fixture.viewer(0)), heroes(&["cho", "gall"]));
    }

    #[test]
    fn test_first_update_pairs_pre_banned_cho() {
        let fixture = setup();
        let series = MatchSeriesManager::create_new(
            fixture.repo.as_ref(),
            &fixture.catalog,
            &fixture.event_bus,
            "cho only".to_string(),
            &heroes(&["cho"]),
        )
        .unwrap();

        let mut manager = fixture.open(series.id, Some(&series.edit_key.to_string()));
        manager.set_hero_bans(&heroes(&[]), &heroes(&[])).unwrap();

        assert_eq!(banned(&manager), heroes(&["cho", "gall"]));
    }

    // ========================================================================
    // BANS FROM REPLAYS
    // ========================================================================

    fn replay_extractor(fixture: &Fixture, spawn_keys: &'static [&'static str]) -> ReplayHeroExtractor {
        let archive = MemoryArchive::new(Vec::new())
            .with_entry("replay.details", Vec::new())
            .with_entry("replay.tracker.events", Vec::new());

        let opener = move |contents: Vec<u8>| -> Result<Box<dyn ReplayArchive>, ExtractionError> {
            if contents.is_empty() {
                return Err(ExtractionError::Container("empty file".to_string()));
            }
            Ok(Box::new(archive.clone()))
        };

        let mut decoder = MockReplayDecoder::new();
        decoder
            .expect_decode_details()
            .returning(|_| Ok(DecodedValue::map([("m_playerList", DecodedValue::List(Vec::new()))])));
        decoder.expect_decode_tracker_events().returning(move |_| {
            Ok(spawn_keys
                .iter()
                .map(|key| {
                    DecodedValue::map([
                        ("m_eventName", DecodedValue::bytes("PlayerSpawned")),
                        (
                            "m_stringData",
                            DecodedValue::List(vec![DecodedValue::map([(
                                "m_value",
                                DecodedValue::bytes(key),
                            )])]),
                        ),
                    ])
                })
                .collect())
        });
        let decoder: Arc<dyn ReplayDecoder> = Arc::new(decoder);

        let mut resolver = MockProtocolResolver::new();
        resolver.expect_decode_header().returning(|_| {
            Ok(DecodedValue::map([(
                "m_version",
                DecodedValue::map([("m_baseBuild", DecodedValue::Int(91756))]),
            )]))
        });
        resolver
            .expect_resolve_decoder()
            .returning(move |_| Ok(Arc::clone(&decoder)));

        ReplayHeroExtractor::new(
            Arc::new(opener),
            Arc::new(resolver),
            Arc::clone(&fixture.catalog),
            Arc::clone(&fixture.event_bus),
        )
    }

    static MATCH_SPAWN_KEYS: [&str; 10] = [
        "Abathur", "Alarak", "Anduin", "Arthas", "Firebat", "Cho", "Gall", "Rexxar", "Deathwing",
        "Probius",
    ];

    #[test]
    fn test_ban_from_replays() {
        let fixture = setup();
        let extractor = replay_extractor(&fixture, &MATCH_SPAWN_KEYS);
        let mut manager = fixture.editor(0);

        let from_replays = manager
            .ban_from_replays(
                &extractor,
                vec![ReplaySource::Bytes(b"replay".to_vec())],
                &heroes(&["valla"]),
                &heroes(&["abathur"]),
            )
            .unwrap();

        assert_eq!(from_replays.len(), 10);
        assert_eq!(
            banned(&manager),
            heroes(&[
                "alarak", "anduin", "arthas", "blaze", "cho", "gall", "rexxar", "deathwing",
                "probius", "valla",
            ])
        );
    }

    #[test]
    fn test_ban_from_replays_aborts_on_first_failure() {
        let fixture = setup();
        let extractor = replay_extractor(&fixture, &MATCH_SPAWN_KEYS);
        let mut manager = fixture.editor(1);

        let result = manager.ban_from_replays(
            &extractor,
            vec![
                ReplaySource::Bytes(b"replay".to_vec()),
                ReplaySource::Bytes(Vec::new()),
            ],
            &heroes(&["valla"]),
            &heroes(&[]),
        );

        match result {
            Err(AppError::Extraction(message)) => {
                assert_eq!(message, "Could not read replay container: empty file")
            }
            other => panic!("expected extraction error, got {:?}", other.map(|_| ())),
        }
        assert_eq!(banned(&fixture.viewer(1)), heroes(&["anduin", "blaze"]));
    }

    #[test]
    fn test_ban_from_incomplete_replay_fails() {
        let fixture = setup();
        let extractor = replay_extractor(&fixture, &MATCH_SPAWN_KEYS[..9]);
        let mut manager = fixture.editor(0);

        let result = manager.ban_from_replays(
            &extractor,
            vec![ReplaySource::Bytes(b"replay".to_vec())],
            &heroes(&[]),
            &heroes(&[]),
        );

        assert!(matches!(
            result,
            Err(AppError::Extraction(message)) if message == UNSUCCESSFUL_EXTRACTION_MESSAGE
        ));
        assert!(banned(&manager).is_empty());
    }

    #[test]
    fn test_read_only_manager_does_not_read_replays() {
        let fixture = setup();
        let extractor = replay_extractor(&fixture, &MATCH_SPAWN_KEYS);
        let mut manager = fixture.viewer(0);

        let result = manager.ban_from_replays(
            &extractor,
            vec![ReplaySource::Bytes(b"replay".to_vec())],
            &heroes(&[]),
            &heroes(&[]),
        );

        assert!(matches!(result, Err(AppError::PermissionDenied)));
        assert!(fixture
            .event_bus
            .get_event_log()
            .iter()
            .all(|entry| entry.event_type != "ReplayHeroesExtracted"));
    }
}
