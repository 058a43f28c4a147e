// src/services/match_series_manager.rs
//
// Match Series Manager
//
// Gatekeeper for ban changes on one series. The edit permission is decided once,
// when the manager is opened, by comparing the supplied edit key with the stored
// one. A read-only manager can look but every mutation fails as a whole.
//
// ORDER OF A BAN UPDATE:
// 1. Permission check
// 2. Every requested hero must be in the catalog
// 3. Ban pass, then unban pass (unban wins when a hero is in both)
// 4. Paired-hero correction
// 5. Commit, then emit HeroBansUpdated

use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    validate_match_series, DomainError, HeroCatalog, HeroId, MatchSeries,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, HeroBanRejected, HeroBansUpdated, MatchSeriesCreated};
use crate::integrations::replay::ReplaySource;
use crate::repositories::MatchSeriesRepository;

use super::replay_hero_extractor::ReplayHeroExtractor;

/// What a manager is allowed to do, fixed when it is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPermission {
    Authorized,
    ReadOnly,
}

pub struct MatchSeriesManager {
    repo: Arc<dyn MatchSeriesRepository>,
    catalog: Arc<HeroCatalog>,
    event_bus: Arc<EventBus>,
    series: MatchSeries,
    permission: EditPermission,
}

impl MatchSeriesManager {
    /// Open an existing series.
    ///
    /// Without an edit key, or with a wrong one, the manager is read-only.
    pub fn open(
        repo: Arc<dyn MatchSeriesRepository>,
        catalog: Arc<HeroCatalog>,
        event_bus: Arc<EventBus>,
        id: Uuid,
        edit_key: Option<&str>,
    ) -> AppResult<Self> {
        let series = repo.find_by_id(id)?.ok_or(AppError::NotFound)?;

        let permission = match edit_key {
            Some(key) if series.edit_key_matches(key) => EditPermission::Authorized,
            _ => EditPermission::ReadOnly,
        };

        log::debug!("Opened match series {} ({:?})", id, permission);

        Ok(Self {
            repo,
            catalog,
            event_bus,
            series,
            permission,
        })
    }

    /// Create and persist a new series with the given heroes already banned.
    ///
    /// Pre-bans are taken as they are; the paired-hero rule is applied by the
    /// first ban update.
    pub fn create_new(
        repo: &dyn MatchSeriesRepository,
        catalog: &HeroCatalog,
        event_bus: &EventBus,
        name: String,
        pre_banned: &BTreeSet<HeroId>,
    ) -> AppResult<MatchSeries> {
        let mut series = MatchSeries::new(name, catalog);
        for hero in pre_banned {
            series.ban(hero)?;
        }

        validate_match_series(&series, catalog)?;
        repo.create(&series)?;

        log::info!(
            "Created match series {} '{}' with {} pre-banned heroes",
            series.id,
            series.name,
            pre_banned.len()
        );

        event_bus.emit(MatchSeriesCreated::new(
            series.id,
            series.name.clone(),
            pre_banned.len(),
        ));

        Ok(series)
    }

    /// Ban `to_ban`, then unban `to_unban`, then apply the paired-hero rule.
    ///
    /// All or nothing: a read-only manager or an unknown hero leaves the series
    /// untouched.
    pub fn set_hero_bans(
        &mut self,
        to_ban: &BTreeSet<HeroId>,
        to_unban: &BTreeSet<HeroId>,
    ) -> AppResult<()> {
        self.ensure_can_edit()?;

        if let Some(unknown) = to_ban
            .iter()
            .chain(to_unban)
            .find(|hero| !self.catalog.contains(hero.as_str()))
        {
            return Err(DomainError::UnknownHero(unknown.to_string()).into());
        }

        let mut before = BTreeSet::new();
        let mut paired_correction = false;

        let updated = self.repo.modify(
            self.series.id,
            &mut |series: &mut MatchSeries| -> AppResult<()> {
                before = series.banned_heroes().cloned().collect();

                for hero in to_ban {
                    series.ban(hero)?;
                }
                for hero in to_unban {
                    series.unban(hero)?;
                }
                paired_correction = series.enforce_hero_pairing();

                Ok(())
            },
        )?;

        let after: BTreeSet<HeroId> = updated.banned_heroes().cloned().collect();
        let banned: Vec<HeroId> = after.difference(&before).cloned().collect();
        let unbanned: Vec<HeroId> = before.difference(&after).cloned().collect();

        log::info!(
            "Updated bans of match series {}: +{} -{} ({} banned)",
            updated.id,
            banned.len(),
            unbanned.len(),
            after.len()
        );
        if paired_correction {
            log::debug!("Paired-hero rule changed bans of match series {}", updated.id);
        }

        self.series = updated;
        self.event_bus.emit(HeroBansUpdated::new(
            self.series.id,
            banned,
            unbanned,
            paired_correction,
        ));

        Ok(())
    }

    /// Ban every hero played in `replays`, plus `extra_bans`, then unban `unbans`.
    ///
    /// All replays are read before anything changes. The first replay that
    /// cannot be read aborts the update with its message.
    pub fn ban_from_replays<I>(
        &mut self,
        extractor: &ReplayHeroExtractor,
        replays: I,
        extra_bans: &BTreeSet<HeroId>,
        unbans: &BTreeSet<HeroId>,
    ) -> AppResult<BTreeSet<HeroId>>
    where
        I: IntoIterator<Item = ReplaySource>,
    {
        self.ensure_can_edit()?;

        let mut from_replays = BTreeSet::new();
        for replay in replays {
            let heroes = extractor
                .extract_heroes(replay)
                .into_result()
                .map_err(AppError::Extraction)?;
            from_replays.extend(heroes.into_heroes());
        }

        let to_ban: BTreeSet<HeroId> = from_replays.union(extra_bans).cloned().collect();
        self.set_hero_bans(&to_ban, unbans)?;

        Ok(from_replays)
    }

    /// Reject an edit from a read-only manager, recording the attempt
    pub fn ensure_can_edit(&self) -> AppResult<()> {
        if self.can_edit() {
            return Ok(());
        }

        log::warn!("Rejected ban update for match series {}", self.series.id);
        self.event_bus.emit(HeroBanRejected::new(self.series.id));
        Err(AppError::PermissionDenied)
    }

    pub fn match_series(&self) -> &MatchSeries {
        &self.series
    }

    pub fn permission(&self) -> EditPermission {
        self.permission
    }

    pub fn can_edit(&self) -> bool {
        self.permission == EditPermission::Authorized
    }

    /// Banned heroes of the series as last read or written by this manager
    pub fn banned_heroes(&self) -> impl Iterator<Item = &HeroId> + '_ {
        self.series.banned_heroes()
    }
}
