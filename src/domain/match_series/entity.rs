use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::hero::{HeroCatalog, HeroId};
use crate::domain::{DomainError, DomainResult};

/// Heroes that are always banned together.
///
/// In game they are played by two people sharing one pick slot, so banning one of
/// them takes the other out of the draft as well.
pub const PAIRED_HEROES: [&str; 2] = ["cho", "gall"];

/// A series of matches with its own hero ban list.
///
/// The ban state is an explicit mapping holding one flag per catalog hero. The
/// mapping's keys are fixed at construction and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSeries {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Display name ("ASH vs. Raiders")
    pub name: String,

    /// Secret required to change bans
    pub edit_key: Uuid,

    banned: BTreeMap<HeroId, bool>,
}

impl MatchSeries {
    /// Create a new series with no bans and fresh identifiers
    pub fn new(name: String, catalog: &HeroCatalog) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            name,
            edit_key: Uuid::new_v4(),
            banned: catalog.ids().map(|id| (id.clone(), false)).collect(),
        }
    }

    /// Rebuild a stored series.
    ///
    /// Every current catalog hero gets a flag; banned ids that are no longer in the
    /// catalog are dropped.
    pub fn from_parts<I>(
        id: Uuid,
        created_at: DateTime<Utc>,
        name: String,
        edit_key: Uuid,
        banned_ids: I,
        catalog: &HeroCatalog,
    ) -> Self
    where
        I: IntoIterator<Item = HeroId>,
    {
        let mut banned: BTreeMap<HeroId, bool> =
            catalog.ids().map(|id| (id.clone(), false)).collect();

        for hero in banned_ids {
            if let Some(flag) = banned.get_mut(&hero) {
                *flag = true;
            }
        }

        Self {
            id,
            created_at,
            name,
            edit_key,
            banned,
        }
    }

    pub(crate) fn ban(&mut self, hero: &HeroId) -> DomainResult<()> {
        self.set_flag(hero, true)
    }

    pub(crate) fn unban(&mut self, hero: &HeroId) -> DomainResult<()> {
        self.set_flag(hero, false)
    }

    fn set_flag(&mut self, hero: &HeroId, value: bool) -> DomainResult<()> {
        let flag = self
            .banned
            .get_mut(hero)
            .ok_or_else(|| DomainError::UnknownHero(hero.to_string()))?;
        *flag = value;
        Ok(())
    }

    /// Ban both paired heroes if either one is banned.
    ///
    /// Returns true when a flag had to be changed.
    pub(crate) fn enforce_hero_pairing(&mut self) -> bool {
        let any_banned = PAIRED_HEROES.iter().any(|hero| self.is_banned(hero));
        if !any_banned {
            return false;
        }

        let mut changed = false;
        for hero in PAIRED_HEROES {
            if let Some(flag) = self.banned.get_mut(hero) {
                changed |= !*flag;
                *flag = true;
            }
        }
        changed
    }

    /// Banned heroes in identifier order, read from the live flags
    pub fn banned_heroes(&self) -> impl Iterator<Item = &HeroId> + '_ {
        self.banned
            .iter()
            .filter(|(_, banned)| **banned)
            .map(|(hero, _)| hero)
    }

    /// Heroes that are still available, in identifier order
    pub fn available_heroes(&self) -> impl Iterator<Item = &HeroId> + '_ {
        self.banned
            .iter()
            .filter(|(_, banned)| !**banned)
            .map(|(hero, _)| hero)
    }

    pub fn banned_count(&self) -> usize {
        self.banned_heroes().count()
    }

    pub fn is_banned(&self, hero: &str) -> bool {
        self.banned.get(hero).copied().unwrap_or(false)
    }

    /// One flag per catalog hero
    pub fn ban_flags(&self) -> &BTreeMap<HeroId, bool> {
        &self.banned
    }

    /// Compare a supplied edit key with the stored one
    pub fn edit_key_matches(&self, supplied: &str) -> bool {
        Uuid::parse_str(supplied.trim())
            .map(|key| key == self.edit_key)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn catalog() -> HeroCatalog {
        HeroCatalog::load_embedded().unwrap()
    }

    fn banned(series: &MatchSeries) -> BTreeSet<String> {
        series.banned_heroes().map(|hero| hero.to_string()).collect()
    }

    #[test]
    fn test_new_series_has_a_flag_per_hero() {
        let catalog = catalog();
        let series = MatchSeries::new("ASH vs. Raiders".to_string(), &catalog);

        assert_eq!(series.ban_flags().len(), catalog.len());
        assert_eq!(series.banned_count(), 0);
        assert_eq!(series.available_heroes().count(), catalog.len());
    }

    #[test]
    fn test_ban_and_unban() {
        let catalog = catalog();
        let mut series = MatchSeries::new("q".to_string(), &catalog);

        series.ban(&HeroId::from("anduin")).unwrap();
        series.ban(&HeroId::from("blaze")).unwrap();
        assert_eq!(banned(&series), BTreeSet::from(["anduin", "blaze"].map(String::from)));

        series.unban(&HeroId::from("anduin")).unwrap();
        assert_eq!(banned(&series), BTreeSet::from(["blaze"].map(String::from)));
        assert!(series.is_banned("blaze"));
        assert!(!series.is_banned("anduin"));
    }

    #[test]
    fn test_unknown_hero_is_rejected_without_adding_a_flag() {
        let catalog = catalog();
        let mut series = MatchSeries::new("q".to_string(), &catalog);

        let err = series.ban(&HeroId::from("supermario")).unwrap_err();
        assert!(matches!(err, DomainError::UnknownHero(name) if name == "supermario"));
        assert_eq!(series.ban_flags().len(), catalog.len());
    }

    #[test]
    fn test_banned_heroes_reflects_live_state() {
        let catalog = catalog();
        let mut series = MatchSeries::new("q".to_string(), &catalog);

        assert_eq!(series.banned_heroes().count(), 0);
        series.ban(&HeroId::from("rexxar")).unwrap();
        assert_eq!(series.banned_heroes().count(), 1);
        assert_eq!(series.banned_heroes().count(), 1);
    }

    #[test]
    fn test_pairing_bans_partner() {
        let catalog = catalog();
        let mut series = MatchSeries::new("q".to_string(), &catalog);

        assert!(!series.enforce_hero_pairing());

        series.ban(&HeroId::from("gall")).unwrap();
        assert!(series.enforce_hero_pairing());
        assert!(series.is_banned("cho"));
        assert!(series.is_banned("gall"));

        assert!(!series.enforce_hero_pairing());
    }

    #[test]
    fn test_from_parts_fills_catalog_and_drops_unknown() {
        let catalog = catalog();
        let series = MatchSeries::from_parts(
            Uuid::new_v4(),
            Utc::now(),
            "stored".to_string(),
            Uuid::new_v4(),
            vec![HeroId::from("deathwing"), HeroId::from("retiredhero")],
            &catalog,
        );

        assert_eq!(series.ban_flags().len(), catalog.len());
        assert_eq!(banned(&series), BTreeSet::from(["deathwing"].map(String::from)));
    }

    #[test]
    fn test_edit_key_matching() {
        let series = MatchSeries::new("q".to_string(), &catalog());

        assert!(series.edit_key_matches(&series.edit_key.to_string()));
        assert!(series.edit_key_matches(&format!(" {} ", series.edit_key)));
        assert!(!series.edit_key_matches("wrong_key"));
        assert!(!series.edit_key_matches(&Uuid::new_v4().to_string()));
        assert!(!series.edit_key_matches(""));
    }
}
