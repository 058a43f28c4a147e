use super::entity::MatchSeries;
use crate::domain::hero::HeroCatalog;
use crate::domain::{DomainError, DomainResult};

/// Longest accepted series name, in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Validates all MatchSeries invariants
pub fn validate_match_series(series: &MatchSeries, catalog: &HeroCatalog) -> DomainResult<()> {
    validate_name(&series.name)?;
    validate_ban_flags(series, catalog)?;
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(DomainError::InvariantViolation(format!(
            "Series name is {} characters long, at most {} are allowed",
            length, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Flag keys must be exactly the catalog identifiers
fn validate_ban_flags(series: &MatchSeries, catalog: &HeroCatalog) -> DomainResult<()> {
    let flags = series.ban_flags();

    if let Some(extra) = flags.keys().find(|hero| !catalog.contains(hero.as_str())) {
        return Err(DomainError::InvariantViolation(format!(
            "Ban flag for unknown hero '{}'",
            extra
        )));
    }
    if let Some(missing) = catalog.ids().find(|hero| !flags.contains_key(*hero)) {
        return Err(DomainError::InvariantViolation(format!(
            "Missing ban flag for hero '{}'",
            missing
        )));
    }
    Ok(())
}

/// Invariants that must hold true for MatchSeries domain:
///
/// 1. Identity (UUID) and edit key are immutable
/// 2. There is exactly one ban flag per catalog hero
/// 3. Flags change only through an authorized ban update
/// 4. Name is at most 50 characters
/// 5. Created timestamp never changes

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_series() {
        let catalog = HeroCatalog::load_embedded().unwrap();
        let series = MatchSeries::new("ASH vs. Raiders".to_string(), &catalog);
        assert!(validate_match_series(&series, &catalog).is_ok());
    }

    #[test]
    fn test_empty_name_is_allowed() {
        let catalog = HeroCatalog::load_embedded().unwrap();
        let series = MatchSeries::new(String::new(), &catalog);
        assert!(validate_match_series(&series, &catalog).is_ok());
    }

    #[test]
    fn test_long_name_fails() {
        let catalog = HeroCatalog::load_embedded().unwrap();
        let series = MatchSeries::new("x".repeat(MAX_NAME_LENGTH + 1), &catalog);
        assert!(validate_match_series(&series, &catalog).is_err());
    }

    #[test]
    fn test_flags_from_another_catalog_fail() {
        let catalog = HeroCatalog::load_embedded().unwrap();
        let small = HeroCatalog::from_json_str(
            r#"{ "cho": { "name": "Cho", "role": "Tank", "player_spawned_name": "Cho" } }"#,
        )
        .unwrap();

        let series = MatchSeries::new("q".to_string(), &small);
        assert!(validate_match_series(&series, &catalog).is_err());

        let series = MatchSeries::new("q".to_string(), &catalog);
        assert!(validate_match_series(&series, &small).is_err());
    }
}
