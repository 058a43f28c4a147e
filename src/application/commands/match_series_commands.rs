// src/application/commands/match_series_commands.rs
//
// Match Series Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs or a serialized ErrorResponse
// - Never contain business logic

use std::path::PathBuf;
use uuid::Uuid;

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::integrations::replay::ReplaySource;

/// An unparsable id can never name a series
fn parse_series_id(series_id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(series_id.trim())
        .map_err(|_| ErrorResponse::not_found("Match series").to_json())
}

/// Create a series; the response carries the edit key
pub fn create_match_series(
    state: &AppState,
    dto: CreateMatchSeriesDto,
) -> Result<CreatedMatchSeriesDto, String> {
    let pre_banned = state
        .catalog
        .parse_hero_list(&dto.pre_banned)
        .to_error_response()?;

    let series = state
        .create_match_series(dto.name, &pre_banned)
        .to_error_response()?;

    Ok(CreatedMatchSeriesDto::from(&series))
}

pub fn get_match_series(
    state: &AppState,
    series_id: &str,
    edit_key: Option<&str>,
) -> Result<MatchSeriesView, String> {
    let id = parse_series_id(series_id)?;
    let manager = state.manager(id, edit_key).to_error_response()?;

    Ok(MatchSeriesView::from(&manager))
}

pub fn set_hero_bans(state: &AppState, dto: SetHeroBansDto) -> Result<MatchSeriesView, String> {
    let id = parse_series_id(&dto.series_id)?;
    let mut manager = state
        .manager(id, dto.edit_key.as_deref())
        .to_error_response()?;
    manager.ensure_can_edit().to_error_response()?;

    let to_ban = state.catalog.parse_hero_list(&dto.ban).to_error_response()?;
    let to_unban = state.catalog.parse_hero_list(&dto.unban).to_error_response()?;

    manager
        .set_hero_bans(&to_ban, &to_unban)
        .to_error_response()?;

    Ok(MatchSeriesView::from(&manager))
}

pub fn ban_from_replays(
    state: &AppState,
    dto: BanFromReplaysDto,
) -> Result<MatchSeriesView, String> {
    let id = parse_series_id(&dto.series_id)?;
    let mut manager = state
        .manager(id, dto.edit_key.as_deref())
        .to_error_response()?;
    manager.ensure_can_edit().to_error_response()?;

    let extra_bans = state
        .catalog
        .parse_hero_list(&dto.extra_bans)
        .to_error_response()?;
    let unbans = state.catalog.parse_hero_list(&dto.unbans).to_error_response()?;

    let replays = dto
        .replay_paths
        .into_iter()
        .map(|path| ReplaySource::Path(PathBuf::from(path)));
    manager
        .ban_from_replays(&state.extractor, replays, &extra_bans, &unbans)
        .to_error_response()?;

    Ok(MatchSeriesView::from(&manager))
}
