// src/repositories/match_series_repository.rs
//
// Match series persistence
//
// A series is one row in `match_series` plus one flag row per hero in
// `match_series_bans`. Writes of a record and its flags happen in a single
// transaction, so readers never observe half of a ban update.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{HeroCatalog, HeroId, MatchSeries};
use crate::error::{AppError, AppResult};

pub trait MatchSeriesRepository: Send + Sync {
    fn find_by_id(&self, id: Uuid) -> AppResult<Option<MatchSeries>>;

    /// Insert a new record with all of its flags
    fn create(&self, series: &MatchSeries) -> AppResult<()>;

    /// Overwrite the flags (and name) of an existing record.
    ///
    /// Fails with `NotFound` when the record does not exist.
    fn commit(&self, series: &MatchSeries) -> AppResult<()>;

    /// Read, change and write back one record as a single transaction.
    ///
    /// The record is locked for writing before it is read, so concurrent
    /// changes to the same series are applied one after the other. Nothing is
    /// written when `change` fails. Returns the record as committed.
    fn modify(
        &self,
        id: Uuid,
        change: &mut dyn FnMut(&mut MatchSeries) -> AppResult<()>,
    ) -> AppResult<MatchSeries>;

    fn exists(&self, id: Uuid) -> AppResult<bool>;
}

pub struct SqliteMatchSeriesRepository {
    pool: Arc<ConnectionPool>,
    catalog: Arc<HeroCatalog>,
}

/// The `match_series` columns, before the flags are attached
struct SeriesRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    name: String,
    edit_key: Uuid,
}

impl SqliteMatchSeriesRepository {
    pub fn new(pool: Arc<ConnectionPool>, catalog: Arc<HeroCatalog>) -> Self {
        Self { pool, catalog }
    }

    /// Map database row - returns rusqlite::Error for query_row compatibility
    fn row_to_series(row: &Row) -> Result<SeriesRow, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let edit_key_str: String = row.get("edit_key")?;
        let edit_key = Uuid::parse_str(&edit_key_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(SeriesRow {
            id,
            created_at,
            name: row.get("name")?,
            edit_key,
        })
    }

    fn load(&self, conn: &Connection, id: Uuid) -> AppResult<Option<MatchSeries>> {
        let row = conn
            .query_row(
                "SELECT id, created_at, name, edit_key FROM match_series WHERE id = ?1",
                params![id.to_string()],
                Self::row_to_series,
            )
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let banned = Self::banned_hero_ids(conn, id)?;

        Ok(Some(MatchSeries::from_parts(
            row.id,
            row.created_at,
            row.name,
            row.edit_key,
            banned,
            &self.catalog,
        )))
    }

    fn banned_hero_ids(conn: &Connection, id: Uuid) -> AppResult<Vec<HeroId>> {
        let mut stmt = conn.prepare(
            "SELECT hero_id FROM match_series_bans
             WHERE series_id = ?1 AND banned = 1
             ORDER BY hero_id",
        )?;

        let heroes = stmt
            .query_map(params![id.to_string()], |row| row.get::<_, String>(0))?
            .map(|hero| hero.map(HeroId::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(heroes)
    }

    fn write_flags(conn: &Connection, series: &MatchSeries) -> AppResult<()> {
        let mut stmt = conn.prepare(
            "INSERT OR REPLACE INTO match_series_bans (series_id, hero_id, banned)
             VALUES (?1, ?2, ?3)",
        )?;

        let series_id = series.id.to_string();
        for (hero, banned) in series.ban_flags() {
            stmt.execute(params![series_id, hero.as_str(), *banned])?;
        }

        Ok(())
    }
}

impl MatchSeriesRepository for SqliteMatchSeriesRepository {
    fn find_by_id(&self, id: Uuid) -> AppResult<Option<MatchSeries>> {
        let conn = self.pool.get()?;
        self.load(&conn, id)
    }

    fn create(&self, series: &MatchSeries) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO match_series (id, created_at, name, edit_key) VALUES (?1, ?2, ?3, ?4)",
            params![
                series.id.to_string(),
                series.created_at.to_rfc3339(),
                series.name,
                series.edit_key.to_string(),
            ],
        )?;
        Self::write_flags(&tx, series)?;

        tx.commit()?;
        Ok(())
    }

    fn commit(&self, series: &MatchSeries) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            "UPDATE match_series SET name = ?2 WHERE id = ?1",
            params![series.id.to_string(), series.name],
        )?;
        if updated == 0 {
            return Err(AppError::NotFound);
        }
        Self::write_flags(&tx, series)?;

        tx.commit()?;
        Ok(())
    }

    fn modify(
        &self,
        id: Uuid,
        change: &mut dyn FnMut(&mut MatchSeries) -> AppResult<()>,
    ) -> AppResult<MatchSeries> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut series = self.load(&tx, id)?.ok_or(AppError::NotFound)?;
        change(&mut series)?;

        tx.execute(
            "UPDATE match_series SET name = ?2 WHERE id = ?1",
            params![series.id.to_string(), series.name],
        )?;
        Self::write_flags(&tx, &series)?;

        tx.commit()?;
        Ok(series)
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM match_series WHERE id = ?1)",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(exists)
    }
}
