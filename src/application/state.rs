// src/application/state.rs
//
// Application state shared by all command handlers.
//
// Built once at startup. A broken hero catalog or database stops startup here;
// nothing else is constructed in that case.

use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity, ConnectionPool, DatabaseConfig, DatabaseStats,
};
use crate::domain::{HeroCatalog, HeroId, MatchSeries};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::replay::{ArchiveOpener, ProtocolResolver};
use crate::repositories::{MatchSeriesRepository, SqliteMatchSeriesRepository};
use crate::services::{MatchSeriesManager, ReplayHeroExtractor};

/// All fields are Arc-wrapped for thread-safe sharing across commands.
pub struct AppState {
    pub catalog: Arc<HeroCatalog>,
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub match_series_repo: Arc<dyn MatchSeriesRepository>,
    pub extractor: Arc<ReplayHeroExtractor>,
}

impl AppState {
    /// Load the hero catalog, open the database and wire the services
    pub fn initialize(
        config: &DatabaseConfig,
        opener: Arc<dyn ArchiveOpener>,
        resolver: Arc<dyn ProtocolResolver>,
    ) -> AppResult<Self> {
        let catalog = Arc::new(HeroCatalog::load_embedded()?);
        log::info!("Loaded hero catalog with {} heroes", catalog.len());

        let pool = Arc::new(create_connection_pool(config)?);

        Self::from_pool(catalog, pool, opener, resolver)
    }

    /// Wire the services on top of an existing pool, creating the schema if needed
    pub fn from_pool(
        catalog: Arc<HeroCatalog>,
        pool: Arc<ConnectionPool>,
        opener: Arc<dyn ArchiveOpener>,
        resolver: Arc<dyn ProtocolResolver>,
    ) -> AppResult<Self> {
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;
        }

        let event_bus = Arc::new(EventBus::new());
        let match_series_repo: Arc<dyn MatchSeriesRepository> = Arc::new(
            SqliteMatchSeriesRepository::new(Arc::clone(&pool), Arc::clone(&catalog)),
        );
        let extractor = Arc::new(ReplayHeroExtractor::new(
            opener,
            resolver,
            Arc::clone(&catalog),
            Arc::clone(&event_bus),
        ));

        Ok(Self {
            catalog,
            pool,
            event_bus,
            match_series_repo,
            extractor,
        })
    }

    /// Open a series, with edit rights only if `edit_key` is its key
    pub fn manager(&self, id: Uuid, edit_key: Option<&str>) -> AppResult<MatchSeriesManager> {
        MatchSeriesManager::open(
            Arc::clone(&self.match_series_repo),
            Arc::clone(&self.catalog),
            Arc::clone(&self.event_bus),
            id,
            edit_key,
        )
    }

    pub fn create_match_series(
        &self,
        name: String,
        pre_banned: &BTreeSet<HeroId>,
    ) -> AppResult<MatchSeries> {
        MatchSeriesManager::create_new(
            self.match_series_repo.as_ref(),
            &self.catalog,
            &self.event_bus,
            name,
            pre_banned,
        )
    }

    pub fn database_stats(&self) -> AppResult<DatabaseStats> {
        let conn = get_connection(&self.pool)?;
        get_database_stats(&conn)
    }
}
