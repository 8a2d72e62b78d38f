use crate::config::PlayoffRounds;
use crate::db::DbPool;
use crate::service::{BracketService, CatalogService, MatchService, StandingsService};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub standings: StandingsService,
    pub matches: MatchService,
    pub brackets: BracketService,
}

impl AppState {
    pub fn new(db_pool: DbPool, rounds: PlayoffRounds) -> Self {
        Self {
            catalog: CatalogService::new(db_pool.clone()),
            standings: StandingsService::new(db_pool.clone()),
            matches: MatchService::new(db_pool.clone()),
            brackets: BracketService::new(db_pool, rounds),
        }
    }
}
