// Service layer: data access around the pure engines
pub mod bracket_service;
pub mod catalog_service;
pub mod match_service;
pub mod standings_service;

pub use bracket_service::BracketService;
pub use catalog_service::CatalogService;
pub use match_service::MatchService;
pub use standings_service::StandingsService;
