pub mod admin_handler;
pub mod bracket_handler;
pub mod health;
pub mod league_handler;
pub mod state;

use actix_web::web;

pub use state::AppState;

/// Public read routes under `/api` and admin commands under `/api/admin`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/admin")
                    .configure(admin_handler::configure_routes)
                    .configure(bracket_handler::configure_admin_routes),
            )
            .configure(league_handler::configure_routes)
            .configure(bracket_handler::configure_routes),
    );
}
