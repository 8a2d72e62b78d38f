use actix_cors::Cors;

/// Public pages are served from another origin; allow read access from anywhere.
pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
