mod handlers;

use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;

pub fn create_router(db: Database) -> Router {
    let api = Router::new()
        // Heroes
        .route(
            "/heroes",
            get(handlers::list_heroes)
                .post(handlers::create_hero)
                .put(handlers::update_hero),
        )
        .route("/heroes/", get(handlers::list_heroes))
        .route(
            "/heroes/{id}",
            get(handlers::get_hero).delete(handlers::delete_hero),
        )
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
