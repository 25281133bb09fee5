use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::db::Database;
use crate::models::{Hero, HeroId};

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn bad_request(msg: &str) -> (StatusCode, String) {
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg.to_string())
}

fn hero_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Hero not found".to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Heroes
// ============================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

/// All heroes, or those whose name contains `?name=`.
pub async fn list_heroes(
    State(db): State<Database>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Hero>>, (StatusCode, String)> {
    let heroes = match query.name {
        Some(term) => db.search_heroes(&term),
        None => db.get_all_heroes(),
    };
    heroes.map(Json).map_err(internal_error)
}

pub async fn get_hero(
    State(db): State<Database>,
    Path(id): Path<HeroId>,
) -> Result<Json<Hero>, (StatusCode, String)> {
    db.get_hero(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(hero_not_found)
}

pub async fn create_hero(
    State(db): State<Database>,
    Json(input): Json<Hero>,
) -> Result<(StatusCode, Json<Hero>), (StatusCode, String)> {
    if input.name.trim().is_empty() {
        return Err(bad_request("Hero name is required"));
    }

    db.create_hero(&input)
        .map(|hero| (StatusCode::CREATED, Json(hero)))
        .map_err(internal_error)
}

/// Replace a hero; the target is the `id` in the body.
pub async fn update_hero(
    State(db): State<Database>,
    Json(hero): Json<Hero>,
) -> Result<StatusCode, (StatusCode, String)> {
    if hero.id.is_none() {
        return Err(bad_request("Hero id is required"));
    }

    if db.update_hero(&hero).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(hero_not_found())
    }
}

/// Deleting an id that does not exist still succeeds.
pub async fn delete_hero(
    State(db): State<Database>,
    Path(id): Path<HeroId>,
) -> Result<StatusCode, (StatusCode, String)> {
    if !db.delete_hero(id).map_err(internal_error)? {
        tracing::debug!("Delete of unknown hero {}", id);
    }
    Ok(StatusCode::NO_CONTENT)
}
