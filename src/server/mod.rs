//! JSON API over the presence data. Every handler goes through the shared [DatasetCache], so the
//! source file is parsed at most once per cache ttl no matter how many requests arrive.

pub mod error;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use error::ApiError;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    analysis::report::{
        mean_time_weekday, presence_start_end, presence_weekday, users, PresenceRow, UserListing,
        WeekdayMean, WeekdayStartEnd,
    },
    storage::{cache::DatasetCache, entities::UserId},
};

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DatasetCache>,
}

pub fn create_router(cache: Arc<DatasetCache>) -> Router {
    Router::new()
        .route("/api/v1/users", get(users_view))
        .route("/api/v1/mean_time_weekday/:user_id", get(mean_time_weekday_view))
        .route("/api/v1/presence_weekday/:user_id", get(presence_weekday_view))
        .route("/api/v1/presence_start_end/:user_id", get(presence_start_end_view))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { cache })
}

/// Serves the API until `shutdown` is cancelled.
pub async fn serve(
    address: SocketAddr,
    cache: Arc<DatasetCache>,
    shutdown: CancellationToken,
) -> Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!("Serving presence data on {}", listener.local_addr()?);

    axum::serve(listener, create_router(cache))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// GET /api/v1/users - users listing for the dropdown.
async fn users_view(State(state): State<AppState>) -> Result<Json<Vec<UserListing>>, ApiError> {
    let dataset = state.cache.get_dataset().await?;
    Ok(Json(users(&dataset)))
}

/// GET /api/v1/mean_time_weekday/:user_id
async fn mean_time_weekday_view(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<WeekdayMean>>, ApiError> {
    let dataset = state.cache.get_dataset().await?;
    Ok(Json(mean_time_weekday(&dataset, user_id)))
}

/// GET /api/v1/presence_weekday/:user_id
async fn presence_weekday_view(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<PresenceRow>>, ApiError> {
    let dataset = state.cache.get_dataset().await?;
    Ok(Json(presence_weekday(&dataset, user_id)))
}

/// GET /api/v1/presence_start_end/:user_id
async fn presence_start_end_view(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<WeekdayStartEnd>>, ApiError> {
    let dataset = state.cache.get_dataset().await?;
    Ok(Json(presence_start_end(&dataset, user_id)))
}
