//! Admin routes for courier management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use parceltrace_core::error::DomainError;
use parceltrace_courier::application::command_handlers;
use parceltrace_courier::application::query_handlers::{
    self, CourierView, HistoryEntryView,
};
use parceltrace_courier::domain::commands::{CreateCourier, UpdateCourier};
use parceltrace_courier::domain::courier::{CourierUpdate, NewCourier};
use parceltrace_notify::ReceiptData;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for POST /{id}/send-receipt.
#[derive(Debug, Serialize)]
pub struct ReceiptSentResponse {
    /// Email address the receipt was delivered to.
    pub sent_to: String,
}

/// POST /
#[instrument(skip(state, fields))]
async fn create_courier(
    State(state): State<AppState>,
    Json(fields): Json<NewCourier>,
) -> Result<(StatusCode, Json<CourierView>), ApiError> {
    let command = CreateCourier { fields };

    let mut rng = state.rng.lock().await;
    let result = command_handlers::handle_create_courier(
        &command,
        state.clock.as_ref(),
        &mut *rng,
        &*state.repository,
    )
    .await?;
    drop(rng);

    info!(
        courier_id = %result.courier.id,
        tracking_number = %result.courier.tracking_number,
        "courier created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CourierView::from_courier(&result.courier)),
    ))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_courier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourierView>, ApiError> {
    let view = query_handlers::get_courier_by_id(id, &*state.repository).await?;
    Ok(Json(view))
}

/// PATCH /{id}
#[instrument(skip(state, update))]
async fn update_courier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<CourierUpdate>,
) -> Result<Json<CourierView>, ApiError> {
    let command = UpdateCourier {
        courier_id: id,
        update,
    };

    let result = command_handlers::handle_update_courier(
        &command,
        state.clock.as_ref(),
        &*state.repository,
    )
    .await?;

    info!(
        courier_id = %result.courier.id,
        history_recorded = result.history.is_some(),
        "courier updated"
    );

    Ok(Json(CourierView::from_courier(&result.courier)))
}

/// GET /{id}/history
#[instrument(skip(state))]
async fn courier_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<HistoryEntryView>>, ApiError> {
    let history = query_handlers::get_courier_history(id, &*state.repository).await?;
    Ok(Json(history))
}

/// POST /{id}/send-receipt
#[instrument(skip(state))]
async fn send_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReceiptSentResponse>, ApiError> {
    let Some(courier) = state.repository.find_by_id(id).await.map_err(ApiError::Domain)? else {
        return Err(DomainError::CourierNotFound(id).into());
    };

    let receipt = ReceiptData::for_courier(&courier);
    state.notifier.send_receipt(&receipt).await?;

    info!(
        courier_id = %courier.id,
        recipient = %receipt.receiver_email,
        "waybill receipt sent"
    );

    Ok(Json(ReceiptSentResponse {
        sent_to: receipt.receiver_email,
    }))
}

/// Returns the router for courier management.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_courier))
        .route("/{id}", get(get_courier).patch(update_courier))
        .route("/{id}/history", get(courier_history))
        .route("/{id}/send-receipt", post(send_receipt))
}
