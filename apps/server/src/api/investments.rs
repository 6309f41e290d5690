use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Serialize;

use crate::auth::UserId;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use folio_core::summary::PortfolioView;
use folio_core::trades::NewTrade;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordedTrade {
    trade_id: String,
    ticker: String,
}

async fn get_investments(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> ApiResult<Json<PortfolioView>> {
    let view = state.portfolio_service.compute_portfolio(&user_id).await?;
    Ok(Json(view))
}

async fn create_trade(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Json(input): Json<NewTrade>,
) -> ApiResult<(StatusCode, Json<RecordedTrade>)> {
    let trade = state.trade_service.record_trade(&user_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordedTrade {
            trade_id: trade.id,
            ticker: trade.ticker,
        }),
    ))
}

async fn delete_trade(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Path(trade_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.trade_service.delete_trade(&user_id, &trade_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/investments", get(get_investments).post(create_trade))
        .route("/investments/{id}", delete(delete_trade))
}
