//! Company profile and headline statistics routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use database::statistics::{self, StatisticsView};
use database::{company, CompanyInfo, CompanyInfoUpdate, Statistics, StatisticsUpdate};

use crate::envelope::{Data, Mutation};
use crate::error::Result;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/info", get(info).put(update_info))
        .route("/stats", get(stats).put(update_stats))
}

pub async fn info(State(state): State<AppState>) -> Result<Json<CompanyInfo>> {
    Ok(Json(company::get_company(&state.db).await?))
}

/// Partial merge: only fields present in the body change.
pub async fn update_info(
    State(state): State<AppState>,
    body: std::result::Result<Json<CompanyInfoUpdate>, JsonRejection>,
) -> Result<Json<Mutation>> {
    let Json(update) = body?;
    company::update_company(&state.db, update).await?;
    Ok(Json(Mutation::done("Company information updated successfully")))
}

/// Stored statistics, or the built-in defaults.
pub async fn stats(State(state): State<AppState>) -> Result<Json<Data<StatisticsView>>> {
    Ok(Json(Data::new(
        statistics::statistics_or_default(&state.db).await?,
    )))
}

pub async fn update_stats(
    State(state): State<AppState>,
    body: std::result::Result<Json<StatisticsUpdate>, JsonRejection>,
) -> Result<Json<Data<Statistics>>> {
    let Json(update) = body?;
    Ok(Json(Data::new(
        statistics::upsert_statistics(&state.db, update).await?,
    )))
}
