//! Customer review routes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use database::{review, PageRequest, Review, ReviewCreate, ReviewStats};
use serde::Deserialize;

use crate::envelope::{Data, Mutation, Paginated};
use crate::error::Result;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/featured", get(featured))
        .route("/stats", get(stats))
        .route("/:id", get(show).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub is_active: Option<bool>,
    pub min_rating: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<i64>,
    pub min_rating: Option<i64>,
}

/// List reviews, most recent first.
pub async fn list(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Paginated<Review>>> {
    let Query(params) = params?;
    let page = PageRequest::new(params.page, params.per_page, review::PAGE_BOUNDS)?;
    let query = review::ReviewQuery {
        min_rating: params.min_rating,
        is_active: params.is_active,
    };

    let page = review::list_reviews(&state.db, &query, page).await?;
    Ok(Json(page.into()))
}

/// Highest-rated reviews first, most recent among equal ratings.
pub async fn featured(
    State(state): State<AppState>,
    params: std::result::Result<Query<FeaturedParams>, QueryRejection>,
) -> Result<Json<Data<Vec<Review>>>> {
    let Query(params) = params?;
    let reviews = review::featured_reviews(&state.db, params.limit, params.min_rating).await?;
    Ok(Json(Data::new(reviews)))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<Data<ReviewStats>>> {
    Ok(Json(Data::new(review::review_stats(&state.db).await?)))
}

pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Review>> {
    let Path(id) = id?;
    Ok(Json(review::get_review(&state.db, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<ReviewCreate>, JsonRejection>,
) -> Result<Json<Mutation>> {
    let Json(input) = body?;
    let created = review::create_review(&state.db, input).await?;
    Ok(Json(Mutation::created("Review created successfully", created.id)))
}

pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<ReviewCreate>, JsonRejection>,
) -> Result<Json<Mutation>> {
    let Path(id) = id?;
    let Json(input) = body?;
    review::update_review(&state.db, &id, input).await?;
    Ok(Json(Mutation::done("Review updated successfully")))
}

pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Mutation>> {
    let Path(id) = id?;
    review::delete_review(&state.db, &id).await?;
    Ok(Json(Mutation::done("Review deleted successfully")))
}
