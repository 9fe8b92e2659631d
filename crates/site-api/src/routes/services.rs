//! Service catalogue routes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use database::{service, PageRequest, Service, ServiceCreate};
use serde::Deserialize;

use crate::envelope::{Data, Mutation, Paginated};
use crate::error::Result;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/categories/list", get(categories))
        .route("/:id", get(show).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

/// List services, active only unless `is_active=false`.
pub async fn list(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Paginated<Service>>> {
    let Query(params) = params?;
    let page = PageRequest::new(params.page, params.per_page, service::PAGE_BOUNDS)?;
    let query = service::ServiceQuery {
        category: params.category,
        is_active: params.is_active,
    };

    let page = service::list_services(&state.db, &query, page).await?;
    Ok(Json(page.into()))
}

pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Service>> {
    let Path(id) = id?;
    Ok(Json(service::get_service(&state.db, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<ServiceCreate>, JsonRejection>,
) -> Result<Json<Mutation>> {
    let Json(input) = body?;
    let created = service::create_service(&state.db, input).await?;
    Ok(Json(Mutation::created("Service created successfully", created.id)))
}

pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<ServiceCreate>, JsonRejection>,
) -> Result<Json<Mutation>> {
    let Path(id) = id?;
    let Json(input) = body?;
    service::update_service(&state.db, &id, input).await?;
    Ok(Json(Mutation::done("Service updated successfully")))
}

/// Soft delete.
pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Mutation>> {
    let Path(id) = id?;
    service::delete_service(&state.db, &id).await?;
    Ok(Json(Mutation::done("Service deleted successfully")))
}

pub async fn categories(State(state): State<AppState>) -> Result<Json<Data<Vec<String>>>> {
    Ok(Json(Data::new(service::list_categories(&state.db).await?)))
}
