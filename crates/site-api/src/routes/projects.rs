//! Project gallery routes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use database::{project, PageRequest, Project, ProjectCreate};
use serde::Deserialize;

use crate::envelope::{Data, Mutation, Paginated};
use crate::error::Result;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/featured", get(featured))
        .route("/categories/list", get(categories))
        .route("/:id", get(show).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Paginated<Project>>> {
    let Query(params) = params?;
    let page = PageRequest::new(params.page, params.per_page, project::PAGE_BOUNDS)?;
    let query = project::ProjectQuery {
        category: params.category,
        is_featured: params.is_featured,
        is_active: params.is_active,
    };

    let page = project::list_projects(&state.db, &query, page).await?;
    Ok(Json(page.into()))
}

/// Active featured projects for the home page gallery.
pub async fn featured(
    State(state): State<AppState>,
    params: std::result::Result<Query<FeaturedParams>, QueryRejection>,
) -> Result<Json<Data<Vec<Project>>>> {
    let Query(params) = params?;
    let projects = project::featured_projects(&state.db, params.limit).await?;
    Ok(Json(Data::new(projects)))
}

pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Project>> {
    let Path(id) = id?;
    Ok(Json(project::get_project(&state.db, &id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<ProjectCreate>, JsonRejection>,
) -> Result<Json<Mutation>> {
    let Json(input) = body?;
    let created = project::create_project(&state.db, input).await?;
    Ok(Json(Mutation::created("Project created successfully", created.id)))
}

pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<ProjectCreate>, JsonRejection>,
) -> Result<Json<Mutation>> {
    let Path(id) = id?;
    let Json(input) = body?;
    project::update_project(&state.db, &id, input).await?;
    Ok(Json(Mutation::done("Project updated successfully")))
}

pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Mutation>> {
    let Path(id) = id?;
    project::delete_project(&state.db, &id).await?;
    Ok(Json(Mutation::done("Project deleted successfully")))
}

pub async fn categories(State(state): State<AppState>) -> Result<Json<Data<Vec<String>>>> {
    Ok(Json(Data::new(project::list_categories(&state.db).await?)))
}
