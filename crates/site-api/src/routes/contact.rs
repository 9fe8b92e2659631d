//! Contact form routes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use database::{contact, ContactForm, ContactFormCreate, ContactStats, ContactStatus, PageRequest};
use serde::Deserialize;

use crate::envelope::{Data, Mutation, Paginated};
use crate::error::Result;
use crate::state::AppState;

/// Confirmation shown to the visitor after submitting.
pub const SUBMITTED_MESSAGE: &str = "تم إرسال طلبك بنجاح! سنتواصل معك في أقرب وقت.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit))
        .route("/forms", get(list))
        .route("/forms/:id", get(show).delete(remove))
        .route("/forms/:id/status", put(update_status))
        .route("/stats", get(stats))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: String,
}

pub async fn submit(
    State(state): State<AppState>,
    body: std::result::Result<Json<ContactFormCreate>, JsonRejection>,
) -> Result<Json<Mutation>> {
    let Json(input) = body?;
    let form = contact::submit_form(&state.db, input).await?;
    // TODO: notify the office by email and send the visitor an auto-reply.
    Ok(Json(Mutation::created(SUBMITTED_MESSAGE, form.id)))
}

/// Submissions, newest first, optionally filtered by status.
pub async fn list(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Paginated<ContactForm>>> {
    let Query(params) = params?;
    let page = PageRequest::new(params.page, params.per_page, contact::PAGE_BOUNDS)?;
    let status = params
        .status
        .filter(|status| !status.is_empty())
        .map(|status| status.parse::<ContactStatus>())
        .transpose()?;

    let page = contact::list_forms(&state.db, status, page).await?;
    Ok(Json(page.into()))
}

pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<ContactForm>> {
    let Path(id) = id?;
    Ok(Json(contact::get_form(&state.db, &id).await?))
}

/// Any status may follow any other.
pub async fn update_status(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
    params: std::result::Result<Query<StatusParams>, QueryRejection>,
) -> Result<Json<Mutation>> {
    let Path(id) = id?;
    let Query(params) = params?;
    let status: ContactStatus = params.status.parse()?;
    contact::update_status(&state.db, &id, status).await?;
    Ok(Json(Mutation::done("Contact form status updated successfully")))
}

/// Hard delete; a second delete reports not-found.
pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Mutation>> {
    let Path(id) = id?;
    contact::delete_form(&state.db, &id).await?;
    Ok(Json(Mutation::done("Contact form deleted successfully")))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<Data<ContactStats>>> {
    Ok(Json(Data::new(contact::contact_stats(&state.db).await?)))
}
