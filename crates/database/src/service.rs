//! Service CRUD operations.

use crate::collections::SERVICES;
use crate::document::{self, to_document};
use crate::error::{DatabaseError, Result};
use crate::filter::{Filter, Sort};
use crate::listing::{paginate, Page, PageBounds, PageRequest};
use crate::models::{Service, ServiceCreate};
use crate::validation::Validate;
use crate::Database;

const ENTITY: &str = "Service";

/// Page sizes for the service listing.
pub const PAGE_BOUNDS: PageBounds = PageBounds::new(10, 50);

/// Optional listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceQuery {
    pub category: Option<String>,
    /// Defaults to active services only.
    pub is_active: Option<bool>,
}

impl ServiceQuery {
    fn filter(&self) -> Filter {
        Filter::new()
            .eq("is_active", self.is_active.unwrap_or(true))
            .eq_opt("category", self.category.as_deref())
    }
}

/// List services, newest first.
pub async fn list_services(
    db: &Database,
    query: &ServiceQuery,
    page: PageRequest,
) -> Result<Page<Service>> {
    paginate(
        db.collection(SERVICES),
        &query.filter(),
        Sort::desc("created_at"),
        page,
    )
    .await
}

/// Get a service by ID.
pub async fn get_service(db: &Database, id: &str) -> Result<Service> {
    let doc = db
        .collection(SERVICES)
        .find_one(&Filter::new().eq("id", id))
        .await?
        .ok_or_else(|| DatabaseError::not_found(ENTITY, id))?;
    document::decode_checked(SERVICES, doc)
}

/// Create a new service.
pub async fn create_service(db: &Database, input: ServiceCreate) -> Result<Service> {
    input.validate()?;

    let service = Service::from_create(input);
    db.collection(SERVICES).insert_one(&service).await?;

    tracing::info!(id = %service.id, category = %service.category, "Service created");
    Ok(service)
}

/// Replace the mutable fields of a service.
pub async fn update_service(db: &Database, id: &str, input: ServiceCreate) -> Result<()> {
    input.validate()?;

    let set = to_document(SERVICES, &input)?;
    let matched = db
        .collection(SERVICES)
        .update_one(&Filter::new().eq("id", id), &set)
        .await?;

    if !matched {
        return Err(DatabaseError::not_found(ENTITY, id));
    }
    Ok(())
}

/// Soft-delete a service by marking it inactive.
pub async fn delete_service(db: &Database, id: &str) -> Result<()> {
    soft_delete(db, SERVICES, ENTITY, id).await
}

/// Distinct categories among active services.
pub async fn list_categories(db: &Database) -> Result<Vec<String>> {
    db.collection(SERVICES)
        .distinct("category", &Filter::new().eq("is_active", true))
        .await
}

/// Set `is_active = false` on the record with the given public ID.
pub(crate) async fn soft_delete(
    db: &Database,
    collection: &'static str,
    entity: &'static str,
    id: &str,
) -> Result<()> {
    let mut set = document::Document::new();
    set.insert("is_active".to_string(), serde_json::Value::Bool(false));

    let matched = db
        .collection(collection)
        .update_one(&Filter::new().eq("id", id), &set)
        .await?;

    if !matched {
        return Err(DatabaseError::not_found(entity, id));
    }
    Ok(())
}
