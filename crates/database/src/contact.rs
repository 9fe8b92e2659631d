//! Contact-form submissions.
//!
//! Unlike the catalogue resources, forms are removed outright on delete.

use crate::collections::CONTACT_FORMS;
use crate::document;
use crate::error::{DatabaseError, Result};
use crate::filter::{Filter, Sort};
use crate::listing::{paginate, Page, PageBounds, PageRequest};
use crate::models::{ContactForm, ContactFormCreate, ContactStats, ContactStatus};
use crate::validation::Validate;
use crate::Database;

const ENTITY: &str = "Contact form";

/// Page sizes for the submissions listing.
pub const PAGE_BOUNDS: PageBounds = PageBounds::new(20, 100);

/// Store a new submission with status `pending`.
pub async fn submit_form(db: &Database, input: ContactFormCreate) -> Result<ContactForm> {
    input.validate()?;

    let form = ContactForm::from_create(input);
    db.collection(CONTACT_FORMS).insert_one(&form).await?;

    tracing::info!(id = %form.id, service = ?form.service, "Contact form submitted");
    Ok(form)
}

/// List submissions, newest first, optionally by status.
pub async fn list_forms(
    db: &Database,
    status: Option<ContactStatus>,
    page: PageRequest,
) -> Result<Page<ContactForm>> {
    let filter = Filter::new().eq_opt("status", status.map(|s| s.as_str()));
    paginate(
        db.collection(CONTACT_FORMS),
        &filter,
        Sort::desc("created_at"),
        page,
    )
    .await
}

/// Get a submission by ID.
pub async fn get_form(db: &Database, id: &str) -> Result<ContactForm> {
    let doc = db
        .collection(CONTACT_FORMS)
        .find_one(&Filter::new().eq("id", id))
        .await?
        .ok_or_else(|| DatabaseError::not_found(ENTITY, id))?;
    document::decode_checked(CONTACT_FORMS, doc)
}

/// Move a submission to any status.
pub async fn update_status(db: &Database, id: &str, status: ContactStatus) -> Result<()> {
    let mut set = document::Document::new();
    set.insert(
        "status".to_string(),
        serde_json::Value::String(status.as_str().to_string()),
    );

    let matched = db
        .collection(CONTACT_FORMS)
        .update_one(&Filter::new().eq("id", id), &set)
        .await?;

    if !matched {
        return Err(DatabaseError::not_found(ENTITY, id));
    }

    tracing::info!(id = %id, status = %status, "Contact form status updated");
    Ok(())
}

/// Remove a submission permanently.
pub async fn delete_form(db: &Database, id: &str) -> Result<()> {
    let removed = db
        .collection(CONTACT_FORMS)
        .delete_one(&Filter::new().eq("id", id))
        .await?;

    if !removed {
        return Err(DatabaseError::not_found(ENTITY, id));
    }
    Ok(())
}

/// Totals per status and submissions per month.
pub async fn contact_stats(db: &Database) -> Result<ContactStats> {
    let forms = db.collection(CONTACT_FORMS);
    let by_status = |status: ContactStatus| Filter::new().eq("status", status.as_str());

    Ok(ContactStats {
        total: forms.count(&Filter::new()).await?,
        pending: forms.count(&by_status(ContactStatus::Pending)).await?,
        contacted: forms.count(&by_status(ContactStatus::Contacted)).await?,
        completed: forms.count(&by_status(ContactStatus::Completed)).await?,
        monthly: forms.count_by_month("created_at", &Filter::new()).await?,
    })
}
