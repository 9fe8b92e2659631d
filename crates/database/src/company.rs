//! The company profile singleton.

use crate::collections::COMPANY_INFO;
use crate::document::{self, to_document};
use crate::error::{DatabaseError, Result};
use crate::filter::Filter;
use crate::models::{CompanyInfo, CompanyInfoUpdate};
use crate::validation::{Validate, ValidationError};
use crate::Database;

const ENTITY: &str = "Company information";
const SINGLETON: &str = "company";

/// Get the stored company profile.
pub async fn get_company(db: &Database) -> Result<CompanyInfo> {
    let doc = db
        .collection(COMPANY_INFO)
        .find_one(&Filter::new())
        .await?
        .ok_or_else(|| DatabaseError::not_found(ENTITY, SINGLETON))?;
    document::decode_checked(COMPANY_INFO, doc)
}

/// Merge the present fields of `update` into the stored profile.
///
/// Absent fields are left exactly as stored.
pub async fn update_company(db: &Database, update: CompanyInfoUpdate) -> Result<()> {
    update.validate()?;

    let set = to_document(COMPANY_INFO, &update)?;
    if set.is_empty() {
        return Err(ValidationError::EmptyUpdate.into());
    }

    let matched = db
        .collection(COMPANY_INFO)
        .update_one(&Filter::new(), &set)
        .await?;

    if !matched {
        return Err(DatabaseError::not_found(ENTITY, SINGLETON));
    }

    tracing::info!(fields = set.len(), "Company information updated");
    Ok(())
}
