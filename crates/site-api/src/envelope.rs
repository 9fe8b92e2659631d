//! Response envelopes shared by every resource.

use database::Page;
use serde::Serialize;

/// One page of a listing.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> From<Page<T>> for Paginated<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            total_pages: page.total_pages(),
            data: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
        }
    }
}

/// Identifier of a newly created record.
#[derive(Debug, Serialize)]
pub struct CreatedId {
    pub id: String,
}

/// Outcome of a create, update or delete.
#[derive(Debug, Serialize)]
pub struct Mutation {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CreatedId>,
}

impl Mutation {
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn created(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(CreatedId { id: id.into() }),
        }
    }
}

/// A non-paginated payload wrapped as `{success, data}`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
