//! Paginated listing shared by every resource.
//!
//! A listing counts the documents matching a filter, then fetches one page of
//! them in a fixed order. Paging past the end is not an error: the page is
//! empty while `total` and `total_pages` still describe the whole result.

use serde::de::DeserializeOwned;

use crate::collection::{Collection, FindOptions};
use crate::document;
use crate::error::Result;
use crate::filter::{Filter, Sort};
use crate::validation::{validate_range, Validate, ValidationError};

/// Page-size limits for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub default_per_page: u64,
    pub max_per_page: u64,
}

impl PageBounds {
    pub const fn new(default_per_page: u64, max_per_page: u64) -> Self {
        Self {
            default_per_page,
            max_per_page,
        }
    }
}

/// A validated page request: `page >= 1`, `1 <= per_page <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Resolve raw query parameters against `bounds`.
    pub fn new(
        page: Option<i64>,
        per_page: Option<i64>,
        bounds: PageBounds,
    ) -> std::result::Result<Self, ValidationError> {
        let page = page.unwrap_or(1);
        validate_range("page", page, 1, i64::MAX)?;

        let max = i64::try_from(bounds.max_per_page).unwrap_or(i64::MAX);
        let per_page = per_page.unwrap_or(bounds.default_per_page as i64);
        validate_range("per_page", per_page, 1, max)?;

        Ok(Self {
            page: page as u64,
            per_page: per_page as u64,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Documents to skip before this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Number of pages needed for `total` items, rounding up.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.per_page)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Count, skip and fetch one page of `collection`. Every document is decoded
/// and checked; one bad record fails the whole page.
pub async fn paginate<T: DeserializeOwned + Validate>(
    collection: Collection<'_>,
    filter: &Filter,
    sort: Sort,
    request: PageRequest,
) -> Result<Page<T>> {
    let total = collection.count(filter).await?;

    let options = FindOptions::sorted(sort)
        .with_skip(request.skip())
        .with_limit(request.per_page());
    let docs = collection.find(filter, &options).await?;

    let items = docs
        .into_iter()
        .map(|doc| document::decode_checked(collection.name(), doc))
        .collect::<Result<Vec<T>>>()?;

    Ok(Page {
        items,
        total,
        page: request.page(),
        per_page: request.per_page(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: PageBounds = PageBounds::new(10, 50);

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::new(None, None, BOUNDS).unwrap();
        assert_eq!(request.page(), 1);
        assert_eq!(request.per_page(), 10);
        assert_eq!(request.skip(), 0);
    }

    #[test]
    fn test_page_request_rejects_out_of_bounds() {
        assert!(PageRequest::new(Some(0), None, BOUNDS).is_err());
        assert!(PageRequest::new(Some(-3), None, BOUNDS).is_err());
        assert!(PageRequest::new(None, Some(0), BOUNDS).is_err());
        assert!(PageRequest::new(None, Some(51), BOUNDS).is_err());
        assert!(PageRequest::new(None, Some(50), BOUNDS).is_ok());
    }

    #[test]
    fn test_skip() {
        let request = PageRequest::new(Some(3), Some(12), BOUNDS).unwrap();
        assert_eq!(request.skip(), 24);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(17, 5), 4);

        for total in 0..200u64 {
            for per_page in 1..=20u64 {
                let expected = (total as f64 / per_page as f64).ceil() as u64;
                assert_eq!(total_pages(total, per_page), expected);
            }
        }
    }

    #[test]
    fn test_page_map_keeps_counts() {
        let page = Page {
            items: vec![1, 2],
            total: 7,
            page: 2,
            per_page: 2,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.total_pages(), 4);
    }
}
