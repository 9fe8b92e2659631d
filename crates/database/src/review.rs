//! Customer review operations and rating statistics.

use std::collections::BTreeMap;

use crate::collection::FindOptions;
use crate::collections::REVIEWS;
use crate::document::{self, to_document};
use crate::error::{DatabaseError, Result};
use crate::filter::{Filter, Sort};
use crate::listing::{paginate, Page, PageBounds, PageRequest};
use crate::models::{Review, ReviewCreate, ReviewStats, MAX_REVIEW_RATING, MIN_REVIEW_RATING};
use crate::service::soft_delete;
use crate::validation::{bounded, validate_range, Validate};
use crate::Database;

const ENTITY: &str = "Review";

/// Page sizes for the review listing.
pub const PAGE_BOUNDS: PageBounds = PageBounds::new(10, 50);

/// Default and range of the featured-reviews limit.
pub const FEATURED_LIMIT: (i64, i64, i64) = (10, 1, 20);

/// Default minimum rating of the featured view.
pub const FEATURED_MIN_RATING: i64 = 4;

/// Optional listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    pub min_rating: Option<i64>,
    /// Defaults to active reviews only.
    pub is_active: Option<bool>,
}

impl ReviewQuery {
    fn filter(&self) -> Result<Filter> {
        if let Some(min_rating) = self.min_rating {
            validate_range("min_rating", min_rating, MIN_REVIEW_RATING, MAX_REVIEW_RATING)?;
        }
        Ok(Filter::new()
            .eq("is_active", self.is_active.unwrap_or(true))
            .gte_opt("rating", self.min_rating))
    }
}

/// List reviews, most recent first.
pub async fn list_reviews(
    db: &Database,
    query: &ReviewQuery,
    page: PageRequest,
) -> Result<Page<Review>> {
    paginate(db.collection(REVIEWS), &query.filter()?, Sort::desc("date"), page).await
}

/// Best active reviews: highest rating first, then most recent.
pub async fn featured_reviews(
    db: &Database,
    limit: Option<i64>,
    min_rating: Option<i64>,
) -> Result<Vec<Review>> {
    let (default, min, max) = FEATURED_LIMIT;
    let limit = bounded("limit", limit, default, min, max)?;
    let min_rating = bounded(
        "min_rating",
        min_rating,
        FEATURED_MIN_RATING,
        MIN_REVIEW_RATING,
        MAX_REVIEW_RATING,
    )?;

    let filter = Filter::new()
        .eq("is_active", true)
        .gte("rating", min_rating);
    let options = FindOptions::sorted(Sort::desc("rating").then_desc("date")).with_limit(limit as u64);

    db.collection(REVIEWS)
        .find(&filter, &options)
        .await?
        .into_iter()
        .map(|doc| document::decode_checked(REVIEWS, doc))
        .collect()
}

/// Average rating and per-star histogram over active reviews.
pub async fn review_stats(db: &Database) -> Result<ReviewStats> {
    let reviews = db.collection(REVIEWS);
    let active = Filter::new().eq("is_active", true);

    let total_reviews = reviews.count(&active).await?;
    let average_rating = reviews
        .average("rating", &active)
        .await?
        .map(|avg| (avg * 10.0).round() / 10.0)
        .unwrap_or(0.0);

    let mut rating_distribution = BTreeMap::new();
    for rating in MIN_REVIEW_RATING..=MAX_REVIEW_RATING {
        let count = reviews.count(&active.clone().eq("rating", rating)).await?;
        rating_distribution.insert(rating.to_string(), count);
    }

    Ok(ReviewStats {
        average_rating,
        total_reviews,
        rating_distribution,
    })
}

/// Get a review by ID.
pub async fn get_review(db: &Database, id: &str) -> Result<Review> {
    let doc = db
        .collection(REVIEWS)
        .find_one(&Filter::new().eq("id", id))
        .await?
        .ok_or_else(|| DatabaseError::not_found(ENTITY, id))?;
    document::decode_checked(REVIEWS, doc)
}

/// Create a new review. The date defaults to now.
pub async fn create_review(db: &Database, input: ReviewCreate) -> Result<Review> {
    input.validate()?;

    let review = Review::from_create(input);
    db.collection(REVIEWS).insert_one(&review).await?;

    tracing::info!(id = %review.id, rating = review.rating, "Review created");
    Ok(review)
}

/// Replace the mutable fields of a review. An absent date keeps the stored one.
pub async fn update_review(db: &Database, id: &str, input: ReviewCreate) -> Result<()> {
    input.validate()?;

    let set = to_document(REVIEWS, &input)?;
    let matched = db
        .collection(REVIEWS)
        .update_one(&Filter::new().eq("id", id), &set)
        .await?;

    if !matched {
        return Err(DatabaseError::not_found(ENTITY, id));
    }
    Ok(())
}

/// Soft-delete a review.
pub async fn delete_review(db: &Database, id: &str) -> Result<()> {
    soft_delete(db, REVIEWS, ENTITY, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn input(name: &str, rating: i64, days_ago: i64) -> ReviewCreate {
        ReviewCreate {
            name: name.to_string(),
            rating,
            text: "Excellent finishing work".to_string(),
            date: Some(crate::document::timestamp::now() - Duration::days(days_ago)),
            google_review_id: None,
        }
    }

    #[tokio::test]
    async fn test_rating_out_of_range_is_not_stored() {
        let db = test_db().await;

        for rating in [0, 6] {
            let result = create_review(&db, input("Bad", rating, 0)).await;
            assert!(matches!(result, Err(DatabaseError::Validation(_))));
        }
        assert_eq!(db.collection(REVIEWS).count(&Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_featured_sorts_rating_before_date() {
        let db = test_db().await;
        // Ratings [5, 4, 5, 3] dated newest to oldest.
        create_review(&db, input("A", 5, 1)).await.unwrap();
        create_review(&db, input("B", 4, 2)).await.unwrap();
        create_review(&db, input("C", 5, 3)).await.unwrap();
        create_review(&db, input("D", 3, 4)).await.unwrap();

        let featured = featured_reviews(&db, None, Some(4)).await.unwrap();
        let names: Vec<_> = featured.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
        assert!(featured.iter().all(|r| r.rating >= 4));

        // A newer 4-star review still follows every 5-star one.
        create_review(&db, input("E", 4, 0)).await.unwrap();
        let featured = featured_reviews(&db, None, None).await.unwrap();
        let names: Vec<_> = featured.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "E", "B"]);

        let featured = featured_reviews(&db, Some(1), Some(1)).await.unwrap();
        assert_eq!(featured.len(), 1);

        assert!(featured_reviews(&db, Some(21), None).await.is_err());
        assert!(featured_reviews(&db, None, Some(6)).await.is_err());
    }

    #[tokio::test]
    async fn test_stats_histogram_has_every_bucket() {
        let db = test_db().await;

        let empty = review_stats(&db).await.unwrap();
        assert_eq!(empty.average_rating, 0.0);
        assert_eq!(empty.total_reviews, 0);
        assert_eq!(empty.rating_distribution.len(), 5);
        assert!(empty.rating_distribution.values().all(|&n| n == 0));

        create_review(&db, input("A", 5, 1)).await.unwrap();
        create_review(&db, input("B", 5, 2)).await.unwrap();
        create_review(&db, input("C", 4, 3)).await.unwrap();
        let hidden = create_review(&db, input("D", 1, 4)).await.unwrap();
        delete_review(&db, &hidden.id).await.unwrap();

        let stats = review_stats(&db).await.unwrap();
        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.average_rating, 4.7);
        let keys: Vec<_> = stats.rating_distribution.keys().cloned().collect();
        assert_eq!(keys, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(stats.rating_distribution["5"], 2);
        assert_eq!(stats.rating_distribution["4"], 1);
        assert_eq!(stats.rating_distribution["1"], 0);
    }

    #[tokio::test]
    async fn test_list_sorted_by_date_with_min_rating() {
        let db = test_db().await;
        create_review(&db, input("Old", 5, 30)).await.unwrap();
        create_review(&db, input("New", 4, 1)).await.unwrap();
        create_review(&db, input("Low", 2, 10)).await.unwrap();

        let page = PageRequest::new(None, None, PAGE_BOUNDS).unwrap();
        let all = list_reviews(&db, &ReviewQuery::default(), page).await.unwrap();
        let names: Vec<_> = all.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Low", "Old"]);

        let query = ReviewQuery {
            min_rating: Some(4),
            ..Default::default()
        };
        let good = list_reviews(&db, &query, page).await.unwrap();
        assert_eq!(good.total, 2);

        let query = ReviewQuery {
            min_rating: Some(9),
            ..Default::default()
        };
        assert!(list_reviews(&db, &query, page).await.is_err());
    }

    #[tokio::test]
    async fn test_update_without_date_keeps_stored_date() {
        let db = test_db().await;
        let created = create_review(&db, input("Sara", 4, 5)).await.unwrap();

        let mut changed = input("Sara", 5, 0);
        changed.date = None;
        update_review(&db, &created.id, changed).await.unwrap();

        let fetched = get_review(&db, &created.id).await.unwrap();
        assert_eq!(fetched.rating, 5);
        assert_eq!(fetched.date, created.date);

        let result = update_review(&db, "missing", input("x", 3, 0)).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_stored_out_of_range_rating_is_a_data_fault() {
        let db = test_db().await;
        let date = crate::document::timestamp::format(&Utc::now());
        db.collection(REVIEWS)
            .insert_one(&json!({"id": "bad", "name": "x", "rating": 9, "text": "y", "date": date}))
            .await
            .unwrap();

        let result = get_review(&db, "bad").await;
        assert!(matches!(result, Err(DatabaseError::InvalidDocument { .. })));
    }
}
