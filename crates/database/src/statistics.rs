//! The headline statistics singleton.

use serde::{Deserialize, Serialize};

use crate::collections::STATISTICS;
use crate::document::{self, timestamp, to_document};
use crate::error::{DatabaseError, Result};
use crate::filter::Filter;
use crate::models::{Statistics, StatisticsCounters, StatisticsUpdate};
use crate::validation::Validate;
use crate::Database;

/// Stored statistics, or the built-in counters when none are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatisticsView {
    Stored(Statistics),
    Fallback(StatisticsCounters),
}

/// The stored statistics record, if any.
pub async fn get_statistics(db: &Database) -> Result<Option<Statistics>> {
    db.collection(STATISTICS)
        .find_one(&Filter::new())
        .await?
        .map(|doc| document::decode(STATISTICS, doc))
        .transpose()
}

/// Stored statistics, falling back to the default counters. Never not-found.
pub async fn statistics_or_default(db: &Database) -> Result<StatisticsView> {
    Ok(match get_statistics(db).await? {
        Some(stats) => StatisticsView::Stored(stats),
        None => {
            tracing::warn!("No statistics stored, serving defaults");
            StatisticsView::Fallback(StatisticsCounters::default())
        }
    })
}

/// Apply the present counters of `update` to the singleton, creating it from
/// the defaults when missing. Always refreshes `updated_at`.
pub async fn upsert_statistics(db: &Database, update: StatisticsUpdate) -> Result<Statistics> {
    update.validate()?;

    let mut set = to_document(STATISTICS, &update)?;
    set.insert(
        "updated_at".to_string(),
        serde_json::Value::String(timestamp::format(&timestamp::now())),
    );
    let defaults = to_document(STATISTICS, &Statistics::new(StatisticsCounters::default()))?;

    let statistics = db.collection(STATISTICS);
    statistics.upsert_one(&Filter::new(), &set, &defaults).await?;

    let doc = statistics
        .find_one(&Filter::new())
        .await?
        .ok_or_else(|| DatabaseError::InvalidDocument {
            collection: STATISTICS,
            reason: "statistics missing after upsert".to_string(),
        })?;
    document::decode(STATISTICS, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn test_fallback_when_nothing_stored() {
        let db = test_db().await;
        assert_eq!(get_statistics(&db).await.unwrap(), None);

        let view = statistics_or_default(&db).await.unwrap();
        assert_eq!(view, StatisticsView::Fallback(StatisticsCounters::default()));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "projects_completed": 100,
                "happy_clients": 150,
                "years_experience": 5,
                "team_members": 25
            })
        );
    }

    #[tokio::test]
    async fn test_upsert_creates_then_merges() {
        let db = test_db().await;

        let first = upsert_statistics(
            &db,
            StatisticsUpdate {
                happy_clients: Some(200),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(first.counters.happy_clients, 200);
        assert_eq!(first.counters.projects_completed, 100);

        let second = upsert_statistics(
            &db,
            StatisticsUpdate {
                team_members: Some(30),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.counters.happy_clients, 200);
        assert_eq!(second.counters.team_members, 30);
        assert!(second.updated_at >= first.updated_at);

        assert_eq!(db.collection(STATISTICS).count(&Filter::new()).await.unwrap(), 1);
        assert!(matches!(
            statistics_or_default(&db).await.unwrap(),
            StatisticsView::Stored(_)
        ));
    }

    #[tokio::test]
    async fn test_upsert_rejects_negative_counters() {
        let db = test_db().await;
        let update = StatisticsUpdate {
            years_experience: Some(-1),
            ..Default::default()
        };
        assert!(upsert_statistics(&db, update).await.is_err());
        assert_eq!(get_statistics(&db).await.unwrap(), None);
    }
}
