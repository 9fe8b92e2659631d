//! Named collections of JSON documents.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::document::{self, Document};
use crate::error::Result;
use crate::filter::{json_path, Filter, Sort};
use crate::models::MonthlyCount;

/// Options for [`Collection::find`].
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub sort: Sort,
    pub skip: u64,
    /// `None` returns every match after `skip`.
    pub limit: Option<u64>,
}

impl FindOptions {
    pub fn sorted(sort: Sort) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }
}

/// Handle to one collection. Cheap to create; borrows the pool.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    pool: &'a SqlitePool,
    name: &'static str,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(pool: &'a SqlitePool, name: &'static str) -> Self {
        Self { pool, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Insert one record. Returns its storage identifier.
    pub async fn insert_one<T: Serialize>(&self, record: &T) -> Result<i64> {
        let doc = document::to_document(self.name, record)?;
        let mut conn = self.pool.acquire().await?;
        insert_document(&mut conn, self.name, &doc).await
    }

    /// Insert a batch of records in one transaction; either all land or none.
    pub async fn insert_many<T: Serialize>(&self, records: &[T]) -> Result<u64> {
        let docs = records
            .iter()
            .map(|record| document::to_document(self.name, record))
            .collect::<Result<Vec<_>>>()?;

        let mut tx = self.pool.begin().await?;
        for doc in &docs {
            insert_document(&mut tx, self.name, doc).await?;
        }
        tx.commit().await?;

        Ok(docs.len() as u64)
    }

    /// Count documents matching `filter`.
    pub async fn count(&self, filter: &Filter) -> Result<u64> {
        let mut qb = self.select("SELECT COUNT(*) FROM documents");
        filter.push_sql(&mut qb);

        let count: i64 = qb.build_query_scalar().fetch_one(self.pool).await?;
        Ok(count.max(0) as u64)
    }

    /// Find documents matching `filter`, normalized for output.
    pub async fn find(&self, filter: &Filter, options: &FindOptions) -> Result<Vec<Document>> {
        let mut qb = self.select("SELECT storage_id, body FROM documents");
        filter.push_sql(&mut qb);
        options.sort.push_sql(&mut qb);

        // SQLite only accepts OFFSET after LIMIT; -1 means unbounded.
        let limit = options.limit.map_or(-1, to_sql_int);
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(to_sql_int(options.skip));

        let rows: Vec<(i64, String)> = qb.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter()
            .map(|(storage_id, body)| {
                let doc = document::parse_body(self.name, &body)?;
                Ok(document::normalize_identifier(storage_id, doc))
            })
            .collect()
    }

    /// First document (in insertion order) matching `filter`.
    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Document>> {
        let mut docs = self
            .find(filter, &FindOptions::default().with_limit(1))
            .await?;
        Ok(docs.pop())
    }

    /// Merge `set` into the first document matching `filter`.
    ///
    /// `null` values in `set` clear the field. Returns whether a document matched.
    pub async fn update_one(&self, filter: &Filter, set: &Document) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        update_document(&mut conn, self.name, filter, set).await
    }

    /// Update the first match, or insert `defaults` overlaid with `set`.
    pub async fn upsert_one(&self, filter: &Filter, set: &Document, defaults: &Document) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        if !update_document(&mut tx, self.name, filter, set).await? {
            let mut doc = defaults.clone();
            for (key, value) in set {
                doc.insert(key.clone(), value.clone());
            }
            insert_document(&mut tx, self.name, &doc).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Remove the first document matching `filter`. Returns whether one was removed.
    pub async fn delete_one(&self, filter: &Filter) -> Result<bool> {
        let mut qb = QueryBuilder::new("DELETE FROM documents WHERE storage_id = (");
        push_first_match(&mut qb, self.name, filter);
        qb.push(")");

        let result = qb.build().execute(self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct non-null string values of `field` among matching documents.
    pub async fn distinct(&self, field: &'static str, filter: &Filter) -> Result<Vec<String>> {
        let path = json_path(field);
        let mut qb = self.select(&format!("SELECT DISTINCT {path} AS value FROM documents"));
        filter.push_sql(&mut qb);
        qb.push(format!(" AND {path} IS NOT NULL ORDER BY value"));

        let values: Vec<String> = qb.build_query_scalar().fetch_all(self.pool).await?;
        Ok(values)
    }

    /// Mean of a numeric field; `None` when nothing matches.
    pub async fn average(&self, field: &'static str, filter: &Filter) -> Result<Option<f64>> {
        let mut qb = self.select(&format!("SELECT AVG({}) FROM documents", json_path(field)));
        filter.push_sql(&mut qb);

        let average: Option<f64> = qb.build_query_scalar().fetch_one(self.pool).await?;
        Ok(average)
    }

    /// Count matching documents grouped by the (year, month) of a timestamp field.
    ///
    /// Rows are ordered by year, then month, ascending.
    pub async fn count_by_month(&self, field: &'static str, filter: &Filter) -> Result<Vec<MonthlyCount>> {
        let path = json_path(field);
        let mut qb = self.select(&format!(
            "SELECT CAST(strftime('%Y', {path}) AS INTEGER) AS year, \
             CAST(strftime('%m', {path}) AS INTEGER) AS month, \
             COUNT(*) AS count FROM documents"
        ));
        filter.push_sql(&mut qb);
        qb.push(format!(
            " AND strftime('%Y', {path}) IS NOT NULL GROUP BY year, month ORDER BY year, month"
        ));

        let rows: Vec<(i64, i64, i64)> = qb.build_query_as().fetch_all(self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|(year, month, count)| MonthlyCount {
                year: year as i32,
                month: month as u32,
                count: count.max(0) as u64,
            })
            .collect())
    }

    /// Start a statement scoped to this collection: `<head> WHERE collection = ?`.
    fn select(&self, head: &str) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" WHERE collection = ");
        qb.push_bind(self.name);
        qb
    }
}

fn push_first_match(qb: &mut QueryBuilder<'_, Sqlite>, collection: &'static str, filter: &Filter) {
    qb.push("SELECT storage_id FROM documents WHERE collection = ");
    qb.push_bind(collection);
    filter.push_sql(qb);
    qb.push(" ORDER BY storage_id LIMIT 1");
}

async fn insert_document(
    conn: &mut SqliteConnection,
    collection: &'static str,
    doc: &Document,
) -> Result<i64> {
    let body = serde_json::to_string(doc)?;
    let result = sqlx::query(
        r#"
        INSERT INTO documents (collection, body)
        VALUES (?, ?)
        "#,
    )
    .bind(collection)
    .bind(body)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn update_document(
    conn: &mut SqliteConnection,
    collection: &'static str,
    filter: &Filter,
    set: &Document,
) -> Result<bool> {
    let mut patch = set.clone();
    patch.remove(document::STORAGE_ID_KEY);
    let patch = serde_json::to_string(&patch)?;

    let mut qb = QueryBuilder::new("UPDATE documents SET body = json_patch(body, ");
    qb.push_bind(patch);
    qb.push(") WHERE storage_id = (");
    push_first_match(&mut qb, collection, filter);
    qb.push(")");

    let result = qb.build().execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
