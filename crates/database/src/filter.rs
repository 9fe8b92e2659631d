//! Filter and sort documents for collection queries.
//!
//! Field names are `&'static str` chosen by the calling code; they are
//! interpolated into JSON paths. Values are always bound parameters.

use sqlx::{QueryBuilder, Sqlite};

/// A scalar value a field can be compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Int(value.into())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Eq(&'static str, FilterValue),
    Gte(&'static str, FilterValue),
}

/// A conjunction of field conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn eq(mut self, field: &'static str, value: impl Into<FilterValue>) -> Self {
        self.conditions.push(Condition::Eq(field, value.into()));
        self
    }

    /// Require `field >= value`.
    pub fn gte(mut self, field: &'static str, value: impl Into<FilterValue>) -> Self {
        self.conditions.push(Condition::Gte(field, value.into()));
        self
    }

    /// Require `field == value` only when a value is present.
    ///
    /// `None` and empty strings add no constraint.
    pub fn eq_opt<V: Into<FilterValue>>(self, field: &'static str, value: Option<V>) -> Self {
        match present(value) {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    /// Require `field >= value` only when a value is present.
    pub fn gte_opt<V: Into<FilterValue>>(self, field: &'static str, value: Option<V>) -> Self {
        match present(value) {
            Some(value) => self.gte(field, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append ` AND ...` clauses for every condition.
    pub(crate) fn push_sql(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for condition in &self.conditions {
            let (field, op, value) = match condition {
                Condition::Eq(field, value) => (field, " = ", value),
                Condition::Gte(field, value) => (field, " >= ", value),
            };
            qb.push(" AND ");
            qb.push(json_path(field));
            qb.push(op);
            push_value(qb, value);
        }
    }
}

fn present<V: Into<FilterValue>>(value: Option<V>) -> Option<FilterValue> {
    match value.map(Into::into) {
        Some(FilterValue::Text(text)) if text.is_empty() => None,
        other => other,
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: &FilterValue) {
    match value {
        FilterValue::Bool(v) => qb.push_bind(*v),
        FilterValue::Int(v) => qb.push_bind(*v),
        FilterValue::Float(v) => qb.push_bind(*v),
        FilterValue::Text(v) => qb.push_bind(v.clone()),
    };
}

/// SQL expression extracting a top-level field from the document body.
pub(crate) fn json_path(field: &str) -> String {
    debug_assert!(
        !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
        "field names must be plain identifiers: {field:?}"
    );
    format!("json_extract(body, '$.{field}')")
}

/// Sort direction for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Multi-key sort; earlier keys dominate. Ties fall back to insertion order,
/// reversed when the leading key is descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    keys: Vec<(&'static str, Direction)>,
}

impl Sort {
    /// Insertion order only.
    pub fn natural() -> Self {
        Self::default()
    }

    pub fn desc(field: &'static str) -> Self {
        Self::natural().then_desc(field)
    }

    pub fn asc(field: &'static str) -> Self {
        Self::natural().then_asc(field)
    }

    pub fn then_desc(mut self, field: &'static str) -> Self {
        self.keys.push((field, Direction::Descending));
        self
    }

    pub fn then_asc(mut self, field: &'static str) -> Self {
        self.keys.push((field, Direction::Ascending));
        self
    }

    pub(crate) fn push_sql(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" ORDER BY ");
        for (field, direction) in &self.keys {
            qb.push(json_path(field));
            qb.push(match direction {
                Direction::Ascending => " ASC, ",
                Direction::Descending => " DESC, ",
            });
        }
        qb.push(match self.keys.first() {
            Some((_, Direction::Descending)) => "storage_id DESC",
            _ => "storage_id ASC",
        });
    }
}
