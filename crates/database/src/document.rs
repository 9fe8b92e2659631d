//! JSON document helpers: encoding, decoding and identifier normalization.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DatabaseError, Result};
use crate::validation::Validate;

/// A stored record as a JSON object.
pub type Document = Map<String, Value>;

/// Key of the internal storage identifier. Never leaves this crate.
pub const STORAGE_ID_KEY: &str = "_id";

/// Key of the public identifier.
pub const PUBLIC_ID_KEY: &str = "id";

/// Encode a record as a document.
pub fn to_document<T: Serialize>(collection: &'static str, record: &T) -> Result<Document> {
    match serde_json::to_value(record)? {
        Value::Object(mut map) => {
            map.remove(STORAGE_ID_KEY);
            Ok(map)
        }
        other => Err(DatabaseError::InvalidDocument {
            collection,
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

/// Parse a raw body read from storage.
pub(crate) fn parse_body(collection: &'static str, body: &str) -> Result<Document> {
    match serde_json::from_str(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DatabaseError::InvalidDocument {
            collection,
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
        Err(err) => Err(DatabaseError::InvalidDocument {
            collection,
            reason: err.to_string(),
        }),
    }
}

/// Populate the public identifier and strip the storage identifier.
///
/// A non-empty public `id` wins; otherwise the storage identifier is used.
pub fn normalize_identifier(storage_id: i64, mut doc: Document) -> Document {
    doc.remove(STORAGE_ID_KEY);

    let has_public_id = matches!(
        doc.get(PUBLIC_ID_KEY),
        Some(Value::String(id)) if !id.is_empty()
    );
    if !has_public_id {
        doc.insert(
            PUBLIC_ID_KEY.to_string(),
            Value::String(storage_id.to_string()),
        );
    }

    doc
}

/// Decode a document into its typed shape.
pub fn decode<T: DeserializeOwned>(collection: &'static str, doc: Document) -> Result<T> {
    serde_json::from_value(Value::Object(doc)).map_err(|err| DatabaseError::InvalidDocument {
        collection,
        reason: err.to_string(),
    })
}

/// Decode a document and check the invariants of its shape.
pub fn decode_checked<T>(collection: &'static str, doc: Document) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let record: T = decode(collection, doc)?;
    record
        .validate()
        .map_err(|err| DatabaseError::InvalidDocument {
            collection,
            reason: err.to_string(),
        })?;
    Ok(record)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fixed-width RFC 3339 timestamps so that stored strings sort chronologically.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Current time at the stored precision, so a record reads back equal.
    pub fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Same encoding for optional timestamps.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_some(&super::format(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
