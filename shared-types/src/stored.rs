use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A record as it lives in a collection: the payload submitted by the client
/// plus the identity fields the server assigns at creation.
///
/// The payload is flattened, so on the wire and on disk a stored interview is
/// a single object: `{ "id": "...", "createdAt": "...", "company": "...", ... }`.
///
/// Fields the payload type does not model are kept in `extra` and written
/// back unchanged.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: String,
    /// Absent on records written before creation timestamps were tracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub record: T,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Stored<T> {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, record: T) -> Self {
        Self {
            id: id.into(),
            created_at: Some(created_at),
            record,
            extra: Map::new(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Stored<T>
where
    T: Serialize + DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let id = match fields.remove(ID_FIELD) {
            Some(Value::String(id)) => id,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "`{}` must be a string, found {}",
                    ID_FIELD, other
                )))
            }
            None => return Err(D::Error::missing_field(ID_FIELD)),
        };

        let created_at = match fields.remove(CREATED_AT_FIELD) {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value(value).map_err(D::Error::custom)?),
        };

        let record: T =
            serde_json::from_value(Value::Object(fields.clone())).map_err(D::Error::custom)?;

        // Whatever the payload serializes back is owned by it; the rest is extra.
        if let Value::Object(modeled) = serde_json::to_value(&record).map_err(D::Error::custom)? {
            fields.retain(|key, _| !modeled.contains_key(key));
        }

        Ok(Self {
            id,
            created_at,
            record,
            extra: fields,
        })
    }
}

/// Wire names of the fields owned by [`Stored`] rather than by the payload.
pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Body accepted by the collection-level `PUT`: `{ "id": "...", "updates": { ... } }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    pub updates: serde_json::Map<String, serde_json::Value>,
}

/// Body accepted by the collection-level `DELETE`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_stored_flattens_payload() {
        let created_at = "2025-05-15T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let stored = Stored::new("abc", created_at, Note { text: "hi".to_string() });

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["text"], "hi");
        assert!(value.get("record").is_none());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_stored_tolerates_missing_created_at() {
        let stored: Stored<Note> =
            serde_json::from_str(r#"{"id":"legacy","text":"old"}"#).unwrap();
        assert_eq!(stored.id, "legacy");
        assert!(stored.created_at.is_none());

        let json = serde_json::to_string(&stored).unwrap();
        assert!(!json.contains("createdAt"));
    }

    #[test]
    fn test_stored_keeps_unmodeled_fields() {
        let stored: Stored<Note> = serde_json::from_str(
            r#"{"id":"a","createdAt":"2025-05-15T10:00:00+00:00","text":"hi","location":"Berlin"}"#,
        )
        .unwrap();
        assert_eq!(stored.record.text, "hi");
        assert_eq!(stored.extra.len(), 1);
        assert_eq!(stored.extra["location"], "Berlin");

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["location"], "Berlin");
        assert_eq!(value["text"], "hi");
    }

    #[test]
    fn test_stored_requires_string_id() {
        assert!(serde_json::from_str::<Stored<Note>>(r#"{"text":"hi"}"#).is_err());
        assert!(serde_json::from_str::<Stored<Note>>(r#"{"id":7,"text":"hi"}"#).is_err());
    }
}
