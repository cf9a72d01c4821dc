//! JSON encoding for the persisted progress snapshot.
//!
//! The stored value keeps the browser-era shape
//! `{"<card id>": {"dueDate": "YYYY-MM-DD"}}` so existing progress exports
//! load unchanged.

use flashcards_core::model::ProgressSnapshot;

use crate::repository::StorageError;

/// Serialize the whole snapshot for a single key-value write.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_snapshot(snapshot: &ProgressSnapshot) -> Result<String, StorageError> {
    serde_json::to_string(snapshot).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Decode a stored value into a snapshot.
///
/// A missing slot, a blank string, or JSON `null` all mean "nothing saved yet"
/// and decode to an empty snapshot. A `null` card entry leaves that card
/// unseen. Anything else that fails to parse is reported, never replaced.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or dates.
pub fn decode_snapshot(raw: Option<&str>) -> Result<ProgressSnapshot, StorageError> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(ProgressSnapshot::new());
    };

    serde_json::from_str::<Option<ProgressSnapshot>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(|err| StorageError::Serialization(format!("corrupt progress data: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flashcards_core::model::CardId;

    fn id(raw: &str) -> CardId {
        CardId::new(raw).unwrap()
    }

    #[test]
    fn absent_values_decode_empty() {
        assert!(decode_snapshot(None).unwrap().is_empty());
        assert!(decode_snapshot(Some("")).unwrap().is_empty());
        assert!(decode_snapshot(Some("null")).unwrap().is_empty());
        assert!(decode_snapshot(Some("{}")).unwrap().is_empty());
    }

    #[test]
    fn decodes_legacy_shape_and_ignores_extra_fields() {
        let snapshot = decode_snapshot(Some(
            r#"{"b":{"dueDate":"2024-01-01"},"a":{"dueDate":"2024-01-05","streak":2},"c":{}}"#,
        ))
        .unwrap();

        assert_eq!(
            snapshot.due_date(&id("b")),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(
            snapshot.due_date(&id("a")),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(snapshot.due_date(&id("c")), None);
    }

    #[test]
    fn null_card_entry_is_unseen() {
        let snapshot =
            decode_snapshot(Some(r#"{"a":null,"b":{"dueDate":"2024-01-01"}}"#)).unwrap();

        assert_eq!(snapshot.due_date(&id("a")), None);
        assert_eq!(
            snapshot.due_date(&id("b")),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn corrupt_json_is_reported() {
        let err = decode_snapshot(Some("{not json")).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));

        let err = decode_snapshot(Some(r#"{"a":{"dueDate":"tomorrow"}}"#)).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn encode_then_decode_preserves_snapshot() {
        let mut snapshot = ProgressSnapshot::new();
        snapshot
            .set_due_date(id("x"), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
            .set_due_date(id("y"), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let encoded = encode_snapshot(&snapshot).unwrap();
        assert_eq!(
            encoded,
            r#"{"x":{"dueDate":"2024-12-31"},"y":{"dueDate":"2025-01-01"}}"#
        );
        assert_eq!(decode_snapshot(Some(&encoded)).unwrap(), snapshot);
    }
}
