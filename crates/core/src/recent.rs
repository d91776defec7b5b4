//! Recently-played id list stored under a single key.

use tracing::warn;

/// Storage key holding the serialized id list.
pub const RECENTLY_PLAYED_KEY: &str = "recentlyPlayed";

/// Maximum number of ids retained.
pub const MAX_RECENTLY_PLAYED: usize = 6;

/// Decode a persisted id list. Missing or malformed values yield an empty list.
pub fn parse_recent_ids(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => ids,
        Err(err) => {
            warn!("Discarding malformed recently played value: {err}");
            Vec::new()
        }
    }
}

/// Move `id` to the front of `ids`, dropping older duplicates and capping the length.
pub fn push_recent_id(ids: Vec<String>, id: &str) -> Vec<String> {
    std::iter::once(id.to_string())
        .chain(ids.into_iter().filter(|existing| existing != id))
        .take(MAX_RECENTLY_PLAYED)
        .collect()
}

/// Encode an id list for storage.
pub fn encode_recent_ids(ids: &[String]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn unset_or_malformed_is_empty() {
        assert!(parse_recent_ids(None).is_empty());
        assert!(parse_recent_ids(Some("not json")).is_empty());
        assert!(parse_recent_ids(Some(r#"{"id": "1"}"#)).is_empty());
        assert!(parse_recent_ids(Some("[1, 2]")).is_empty());
        assert_eq!(parse_recent_ids(Some(r#"["2","1"]"#)), ids(&["2", "1"]));
    }

    #[test]
    fn push_moves_existing_id_to_front() {
        let updated = push_recent_id(ids(&["1", "3", "2"]), "3");
        assert_eq!(updated, ids(&["3", "1", "2"]));
    }

    #[test]
    fn push_evicts_oldest_past_limit() {
        let full = ids(&["6", "5", "4", "3", "2", "1"]);
        let updated = push_recent_id(full, "7");
        assert_eq!(updated, ids(&["7", "6", "5", "4", "3", "2"]));
    }

    #[test]
    fn encoding_is_a_json_array() {
        assert_eq!(encode_recent_ids(&ids(&["3", "1"])), r#"["3","1"]"#);
        assert_eq!(parse_recent_ids(Some(&encode_recent_ids(&[]))), ids(&[]));
    }
}
