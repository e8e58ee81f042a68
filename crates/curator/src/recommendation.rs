//! Recommendation items parsed from a normalized reply.

use crate::error::ParseError;
use crate::normalizer::{RECOMMENDATIONS_KEY, ResponseNormalizer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Placeholder for a missing or empty `title`.
pub const TITLE_PLACEHOLDER: &str = "title unavailable";
/// Placeholder for a missing or empty `artist`.
pub const ARTIST_PLACEHOLDER: &str = "artist unavailable";
/// Placeholder for a missing or empty `reason`.
pub const REASON_PLACEHOLDER: &str = "reason unavailable";

/// One suggested song. `reason` is free text in the requested language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub artist: String,
    pub reason: String,
}

impl Recommendation {
    /// Build an item from one array element, substituting placeholders.
    ///
    /// Never fails: a non-object element yields an all-placeholder item.
    /// Numbers and booleans are kept as their JSON text.
    pub fn from_value(item: &Value) -> Self {
        Self {
            title: field(item, "title", TITLE_PLACEHOLDER),
            artist: field(item, "artist", ARTIST_PLACEHOLDER),
            reason: field(item, "reason", REASON_PLACEHOLDER),
        }
    }

    /// True when title and artist are both real values, i.e. the song can
    /// be looked up.
    pub fn is_identifiable(&self) -> bool {
        self.title != TITLE_PLACEHOLDER && self.artist != ARTIST_PLACEHOLDER
    }

    fn placeholder_count(&self) -> usize {
        [
            self.title == TITLE_PLACEHOLDER,
            self.artist == ARTIST_PLACEHOLDER,
            self.reason == REASON_PLACEHOLDER,
        ]
        .into_iter()
        .filter(|missing| *missing)
        .count()
    }
}

fn field(item: &Value, key: &str, placeholder: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Extract the recommendation list from an already-normalized object.
///
/// Objects that did not come from the normalizer and lack the array simply
/// yield an empty list.
pub fn recommendations_from_object(object: &Value) -> Vec<Recommendation> {
    let items = object
        .get(RECOMMENDATIONS_KEY)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let recommendations: Vec<Recommendation> =
        items.iter().map(Recommendation::from_value).collect();

    let patched: usize = recommendations.iter().map(Recommendation::placeholder_count).sum();
    if patched > 0 {
        warn!(
            "Substituted {} placeholder field(s) across {} recommendations",
            patched,
            recommendations.len()
        );
    }

    recommendations
}

/// Normalize a raw reply and parse its recommendations in one step.
pub fn parse_recommendations(raw: &str) -> Result<Vec<Recommendation>, ParseError> {
    let object = ResponseNormalizer::default().normalize(raw)?;
    Ok(recommendations_from_object(&object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_items() {
        let raw = r#"{"recommendations":[{"title":"A","artist":"B","reason":"C"}]}"#;
        let recs = parse_recommendations(raw).unwrap();
        assert_eq!(
            recs,
            vec![Recommendation {
                title: "A".to_string(),
                artist: "B".to_string(),
                reason: "C".to_string(),
            }]
        );
        assert!(recs[0].is_identifiable());
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let raw = r#"{"recommendations":[{"title":"X"},{"title":"Y","artist":"Z","reason":"ok"}]}"#;
        let recs = parse_recommendations(raw).unwrap();

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "X");
        assert_eq!(recs[0].artist, ARTIST_PLACEHOLDER);
        assert_eq!(recs[0].reason, REASON_PLACEHOLDER);
        assert!(!recs[0].is_identifiable());
        assert_eq!(recs[1].artist, "Z");
    }

    #[test]
    fn test_non_object_items_and_odd_types() {
        let object = json!({"recommendations": ["just a string", {"title": 1999, "artist": "", "reason": null}]});
        let recs = recommendations_from_object(&object);

        assert_eq!(recs[0].title, TITLE_PLACEHOLDER);
        assert_eq!(recs[1].title, "1999");
        assert_eq!(recs[1].artist, ARTIST_PLACEHOLDER);
        assert_eq!(recs[1].reason, REASON_PLACEHOLDER);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let raw = r#"{"recommendations":[{"title":"A","artist":"B","reason":"1"},{"title":"A","artist":"B","reason":"2"}]}"#;
        assert_eq!(parse_recommendations(raw).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_failure_propagates() {
        assert!(parse_recommendations("I could not find any songs.").is_err());
    }
}
