//! Normalization of raw lead objects into [`LeadRecord`]s.
//!
//! The discovery service returns loosely typed JSON with display-style keys
//! (`"Post Type"`, `"Confidence Score"`, ...). Normalization is total: missing
//! or malformed fields fall back to defaults and never reject the record.
//! The canonical camelCase names are accepted too, so normalizing a
//! serialized record yields the same record.

use serde_json::{Map, Value};

use super::types::{Confidence, LeadRecord};

const USERNAME_KEYS: &[&str] = &["Username", "username"];
const POST_TYPE_KEYS: &[&str] = &["Post Type", "postType", "post_type"];
const SOURCE_KEYS: &[&str] = &["Source", "source"];
const TITLE_KEYS: &[&str] = &["Title", "title"];
const SNIPPET_KEYS: &[&str] = &["Snippet", "snippetOrBio", "snippet"];
const BIO_KEYS: &[&str] = &["Bio", "bio"];
const LINKS_KEYS: &[&str] = &["Links", "links"];
const UPVOTES_KEYS: &[&str] = &["Upvotes", "upvotes"];
const TIMESTAMP_KEYS: &[&str] = &["Timestamp", "timestamp"];
const CONFIDENCE_KEYS: &[&str] = &["Confidence", "confidence"];
const CONFIDENCE_SCORE_KEYS: &[&str] = &["Confidence Score", "confidenceScore", "confidence_score"];
const WEBSITE_URL_KEYS: &[&str] = &["Website URL", "websiteUrl", "website_url"];

/// Separator the discovery service puts between links in the `Links` string.
///
/// A bare comma is not a separator: URLs may contain commas.
pub const LINK_SEPARATOR: &str = ", ";

impl LeadRecord {
    /// Build a record from an arbitrary JSON value.
    ///
    /// Non-object input produces an all-default record.
    pub fn from_raw(raw: &Value) -> Self {
        let empty = Map::new();
        let obj = raw.as_object().unwrap_or(&empty);

        let snippet_or_bio = lookup(obj, SNIPPET_KEYS)
            .and_then(text)
            .or_else(|| lookup(obj, BIO_KEYS).and_then(text));

        Self {
            username: lookup(obj, USERNAME_KEYS).and_then(text),
            post_type: lookup(obj, POST_TYPE_KEYS).and_then(text),
            source: lookup(obj, SOURCE_KEYS).and_then(text),
            title: lookup(obj, TITLE_KEYS).and_then(text),
            snippet_or_bio,
            links: lookup(obj, LINKS_KEYS).map(links).unwrap_or_default(),
            upvotes: lookup(obj, UPVOTES_KEYS).map(integer).unwrap_or(0),
            timestamp: lookup(obj, TIMESTAMP_KEYS).and_then(text),
            confidence: lookup(obj, CONFIDENCE_KEYS)
                .and_then(text)
                .and_then(|c| Confidence::parse(&c)),
            confidence_score: lookup(obj, CONFIDENCE_SCORE_KEYS)
                .map(integer)
                .unwrap_or(0),
            website_url: lookup(obj, WEBSITE_URL_KEYS).and_then(text),
        }
    }
}

/// Normalize a whole batch, preserving arrival order.
pub fn normalize_leads(raw: &[Value]) -> Vec<LeadRecord> {
    raw.iter().map(LeadRecord::from_raw).collect()
}

/// First non-null value stored under any of `keys`.
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// Trimmed text, with blank strings treated as absent.
fn text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.round() as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Links arrive either as a [`LINK_SEPARATOR`]-joined string or as an array.
fn links(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(LINK_SEPARATOR)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items.iter().filter_map(text).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::{ConfidenceTier, NULL_LINK};
    use serde_json::json;

    #[test]
    fn test_from_raw_service_shape() {
        let raw = json!({
            "Website URL": "https://forum.example/t/1",
            "Username": "alice",
            "Bio": "Builds things",
            "Post Type": "comment",
            "Timestamp": "2024-05-01T12:00:00Z",
            "Upvotes": 42,
            "Links": "https://alice.example, https://github.com/alice",
            "Source": "reddit",
            "Snippet": "Looking for an AI tool",
            "Confidence": "high",
            "Confidence Score": 87,
            "Title": "Need help"
        });

        let record = LeadRecord::from_raw(&raw);
        assert_eq!(record.username(), Some("alice"));
        assert_eq!(record.post_type(), Some("comment"));
        assert_eq!(record.source(), Some("reddit"));
        assert_eq!(record.title(), Some("Need help"));
        assert_eq!(record.snippet_or_bio(), Some("Looking for an AI tool"));
        assert_eq!(
            record.links(),
            &["https://alice.example", "https://github.com/alice"]
        );
        assert_eq!(record.primary_link(), "https://alice.example");
        assert_eq!(record.upvotes(), 42);
        assert_eq!(record.timestamp(), Some("2024-05-01T12:00:00Z"));
        assert_eq!(record.confidence(), Some(Confidence::High));
        assert_eq!(record.confidence_score(), 87);
        assert_eq!(record.website_url(), Some("https://forum.example/t/1"));
    }

    #[test]
    fn test_from_raw_defaults() {
        let record = LeadRecord::from_raw(&json!({}));
        assert_eq!(record, LeadRecord::default());
        assert_eq!(record.primary_link(), NULL_LINK);
        assert_eq!(record.upvotes(), 0);
        assert_eq!(record.confidence_tier(), ConfidenceTier::Unknown);

        assert_eq!(LeadRecord::from_raw(&json!("not an object")), LeadRecord::default());
        assert_eq!(LeadRecord::from_raw(&Value::Null), LeadRecord::default());
    }

    #[test]
    fn test_from_raw_malformed_fields_degrade() {
        let raw = json!({
            "Username": "   ",
            "Upvotes": "lots",
            "Confidence": "very high",
            "Confidence Score": {"value": 3},
            "Links": 17,
            "Title": ["nope"]
        });

        let record = LeadRecord::from_raw(&raw);
        assert_eq!(record.username(), None);
        assert_eq!(record.upvotes(), 0);
        assert_eq!(record.confidence(), None);
        assert_eq!(record.confidence_score(), 0);
        assert!(record.links().is_empty());
        assert_eq!(record.title(), None);
    }

    #[test]
    fn test_numeric_coercion() {
        let record = LeadRecord::from_raw(&json!({
            "Upvotes": "12",
            "Confidence Score": 66.6
        }));
        assert_eq!(record.upvotes(), 12);
        assert_eq!(record.confidence_score(), 67);

        let record = LeadRecord::from_raw(&json!({ "Upvotes": " 7.4 ", "Confidence Score": true }));
        assert_eq!(record.upvotes(), 7);
        assert_eq!(record.confidence_score(), 0);
    }

    #[test]
    fn test_snippet_falls_back_to_bio() {
        let record = LeadRecord::from_raw(&json!({ "Snippet": "", "Bio": "Founder" }));
        assert_eq!(record.snippet_or_bio(), Some("Founder"));

        let record = LeadRecord::from_raw(&json!({ "Snippet": "Hiring", "Bio": "Founder" }));
        assert_eq!(record.snippet_or_bio(), Some("Hiring"));
    }

    #[test]
    fn test_links_parsing() {
        let record = LeadRecord::from_raw(&json!({ "Links": "a, , b,  c, " }));
        assert_eq!(record.links(), &["a", "b", "c"]);

        let record = LeadRecord::from_raw(&json!({ "Links": ["x", "", 3, null] }));
        assert_eq!(record.links(), &["x", "3"]);

        let record = LeadRecord::from_raw(&json!({ "Links": "" }));
        assert!(record.links().is_empty());
    }

    #[test]
    fn test_links_keep_commas_inside_urls() {
        let record = LeadRecord::from_raw(&json!({
            "Links": "https://maps.example/@40.7,-74.0, https://b.example/?tags=a,b"
        }));
        assert_eq!(
            record.links(),
            &["https://maps.example/@40.7,-74.0", "https://b.example/?tags=a,b"]
        );
        assert_eq!(record.primary_link(), "https://maps.example/@40.7,-74.0");

        let rejoined = record.links().join(LINK_SEPARATOR);
        let again = LeadRecord::from_raw(&json!({ "Links": rejoined }));
        assert_eq!(again.links(), record.links());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raws = vec![
            json!({
                "Username": "  bob ",
                "Post Type": "question",
                "Links": "https://bob.example",
                "Upvotes": "3",
                "Confidence": "MEDIUM",
                "Confidence Score": 150,
                "Timestamp": "2024-01-02",
                "Website URL": "https://site.example"
            }),
            json!({}),
            json!({ "Bio": "only bio", "Upvotes": -4 }),
        ];

        for raw in &raws {
            let once = LeadRecord::from_raw(raw);
            let serialized = serde_json::to_value(&once).unwrap();
            let twice = LeadRecord::from_raw(&serialized);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_normalize_leads_preserves_order() {
        let raws = vec![json!({"Username": "b"}), json!({"Username": "a"})];
        let records = normalize_leads(&raws);
        let names: Vec<_> = records.iter().map(|r| r.username().unwrap()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
