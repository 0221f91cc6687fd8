/// Data models for joke-service
///
/// - Joke: a record from the `jokes` collection
/// - Freshness / JokesPayload: what the read path hands back to the HTTP layer
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A joke as stored by the data source.
///
/// Only `title` and `body` are required. Every other column is carried
/// through untouched in `extra` and serialized back at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joke {
    pub title: String,
    pub body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Joke {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            extra: Map::new(),
        }
    }
}

/// Whether a response came from a fresh fetch/cache hit or from stale fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    Stale,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Stale => "stale",
        }
    }
}

/// Result of a successful read: the jokes plus a downstream caching hint
#[derive(Debug, Clone)]
pub struct JokesPayload {
    pub jokes: Arc<Vec<Joke>>,
    pub freshness: Freshness,
    /// Suggested downstream cache lifetime
    pub max_age_secs: u64,
}

impl JokesPayload {
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.max_age_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_columns_pass_through() {
        let raw = serde_json::json!({
            "id": 7,
            "title": "Atoms",
            "body": "They make up everything.",
            "author": null
        });

        let joke: Joke = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(joke.title, "Atoms");
        assert_eq!(joke.extra.get("id"), Some(&Value::from(7)));
        assert_eq!(serde_json::to_value(&joke).unwrap(), raw);
    }

    #[test]
    fn test_missing_body_is_rejected() {
        let raw = serde_json::json!({ "title": "No punchline" });
        assert!(serde_json::from_value::<Joke>(raw).is_err());
    }

    #[test]
    fn test_cache_control_header_value() {
        let payload = JokesPayload {
            jokes: Arc::new(vec![]),
            freshness: Freshness::Stale,
            max_age_secs: 60,
        };
        assert_eq!(payload.cache_control(), "public, max-age=60");
        assert_eq!(payload.freshness.as_str(), "stale");
    }
}
