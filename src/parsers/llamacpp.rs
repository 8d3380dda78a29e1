//! llama.cpp `/v1/models` parser.
//!
//! llama.cpp's server emits a dual envelope (`data` and `models`, both the
//! same list); this parser always reads from `data`.

use serde::Deserialize;

use super::common::{epoch_secs_to_datetime, now, publisher_from_owned_by};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct LlamaCppParser;

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    owned_by: Option<String>,
    #[serde(default)]
    created: Option<i64>,
}

impl ResponseParser for LlamaCppParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "llamacpp",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.data.len());
        for entry in envelope.data {
            let id = match entry.id.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            let mut info = ModelInfo::new(id, "llamacpp", last_seen);
            info.details = Some(ModelDetails {
                format: Some("gguf".to_string()),
                publisher: publisher_from_owned_by(entry.owned_by.as_deref(), &["llamacpp"]),
                modified_at: entry.created.and_then(epoch_secs_to_datetime),
                ..Default::default()
            });
            out.push(info);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_sets_gguf_format() {
        let body = br#"{"data":[{"id":"m","owned_by":"somebody"}],"models":[]}"#;
        let models = LlamaCppParser.parse(body).unwrap();
        assert_eq!(models[0].details.as_ref().unwrap().format.as_deref(), Some("gguf"));
    }

    #[test]
    fn publisher_suppressed_when_owned_by_is_llamacpp() {
        let body = br#"{"data":[{"id":"m","owned_by":"llamacpp"}]}"#;
        let models = LlamaCppParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().publisher.is_none());
    }

    #[test]
    fn publisher_suppressed_when_owned_by_is_empty() {
        let body = br#"{"data":[{"id":"m","owned_by":""}]}"#;
        let models = LlamaCppParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().publisher.is_none());
    }

    #[test]
    fn publisher_set_from_owned_by_otherwise() {
        let body = br#"{"data":[{"id":"m","owned_by":"acme"}]}"#;
        let models = LlamaCppParser.parse(body).unwrap();
        assert_eq!(models[0].details.as_ref().unwrap().publisher.as_deref(), Some("acme"));
    }

    #[test]
    fn provider_tag_is_always_llamacpp() {
        let body = br#"{"data":[{"id":"m"}]}"#;
        assert_eq!(LlamaCppParser.parse(body).unwrap()[0].model_type, "llamacpp");
    }

    #[test]
    fn positive_created_becomes_modified_at() {
        let body = br#"{"data":[{"id":"m","created":1700000000}]}"#;
        let models = LlamaCppParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().modified_at.is_some());
    }

    #[test]
    fn zero_created_leaves_modified_at_unset() {
        let body = br#"{"data":[{"id":"m","created":0}]}"#;
        let models = LlamaCppParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().modified_at.is_none());
    }
}
