//! SGLang `/v1/models` parser.

use serde::Deserialize;

use super::common::{epoch_secs_to_datetime, now, publisher_from_owned_by};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct SglangParser;

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
    max_model_len: Option<i64>,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    created: Option<i64>,
}

impl ResponseParser for SglangParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "sglang",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.data.len());
        for entry in envelope.data {
            let id = match entry.id.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            let mut info = ModelInfo::new(id, "sglang", last_seen);
            let max_context_length = entry.max_model_len.filter(|&n| n > 0).map(|n| n as u64);
            let parent_model = entry.parent.filter(|p| !p.is_empty());
            info.details = Some(ModelDetails {
                max_context_length,
                parent_model,
                publisher: publisher_from_owned_by(entry.owned_by.as_deref(), &["sglang"]),
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
    fn captures_max_model_len_and_parent() {
        let body = br#"{"data":[{"id":"m","max_model_len":4096,"parent":"base"}]}"#;
        let models = SglangParser.parse(body).unwrap();
        let details = models[0].details.as_ref().unwrap();
        assert_eq!(details.max_context_length, Some(4096));
        assert_eq!(details.parent_model.as_deref(), Some("base"));
    }

    #[test]
    fn publisher_suppressed_when_sglang() {
        let body = br#"{"data":[{"id":"m","owned_by":"sglang"}]}"#;
        let models = SglangParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().publisher.is_none());
    }

    #[test]
    fn positive_created_becomes_modified_at() {
        let body = br#"{"data":[{"id":"m","created":1700000000}]}"#;
        let models = SglangParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().modified_at.is_some());
    }
}
