//! OpenAI-compatible `/v1/models` parser — also the registry's default.

use serde::Deserialize;

use super::common::{epoch_secs_to_datetime, now};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct OpenAiParser;

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
    object: Option<String>,
    #[serde(default)]
    created: Option<i64>,
}

impl ResponseParser for OpenAiParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "openai",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.data.len());
        for entry in envelope.data {
            let id = match entry.id.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            let mut info = ModelInfo::new(id, entry.object.unwrap_or_default(), last_seen);
            if let Some(modified_at) = entry.created.and_then(epoch_secs_to_datetime) {
                info.details = Some(ModelDetails {
                    modified_at: Some(modified_at),
                    ..Default::default()
                });
            }
            out.push(info);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_zero_leaves_modified_at_unset() {
        let body = br#"{"data":[{"id":"gpt-4","object":"model","created":0}]}"#;
        let models = OpenAiParser.parse(body).unwrap();
        assert!(models[0].details.is_none());
    }

    #[test]
    fn positive_created_becomes_modified_at() {
        let body = br#"{"data":[{"id":"gpt-4","object":"model","created":1700000000}]}"#;
        let models = OpenAiParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().modified_at.is_some());
    }

    #[test]
    fn negative_created_leaves_modified_at_unset() {
        let body = br#"{"data":[{"id":"gpt-4","object":"model","created":-5}]}"#;
        let models = OpenAiParser.parse(body).unwrap();
        assert!(models[0].details.is_none());
    }

    #[test]
    fn empty_body_yields_empty_list() {
        assert_eq!(OpenAiParser.parse(b"").unwrap().len(), 0);
    }
}
