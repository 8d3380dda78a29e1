//! vLLM-MLX `/v1/models` parser.

use serde::Deserialize;

use super::common::{epoch_secs_to_datetime, now, publisher_from_owned_by};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct VllmMlxParser;

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

impl ResponseParser for VllmMlxParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "vllm-mlx",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.data.len());
        for entry in envelope.data {
            let id = match entry.id.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            let mut info = ModelInfo::new(id, "vllm-mlx", last_seen);
            info.details = Some(ModelDetails {
                format: Some("mlx".to_string()),
                publisher: publisher_from_owned_by(entry.owned_by.as_deref(), &["vllm", "vllm-mlx"]),
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
    fn always_sets_mlx_format() {
        let body = br#"{"data":[{"id":"m"}]}"#;
        let models = VllmMlxParser.parse(body).unwrap();
        assert_eq!(models[0].details.as_ref().unwrap().format.as_deref(), Some("mlx"));
    }

    #[test]
    fn publisher_suppressed_for_vllm_and_vllm_mlx() {
        let body = br#"{"data":[{"id":"a","owned_by":"vllm"},{"id":"b","owned_by":"vllm-mlx"},{"id":"c","owned_by":"mlx-community"}]}"#;
        let models = VllmMlxParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().publisher.is_none());
        assert!(models[1].details.as_ref().unwrap().publisher.is_none());
        assert_eq!(models[2].details.as_ref().unwrap().publisher.as_deref(), Some("mlx-community"));
    }

    #[test]
    fn positive_created_becomes_modified_at() {
        let body = br#"{"data":[{"id":"m","created":1700000000}]}"#;
        let models = VllmMlxParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().modified_at.is_some());
    }
}
