//! vLLM `/v1/models` parser.

use serde::Deserialize;

use super::common::{epoch_secs_to_datetime, now, publisher_from_owned_by};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct VllmParser;

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

impl ResponseParser for VllmParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "vllm",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.data.len());
        for entry in envelope.data {
            let id = match entry.id.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            let mut info = ModelInfo::new(id, "vllm", last_seen);
            let max_context_length = entry.max_model_len.filter(|&n| n > 0).map(|n| n as u64);
            let parent_model = entry.parent.filter(|p| !p.is_empty());
            info.details = Some(ModelDetails {
                max_context_length,
                parent_model,
                publisher: publisher_from_owned_by(entry.owned_by.as_deref(), &["vllm"]),
                modified_at: entry.created.and_then(epoch_secs_to_datetime),
                ..Default::default()
            });
            out.push(info);
        }
        Ok(out)
    }
}
