//! LM Studio `/v1/models` parser.
//!
//! LM Studio's OpenAI-compatible listing endpoint enriches each entry with
//! LM-Studio-specific metadata beyond the bare `id`/`object` pair — the
//! fields this parser lifts out of that extra metadata.

use serde::Deserialize;

use super::common::{epoch_secs_to_datetime, now};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct LmStudioParser;

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
    arch: Option<String>,
    #[serde(default)]
    quantization: Option<String>,
    #[serde(default)]
    compatibility_type: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    max_context_length: Option<u64>,
    #[serde(default)]
    created: Option<i64>,
}

impl ResponseParser for LmStudioParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "lmstudio",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.data.len());
        for entry in envelope.data {
            let id = match entry.id.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            let object = entry.object.unwrap_or_default();
            let mut info = ModelInfo::new(id, object, last_seen);

            let mut details = ModelDetails {
                quantization_level: entry.quantization,
                format: entry.compatibility_type,
                publisher: entry.publisher,
                state: entry.state,
                max_context_length: entry.max_context_length,
                model_kind: entry.kind,
                modified_at: entry.created.and_then(epoch_secs_to_datetime),
                ..Default::default()
            };
            if let Some(arch) = entry.arch {
                details.families = vec![arch.clone()];
                details.family = Some(arch);
            }
            info.details = Some(details);
            out.push(info);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_arch_to_family_and_families() {
        let body = br#"{"data":[{"id":"llava-7b","object":"model","arch":"llama"}]}"#;
        let models = LmStudioParser.parse(body).unwrap();
        let details = models[0].details.as_ref().unwrap();
        assert_eq!(details.family.as_deref(), Some("llama"));
        assert_eq!(details.families, vec!["llama".to_string()]);
    }

    #[test]
    fn publisher_is_kept_distinct_from_parent_model() {
        let body = br#"{"data":[{"id":"m","object":"model","publisher":"meta"}]}"#;
        let models = LmStudioParser.parse(body).unwrap();
        let details = models[0].details.as_ref().unwrap();
        assert_eq!(details.publisher.as_deref(), Some("meta"));
        assert!(details.parent_model.is_none());
    }

    #[test]
    fn object_field_is_carried_verbatim_as_provider_tag() {
        let body = br#"{"data":[{"id":"m","object":"model"}]}"#;
        let models = LmStudioParser.parse(body).unwrap();
        assert_eq!(models[0].model_type, "model");
    }

    #[test]
    fn entries_with_empty_id_are_dropped() {
        let body = br#"{"data":[{"id":"","object":"model"},{"id":"m2","object":"model"}]}"#;
        assert_eq!(LmStudioParser.parse(body).unwrap().len(), 1);
    }

    #[test]
    fn positive_created_becomes_modified_at() {
        let body = br#"{"data":[{"id":"m","object":"model","created":1700000000}]}"#;
        let models = LmStudioParser.parse(body).unwrap();
        assert!(models[0].details.as_ref().unwrap().modified_at.is_some());
    }
}
