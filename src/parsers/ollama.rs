//! Ollama `/api/tags` parser.

use serde::Deserialize;

use super::common::{now, rfc3339_to_datetime};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct OllamaParser;

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    models: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    digest: Option<String>,
    #[serde(default)]
    modified_at: Option<String>,
    #[serde(default)]
    details: Option<EntryDetails>,
}

#[derive(Deserialize, Default)]
struct EntryDetails {
    #[serde(default)]
    parameter_size: Option<String>,
    #[serde(default)]
    quantization_level: Option<String>,
    #[serde(default)]
    family: Option<String>,
    #[serde(default)]
    families: Vec<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    parent_model: Option<String>,
}

impl ResponseParser for OllamaParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "ollama",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.models.len());
        for entry in envelope.models {
            let name = match entry.name.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            // The caller sets the provider tag; the parser leaves it blank.
            let mut info = ModelInfo::new(name, "", last_seen);
            info.size = entry.size;

            let mut details = ModelDetails {
                digest: entry.digest,
                ..Default::default()
            };
            if let Some(m) = entry.modified_at.as_deref() {
                details.modified_at = rfc3339_to_datetime(m);
            }
            if let Some(d) = entry.details {
                details.parameter_size = d.parameter_size;
                details.quantization_level = d.quantization_level;
                details.family = d.family;
                details.families = d.families;
                details.format = d.format;
                details.parent_model = d.parent_model;
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
    fn empty_body_yields_empty_list() {
        assert_eq!(OllamaParser.parse(b"").unwrap().len(), 0);
    }

    #[test]
    fn entries_with_empty_name_are_dropped() {
        let body = br#"{"models":[{"name":""},{"name":"llama3"}]}"#;
        let models = OllamaParser.parse(body).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "llama3");
    }

    #[test]
    fn nested_details_are_flattened() {
        let body = br#"{
            "models": [{
                "name": "llama3:70b",
                "size": 42,
                "digest": "abc123",
                "modified_at": "2024-01-02T03:04:05Z",
                "details": {
                    "parameter_size": "70B",
                    "quantization_level": "Q4_0",
                    "family": "llama",
                    "families": ["llama"],
                    "format": "gguf",
                    "parent_model": ""
                }
            }]
        }"#;
        let models = OllamaParser.parse(body).unwrap();
        assert_eq!(models.len(), 1);
        let details = models[0].details.as_ref().unwrap();
        assert_eq!(details.parameter_size.as_deref(), Some("70B"));
        assert_eq!(details.family.as_deref(), Some("llama"));
        assert_eq!(details.format.as_deref(), Some("gguf"));
        assert!(details.modified_at.is_some());
    }

    #[test]
    fn malformed_json_is_a_typed_error() {
        let err = OllamaParser.parse(b"{not json").unwrap_err();
        matches!(err, ProfileError::Parse { provider: "ollama", .. });
    }

    #[test]
    fn last_seen_is_shared_across_all_records_in_one_call() {
        let body = br#"{"models":[{"name":"a"},{"name":"b"}]}"#;
        let models = OllamaParser.parse(body).unwrap();
        assert_eq!(models[0].last_seen, models[1].last_seen);
    }
}
