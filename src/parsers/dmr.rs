//! Docker Model Runner `/v1/models` parser.

use serde::Deserialize;

use super::common::{epoch_secs_to_datetime, now, publisher_from_owned_by};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct DmrParser;

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

impl ResponseParser for DmrParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "dmr",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.data.len());
        for entry in envelope.data {
            let id = match entry.id.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            // DMR can in principle serve non-GGUF container images; this
            // parser always reports gguf until the response shape threads
            // format through (see the DESIGN.md open question).
            let mut info = ModelInfo::new(id, "dmr", last_seen);
            info.details = Some(ModelDetails {
                format: Some("gguf".to_string()),
                publisher: publisher_from_owned_by(entry.owned_by.as_deref(), &["docker"]),
                modified_at: entry.created.and_then(epoch_secs_to_datetime),
                ..Default::default()
            });
            out.push(info);
        }
        Ok(out)
    }
}
