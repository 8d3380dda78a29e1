//! AMD Lemonade `/v1/models` parser.
//!
//! Lemonade identifies models by checkpoint + recipe rather than a file
//! format; this parser infers the format from the recipe string (see
//! [`format_from_recipe`]) and the publisher from the checkpoint's
//! `org/repo`-style prefix.

use serde::Deserialize;

use super::common::{epoch_secs_to_datetime, now};
use super::ResponseParser;
use crate::error::ProfileError;
use crate::models::{ModelDetails, ModelInfo};

pub struct LemonadeParser;

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
    checkpoint: Option<String>,
    #[serde(default)]
    recipe: Option<String>,
    #[serde(default)]
    created: Option<i64>,
}

/// Map a Lemonade `recipe` identifier to the model file format it implies.
fn format_from_recipe(recipe: &str) -> Option<&'static str> {
    if recipe.starts_with("oga-") {
        Some("onnx")
    } else if recipe == "llamacpp" || recipe == "flm" {
        Some("gguf")
    } else {
        None
    }
}

/// Extract the publisher as the prefix of `checkpoint` before its first `/`,
/// only when a `/` is present and the prefix is non-empty.
fn publisher_from_checkpoint(checkpoint: &str) -> Option<String> {
    let (prefix, _) = checkpoint.split_once('/')?;
    if prefix.is_empty() {
        return None;
    }
    Some(prefix.to_string())
}

impl ResponseParser for LemonadeParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| ProfileError::Parse {
            provider: "lemonade",
            cause: e.to_string(),
        })?;

        let last_seen = now();
        let mut out = Vec::with_capacity(envelope.data.len());
        for entry in envelope.data {
            let id = match entry.id.filter(|n| !n.is_empty()) {
                Some(n) => n,
                None => continue,
            };

            let mut info = ModelInfo::new(id, "lemonade", last_seen);
            let publisher = entry
                .checkpoint
                .as_deref()
                .and_then(publisher_from_checkpoint);
            let format = entry
                .recipe
                .as_deref()
                .and_then(format_from_recipe)
                .map(str::to_string);

            info.details = Some(ModelDetails {
                checkpoint: entry.checkpoint,
                recipe: entry.recipe,
                publisher,
                format,
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
    fn scenario_s5_qwen_cpu_onnx() {
        let body = br#"{"object":"list","data":[
          {"id":"Qwen2.5-0.5B-Instruct-CPU","created":1759361710,
           "owned_by":"lemonade",
           "checkpoint":"amd/Qwen2.5-0.5B-Instruct-quantized_int4-float16-cpu-onnx",
           "recipe":"oga-cpu"}]}"#;
        let models = LemonadeParser.parse(body).unwrap();
        assert_eq!(models.len(), 1);
        let m = &models[0];
        assert_eq!(m.name, "Qwen2.5-0.5B-Instruct-CPU");
        assert_eq!(m.model_type, "lemonade");
        let details = m.details.as_ref().unwrap();
        assert_eq!(details.publisher.as_deref(), Some("amd"));
        assert_eq!(details.format.as_deref(), Some("onnx"));
        assert_eq!(details.recipe.as_deref(), Some("oga-cpu"));
        assert_eq!(details.modified_at, chrono::DateTime::from_timestamp(1759361710, 0));
    }

    #[test]
    fn llamacpp_and_flm_recipes_map_to_gguf() {
        assert_eq!(format_from_recipe("llamacpp"), Some("gguf"));
        assert_eq!(format_from_recipe("flm"), Some("gguf"));
        assert_eq!(format_from_recipe("oga-igpu"), Some("onnx"));
        assert_eq!(format_from_recipe("something-else"), None);
    }

    #[test]
    fn publisher_requires_slash_and_nonempty_prefix() {
        assert_eq!(publisher_from_checkpoint("amd/model"), Some("amd".to_string()));
        assert_eq!(publisher_from_checkpoint("no-slash-here"), None);
        assert_eq!(publisher_from_checkpoint("/model"), None);
    }
}
