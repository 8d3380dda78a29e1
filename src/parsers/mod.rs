//! Response parsers — one per known `/models` wire format — and the registry
//! that resolves a `response_format` config string to one.
//!
//! Every parser maps raw bytes to `Vec<ModelInfo>` and shares the same rules:
//! empty input yields an empty list, malformed input yields a typed
//! [`ProfileError::Parse`] with no partial results, records with an empty
//! id/name are dropped silently, and `last_seen` is stamped once per call and
//! shared by every record the call returns.

mod common;
mod dmr;
mod lemonade;
mod llamacpp;
mod lmstudio;
mod ollama;
mod openai;
mod sglang;
mod vllm;
mod vllm_mlx;

pub use dmr::DmrParser;
pub use lemonade::LemonadeParser;
pub use llamacpp::LlamaCppParser;
pub use lmstudio::LmStudioParser;
pub use ollama::OllamaParser;
pub use openai::OpenAiParser;
pub use sglang::SglangParser;
pub use vllm::VllmParser;
pub use vllm_mlx::VllmMlxParser;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::ProfileError;
use crate::models::ModelInfo;

/// A parser for one provider's `/models` wire format.
pub trait ResponseParser: Send + Sync {
    /// Parse a raw response body into a flat list of models.
    ///
    /// Returns an empty `Vec` for empty input. Returns
    /// [`ProfileError::Parse`] on malformed JSON — never a partial list.
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError>;
}

/// Process-wide, immutable lookup from `response_format` string to parser.
///
/// Unknown or empty format strings resolve to the OpenAI-compatible parser —
/// the de facto lingua franca for this ecosystem.
pub struct ParserRegistry {
    parsers: HashMap<&'static str, Arc<dyn ResponseParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        let mut parsers: HashMap<&'static str, Arc<dyn ResponseParser>> = HashMap::new();
        parsers.insert("ollama", Arc::new(OllamaParser));
        parsers.insert("lmstudio", Arc::new(LmStudioParser));
        parsers.insert("openai", Arc::new(OpenAiParser));
        parsers.insert("llamacpp", Arc::new(LlamaCppParser));
        parsers.insert("vllm", Arc::new(VllmParser));
        parsers.insert("vllm-mlx", Arc::new(VllmMlxParser));
        parsers.insert("sglang", Arc::new(SglangParser));
        parsers.insert("lemonade", Arc::new(LemonadeParser));
        parsers.insert("dmr", Arc::new(DmrParser));
        Self { parsers }
    }

    /// Resolve a `response_format` string to its parser, falling back to the
    /// OpenAI-compatible parser for anything unrecognised or empty.
    pub fn resolve(&self, response_format: &str) -> Arc<dyn ResponseParser> {
        self.parsers.get(response_format).cloned().unwrap_or_else(|| {
            debug!(response_format, "no parser registered for format; falling back to openai-compatible");
            self.parsers["openai"].clone()
        })
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_format() {
        let registry = ParserRegistry::new();
        let bytes = br#"{"models":[]}"#;
        assert!(registry.resolve("ollama").parse(bytes).is_ok());
    }

    #[test]
    fn unknown_format_falls_back_to_openai() {
        let registry = ParserRegistry::new();
        let openai_bytes = br#"{"data":[{"id":"gpt-4","object":"model"}]}"#;
        let result = registry.resolve("something-unheard-of").parse(openai_bytes).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].model_type, "model");
    }

    #[test]
    fn empty_format_falls_back_to_openai() {
        let registry = ParserRegistry::new();
        assert!(Arc::ptr_eq(&registry.resolve(""), &registry.resolve("openai")));
    }
}
