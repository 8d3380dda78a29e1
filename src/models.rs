//! Canonical per-model records produced by the response parsers and consumed
//! by capability/resource inference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A model as reported by a provider's `/models` listing, normalised to a
/// single shape regardless of which backend produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// The model's name/id as the provider reports it.
    pub name: String,
    /// Provider tag — `"ollama"`, `"lmstudio"`, `"llamacpp"`, `"vllm"`,
    /// `"vllm-mlx"`, `"lemonade"`, `"dmr"`, `"sglang"`, or the OpenAI `object`
    /// field verbatim for OpenAI-compatible backends.
    #[serde(rename = "type")]
    pub model_type: String,
    /// Wall-clock time this record was produced. Identical for every record
    /// returned by a single parse invocation.
    pub last_seen: DateTime<Utc>,
    /// Size in bytes, when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ModelDetails>,
}

impl ModelInfo {
    /// Build a bare record with only the fields every parser always knows.
    pub fn new(name: impl Into<String>, model_type: impl Into<String>, last_seen: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            model_type: model_type.into(),
            last_seen,
            size: None,
            description: None,
            details: None,
        }
    }
}

/// Provider-specific metadata about a model, populated field-by-field
/// depending on what each wire format exposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantization_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub families: Vec<String>,
    /// `gguf`, `mlx`, `onnx`, `safetensors`, or a pass-through value (e.g.
    /// LM Studio's `compatibility_type`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_model: Option<String>,
    /// LM Studio / Lemonade's `publisher`, kept distinct from `parent_model`
    /// — see the Open Question on this field in DESIGN.md.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_context_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    /// LM Studio's `llm`/`vlm`/`embeddings` classification, preserved
    /// verbatim. Distinct from `ModelInfo::model_type`, which carries the
    /// provider/`object` tag, not this per-model kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_kind: Option<String>,
}

/// Inferred capability class set for a named model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    pub chat_completion: bool,
    pub text_generation: bool,
    pub embeddings: bool,
    pub vision_understanding: bool,
    pub code_generation: bool,
    pub function_calling: bool,
    pub streaming_support: bool,
    pub max_context_length: u32,
    pub max_output_tokens: u32,
}

impl Default for ModelCapabilities {
    fn default() -> Self {
        Self {
            chat_completion: true,
            text_generation: true,
            embeddings: false,
            vision_understanding: false,
            code_generation: false,
            function_calling: false,
            streaming_support: false,
            max_context_length: 4096,
            max_output_tokens: 2048,
        }
    }
}

/// Inferred resource footprint for a named model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    pub min_memory_gb: f64,
    pub recommended_memory_gb: f64,
    pub requires_gpu: bool,
    pub min_gpu_memory_gb: f64,
    pub estimated_load_time_ms: u64,
}

impl ResourceRequirements {
    /// The all-zero "cloud/remote" answer — used when no size table applies.
    pub fn cloud_resident() -> Self {
        Self::default()
    }
}
