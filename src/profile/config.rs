//! Declarative profile config schema — the record an on-disk YAML profile
//! deserialises into, and the in-memory shape the built-ins construct
//! directly.
//!
//! # Example
//!
//! ```yaml
//! name: ollama
//! version: "1.0"
//! display_name: Ollama
//! routing:
//!   prefixes: [ollama]
//! api:
//!   openai_compatible: true
//!   paths: ["/", "/api/generate"]
//!   model_discovery_path: /api/tags
//!   health_check_path: /
//! characteristics:
//!   timeout_secs: 300
//!   max_concurrent_requests: 10
//!   default_priority: 100
//!   streaming_support: true
//! request:
//!   response_format: ollama
//!   parsing_rules:
//!     chat_completions_path: /api/chat
//!     completions_path: /api/generate
//!     generate_path: /api/generate
//!     model_field_name: model
//!     supports_streaming: true
//! models:
//!   capability_patterns:
//!     vision: ["*llava*"]
//!     embeddings: ["*embed*"]
//!     code: ["*code*"]
//!   context_patterns:
//!     - pattern: "*:32k*"
//!       context: 32768
//! resources:
//!   model_sizes:
//!     - patterns: ["70b", "72b"]
//!       min_memory_gb: 40
//!       recommended_memory_gb: 48
//!       min_gpu_memory_gb: 40
//!       estimated_load_time_ms: 300000
//!   quantization:
//!     multipliers: { q4: 0.5 }
//!   concurrency_limits:
//!     - min_memory_gb: 30
//!       max_concurrent: 1
//!   timeout_scaling:
//!     base_timeout_secs: 30
//!     load_time_buffer: true
//!   defaults:
//!     min_memory_gb: 4
//!     recommended_memory_gb: 8
//!     min_gpu_memory_gb: 4
//!     requires_gpu: false
//!     estimated_load_time_ms: 5000
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

fn default_version() -> String {
    "1.0".to_string()
}

/// The full declarative record a `Profile` is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub characteristics: CharacteristicsConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub resources: ResourcesConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Ordered aliases that resolve to this profile.
    #[serde(default)]
    pub prefixes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub openai_compatible: bool,
    /// Ordered path table, indexed by [`PathIndices`].
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub model_discovery_path: String,
    #[serde(default)]
    pub health_check_path: String,
    #[serde(default)]
    pub path_indices: PathIndices,
}

/// Named offsets into [`ApiConfig::paths`]. `None` means the role has no
/// entry in the path table for this profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathIndices {
    #[serde(default)]
    pub health: Option<usize>,
    #[serde(default)]
    pub models: Option<usize>,
    #[serde(default)]
    pub completions: Option<usize>,
    #[serde(default)]
    pub chat_completions: Option<usize>,
    #[serde(default)]
    pub embeddings: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default)]
    pub user_agent_patterns: Vec<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub path_indicators: Vec<String>,
    #[serde(default)]
    pub default_ports: Vec<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Selects the parser from the registry. Empty/unknown falls back to
    /// OpenAI-compatible.
    #[serde(default)]
    pub response_format: String,
    #[serde(default)]
    pub parsing_rules: ParsingRules,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingRules {
    #[serde(default)]
    pub chat_completions_path: String,
    #[serde(default)]
    pub completions_path: String,
    #[serde(default)]
    pub generate_path: String,
    #[serde(default)]
    pub model_field_name: String,
    #[serde(default)]
    pub supports_streaming: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacteristicsConfig {
    /// Request timeout in seconds. `0` means "use the 2-minute default".
    #[serde(default)]
    pub timeout_secs: u64,
    #[serde(default)]
    pub max_concurrent_requests: u32,
    #[serde(default)]
    pub default_priority: u32,
    #[serde(default)]
    pub streaming_support: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default)]
    pub capability_patterns: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub context_patterns: Vec<ContextPattern>,
    #[serde(default)]
    pub name_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPattern {
    pub pattern: String,
    pub context: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    #[serde(default)]
    pub model_sizes: Vec<ModelSizeEntry>,
    #[serde(default)]
    pub quantization: QuantizationConfig,
    /// Most-restrictive-first; the first entry whose `min_memory_gb` is at
    /// or below the model's inferred `min_memory_gb` wins.
    #[serde(default)]
    pub concurrency_limits: Vec<ConcurrencyLimit>,
    #[serde(default)]
    pub timeout_scaling: TimeoutScaling,
    #[serde(default)]
    pub defaults: ResourceDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSizeEntry {
    /// Raw case-insensitive substrings — NOT globs.
    pub patterns: Vec<String>,
    pub min_memory_gb: f64,
    pub recommended_memory_gb: f64,
    pub min_gpu_memory_gb: f64,
    pub estimated_load_time_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantizationConfig {
    /// Raw case-insensitive substring tokens (e.g. `q4`) → memory multiplier,
    /// in declaration order. Order matters: only the first matching token
    /// applies, so this is an [`OrderedMultipliers`], not a `HashMap`.
    #[serde(default)]
    pub multipliers: OrderedMultipliers,
}

/// An insertion-order-preserving `token -> multiplier` table.
///
/// Deserialises from the same `{ q4: 0.5, q5: 0.625 }` YAML/JSON mapping
/// shape a `HashMap` would, but — unlike a `HashMap` — remembers the order
/// keys appeared in the source document, which `quantization.multipliers`
/// matching depends on for determinism.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedMultipliers(pub Vec<(String, f64)>);

impl OrderedMultipliers {
    pub fn iter(&self) -> impl Iterator<Item = &(String, f64)> {
        self.0.iter()
    }
}

impl Serialize for OrderedMultipliers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderedMultipliers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MultipliersVisitor;

        impl<'de> serde::de::Visitor<'de> for MultipliersVisitor {
            type Value = OrderedMultipliers;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of quantization token to multiplier")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, f64>()? {
                    out.push(entry);
                }
                Ok(OrderedMultipliers(out))
            }
        }

        deserializer.deserialize_map(MultipliersVisitor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcurrencyLimit {
    pub min_memory_gb: f64,
    pub max_concurrent: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeoutScaling {
    #[serde(default)]
    pub base_timeout_secs: u64,
    #[serde(default)]
    pub load_time_buffer: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ResourceDefaults {
    #[serde(default)]
    pub min_memory_gb: f64,
    #[serde(default)]
    pub recommended_memory_gb: f64,
    #[serde(default)]
    pub min_gpu_memory_gb: f64,
    #[serde(default)]
    pub requires_gpu: bool,
    #[serde(default)]
    pub estimated_load_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_version_defaults_to_1_0() {
        let cfg: ProfileConfig = serde_yaml::from_str("name: x\n").unwrap();
        assert_eq!(cfg.version, "1.0");
    }

    #[test]
    fn deserializes_the_documented_example() {
        let yaml = r#"
name: ollama
version: "1.0"
display_name: Ollama
routing:
  prefixes: [ollama]
api:
  openai_compatible: true
  paths: ["/", "/api/generate", "/api/chat", "/api/embeddings", "/api/tags"]
  model_discovery_path: /api/tags
  health_check_path: /
  path_indices: { health: 0, models: 4, completions: 1, chat_completions: 2, embeddings: 3 }
characteristics:
  timeout_secs: 300
  max_concurrent_requests: 10
  default_priority: 100
  streaming_support: true
request:
  response_format: ollama
  parsing_rules:
    chat_completions_path: /api/chat
    completions_path: /api/generate
    generate_path: /api/generate
    model_field_name: model
    supports_streaming: true
models:
  capability_patterns:
    vision: ["*llava*", "*vision*"]
    embeddings: ["*embed*"]
  context_patterns:
    - { pattern: "*:32k*", context: 32768 }
    - { pattern: "llama3*", context: 8192 }
resources:
  model_sizes:
    - { patterns: ["70b", "72b"], min_memory_gb: 40, recommended_memory_gb: 48, min_gpu_memory_gb: 40, estimated_load_time_ms: 300000 }
  quantization:
    multipliers: { q4: 0.5, q5: 0.625 }
  concurrency_limits:
    - { min_memory_gb: 30, max_concurrent: 1 }
    - { min_memory_gb: 0, max_concurrent: 8 }
  timeout_scaling: { base_timeout_secs: 30, load_time_buffer: true }
  defaults: { min_memory_gb: 4, recommended_memory_gb: 8, min_gpu_memory_gb: 4, requires_gpu: false, estimated_load_time_ms: 5000 }
"#;
        let cfg: ProfileConfig = serde_yaml::from_str(yaml).expect("example profile should parse");
        assert_eq!(cfg.name, "ollama");
        assert_eq!(cfg.routing.prefixes, vec!["ollama".to_string()]);
        assert_eq!(cfg.resources.model_sizes[0].min_memory_gb, 40.0);
        assert_eq!(cfg.resources.concurrency_limits.len(), 2);
    }
}
