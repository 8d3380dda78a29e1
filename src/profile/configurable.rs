//! The data-driven `Profile`: wraps a [`ProfileConfig`] and a resolved
//! parser, and implements capability/resource/timeout/concurrency inference
//! purely from the config's pattern tables.

use std::sync::Arc;
use std::time::Duration;

use super::config::{PathIndices, ProfileConfig};
use crate::error::ProfileError;
use crate::models::{ModelCapabilities, ModelInfo, ResourceRequirements};
use crate::parsers::ResponseParser;
use crate::pattern::{contains_ci, glob_match};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_MAX_CONCURRENT_REQUESTS: u32 = 10;
const DEFAULT_PRIORITY: u32 = 50;

/// Config-shadowed request parsing rules, handed back to callers verbatim.
#[derive(Debug, Clone)]
pub struct ParsingRules {
    pub chat_completions_path: String,
    pub completions_path: String,
    pub generate_path: String,
    pub model_field_name: String,
    pub supports_streaming: bool,
}

/// Config-shadowed detection hints, handed back to callers verbatim.
#[derive(Debug, Clone)]
pub struct DetectionHints {
    pub user_agent_patterns: Vec<String>,
    pub path_indicators: Vec<String>,
    pub default_ports: Vec<u16>,
}

/// How to decode a `/models` response body: which parser, and which JSON
/// field the model array lives under.
#[derive(Debug, Clone)]
pub struct ModelResponseFormat {
    pub response_format: String,
    pub models_field_path: String,
}

/// The contract every profile — built-in or config-driven — satisfies.
pub trait Profile: Send + Sync {
    fn name(&self) -> &str;
    fn display_name(&self) -> &str;
    /// Ordered aliases that resolve to this profile, not including its own
    /// name (the factory adds that separately).
    fn aliases(&self) -> &[String];

    /// Strip a trailing `/` from `base`, then append `api.model_discovery_path`.
    fn model_discovery_url(&self, base: &str) -> String;

    /// The full configured path table.
    fn paths(&self) -> &[String];
    /// The path at `index`, or `""` if out of range. Never panics.
    fn path(&self, index: usize) -> &str;
    /// Named offsets into `paths()` — which index is the health check,
    /// model listing, completions, chat completions, or embeddings
    /// endpoint. A caller combines this with `path(i)` to resolve a role to
    /// a concrete path without having to know the profile's layout.
    fn path_indices(&self) -> PathIndices;

    fn request_parsing_rules(&self) -> ParsingRules;
    fn detection_hints(&self) -> DetectionHints;
    fn model_response_format(&self) -> ModelResponseFormat;

    fn timeout(&self) -> Duration;
    fn max_concurrent_requests(&self) -> u32;
    fn default_priority(&self) -> u32;

    fn validate_endpoint(&self, url: &str) -> Result<(), ProfileError>;
    fn parse_models(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError>;

    fn get_model_capabilities(&self, model_name: &str) -> ModelCapabilities;
    fn get_resource_requirements(&self, model_name: &str) -> ResourceRequirements;
    fn optimal_concurrency(&self, model_name: &str) -> u32;
    fn request_timeout(&self, model_name: &str) -> Duration;

    /// Identity by default; a profile may rewrite the display name it hands
    /// back to callers (LM Studio's `publisher/name` heuristic).
    fn transform_model_name(&self, model_name: &str) -> String {
        model_name.to_string()
    }
}

/// A `Profile` built entirely from a [`ProfileConfig`] plus whichever parser
/// its `response_format` resolves to.
pub struct ConfigurableProfile {
    config: Arc<ProfileConfig>,
    parser: Option<Arc<dyn ResponseParser>>,
}

impl ConfigurableProfile {
    pub fn new(config: Arc<ProfileConfig>, parser: Option<Arc<dyn ResponseParser>>) -> Self {
        Self { config, parser }
    }

    pub fn config(&self) -> &Arc<ProfileConfig> {
        &self.config
    }
}

impl Profile for ConfigurableProfile {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn display_name(&self) -> &str {
        &self.config.display_name
    }

    fn aliases(&self) -> &[String] {
        &self.config.routing.prefixes
    }

    fn model_discovery_url(&self, base: &str) -> String {
        let base = base.strip_suffix('/').unwrap_or(base);
        format!("{base}{}", self.config.api.model_discovery_path)
    }

    fn paths(&self) -> &[String] {
        &self.config.api.paths
    }

    fn path(&self, index: usize) -> &str {
        self.config.api.paths.get(index).map(String::as_str).unwrap_or("")
    }

    fn path_indices(&self) -> PathIndices {
        self.config.api.path_indices.clone()
    }

    fn request_parsing_rules(&self) -> ParsingRules {
        let rules = &self.config.request.parsing_rules;
        ParsingRules {
            chat_completions_path: rules.chat_completions_path.clone(),
            completions_path: rules.completions_path.clone(),
            generate_path: rules.generate_path.clone(),
            model_field_name: rules.model_field_name.clone(),
            supports_streaming: rules.supports_streaming,
        }
    }

    fn detection_hints(&self) -> DetectionHints {
        let detection = &self.config.detection;
        DetectionHints {
            user_agent_patterns: detection.user_agent_patterns.clone(),
            path_indicators: detection.path_indicators.clone(),
            default_ports: detection.default_ports.clone(),
        }
    }

    fn model_response_format(&self) -> ModelResponseFormat {
        let response_format = self.config.request.response_format.clone();
        let models_field_path = if response_format == "ollama" {
            "models".to_string()
        } else {
            "data".to_string()
        };
        ModelResponseFormat { response_format, models_field_path }
    }

    fn timeout(&self) -> Duration {
        let secs = self.config.characteristics.timeout_secs;
        if secs == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(secs)
        }
    }

    fn max_concurrent_requests(&self) -> u32 {
        let n = self.config.characteristics.max_concurrent_requests;
        if n == 0 {
            DEFAULT_MAX_CONCURRENT_REQUESTS
        } else {
            n
        }
    }

    fn default_priority(&self) -> u32 {
        let p = self.config.characteristics.default_priority;
        if p == 0 {
            DEFAULT_PRIORITY
        } else {
            p
        }
    }

    fn validate_endpoint(&self, url: &str) -> Result<(), ProfileError> {
        if url.is_empty() {
            return Err(ProfileError::EndpointInvalid(url.to_string(), "endpoint is missing"));
        }
        match url.split_once("://") {
            Some((scheme, _)) if !scheme.is_empty() => Ok(()),
            _ => Err(ProfileError::EndpointInvalid(url.to_string(), "endpoint has no scheme")),
        }
    }

    fn parse_models(&self, bytes: &[u8]) -> Result<Vec<ModelInfo>, ProfileError> {
        let parser = self
            .parser
            .as_ref()
            .ok_or_else(|| ProfileError::NoParserConfigured(self.config.request.response_format.clone()))?;
        let mut models = parser.parse(bytes)?;
        // Ollama's parser leaves `type` blank; the profile fills it in from
        // the response format it configured the parser with.
        for model in &mut models {
            if model.model_type.is_empty() {
                model.model_type = self.config.request.response_format.clone();
            }
        }
        Ok(models)
    }

    fn get_model_capabilities(&self, model_name: &str) -> ModelCapabilities {
        let models = &self.config.models;
        let mut caps = ModelCapabilities {
            streaming_support: self.config.request.parsing_rules.supports_streaming,
            ..ModelCapabilities::default()
        };

        let matches = |capability: &str| -> bool {
            models
                .capability_patterns
                .get(capability)
                .is_some_and(|patterns| patterns.iter().any(|p| glob_match(p, model_name)))
        };

        let is_embeddings = matches("embeddings");
        let is_vision = matches("vision");
        let is_code = matches("code");

        if is_embeddings {
            caps.embeddings = true;
            caps.chat_completion = false;
            caps.text_generation = false;
        }
        if is_vision {
            caps.vision_understanding = true;
        }
        if is_code {
            caps.code_generation = true;
        }
        if !is_embeddings && !is_vision && !is_code {
            caps.function_calling = true;
        }

        for entry in &models.context_patterns {
            if glob_match(&entry.pattern, model_name) {
                caps.max_context_length = entry.context;
                break;
            }
        }

        caps
    }

    fn get_resource_requirements(&self, model_name: &str) -> ResourceRequirements {
        let resources = &self.config.resources;

        if resources.model_sizes.is_empty() && resources.defaults.min_memory_gb == 0.0 {
            return ResourceRequirements::cloud_resident();
        }

        let mut requirements = resources
            .model_sizes
            .iter()
            .find(|entry| entry.patterns.iter().any(|p| contains_ci(p, model_name)))
            .map(|entry| ResourceRequirements {
                min_memory_gb: entry.min_memory_gb,
                recommended_memory_gb: entry.recommended_memory_gb,
                requires_gpu: resources.defaults.requires_gpu,
                min_gpu_memory_gb: entry.min_gpu_memory_gb,
                estimated_load_time_ms: entry.estimated_load_time_ms,
            })
            .unwrap_or(ResourceRequirements {
                min_memory_gb: resources.defaults.min_memory_gb,
                recommended_memory_gb: resources.defaults.recommended_memory_gb,
                requires_gpu: resources.defaults.requires_gpu,
                min_gpu_memory_gb: resources.defaults.min_gpu_memory_gb,
                estimated_load_time_ms: resources.defaults.estimated_load_time_ms,
            });

        if let Some((_, multiplier)) = resources
            .quantization
            .multipliers
            .iter()
            .find(|(token, _)| contains_ci(token, model_name))
        {
            requirements.min_memory_gb *= multiplier;
            requirements.recommended_memory_gb *= multiplier;
            requirements.min_gpu_memory_gb *= multiplier;
        }

        requirements
    }

    fn optimal_concurrency(&self, model_name: &str) -> u32 {
        let limits = &self.config.resources.concurrency_limits;
        if limits.is_empty() {
            return self.max_concurrent_requests();
        }

        let min_memory_gb = self.get_resource_requirements(model_name).min_memory_gb;
        limits
            .iter()
            .find(|limit| limit.min_memory_gb <= min_memory_gb)
            .map(|limit| limit.max_concurrent)
            .unwrap_or_else(|| self.max_concurrent_requests())
    }

    fn request_timeout(&self, model_name: &str) -> Duration {
        let scaling = &self.config.resources.timeout_scaling;
        let mut base = self.timeout();
        if scaling.base_timeout_secs > 0 {
            base = Duration::from_secs(scaling.base_timeout_secs);
        }
        if scaling.load_time_buffer {
            let load_time = self.get_resource_requirements(model_name).estimated_load_time_ms;
            base += Duration::from_millis(load_time);
        }
        base
    }

    fn transform_model_name(&self, model_name: &str) -> String {
        model_name.to_string()
    }
}
