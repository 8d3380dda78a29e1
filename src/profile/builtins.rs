//! Built-in profile configs — ollama, lm-studio, openai-compatible — so the
//! system is usable with no on-disk config directory at all.

use std::collections::HashMap;

use super::config::*;

/// The Ollama built-in, matching the worked example in the on-disk format
/// documentation field-for-field.
pub fn ollama() -> ProfileConfig {
    let mut capability_patterns = HashMap::new();
    capability_patterns.insert(
        "vision".to_string(),
        vec!["*llava*".to_string(), "*vision*".to_string(), "*bakllava*".to_string()],
    );
    capability_patterns.insert(
        "embeddings".to_string(),
        vec![
            "*embed*".to_string(),
            "nomic-embed-text".to_string(),
            "mxbai-embed-large".to_string(),
        ],
    );
    capability_patterns.insert(
        "code".to_string(),
        vec![
            "*code*".to_string(),
            "codellama*".to_string(),
            "deepseek-coder*".to_string(),
            "qwen*coder*".to_string(),
        ],
    );

    let multipliers = OrderedMultipliers(vec![
        ("q4".to_string(), 0.5),
        ("q5".to_string(), 0.625),
        ("q6".to_string(), 0.75),
        ("q8".to_string(), 0.875),
    ]);

    ProfileConfig {
        name: "ollama".to_string(),
        version: "1.0".to_string(),
        display_name: "Ollama".to_string(),
        description: "Local Ollama inference server".to_string(),
        routing: RoutingConfig {
            prefixes: vec!["ollama".to_string()],
        },
        api: ApiConfig {
            openai_compatible: true,
            paths: vec![
                "/".to_string(),
                "/api/generate".to_string(),
                "/api/chat".to_string(),
                "/api/embeddings".to_string(),
                "/api/tags".to_string(),
                "/api/show".to_string(),
                "/v1/models".to_string(),
                "/v1/chat/completions".to_string(),
                "/v1/completions".to_string(),
                "/v1/embeddings".to_string(),
            ],
            model_discovery_path: "/api/tags".to_string(),
            health_check_path: "/".to_string(),
            path_indices: PathIndices {
                health: Some(0),
                models: Some(4),
                completions: Some(1),
                chat_completions: Some(2),
                embeddings: Some(3),
            },
        },
        detection: DetectionConfig {
            user_agent_patterns: vec!["ollama/".to_string()],
            headers: HashMap::new(),
            path_indicators: vec!["/".to_string(), "/api/tags".to_string()],
            default_ports: vec![11434],
        },
        request: RequestConfig {
            response_format: "ollama".to_string(),
            parsing_rules: ParsingRules {
                chat_completions_path: "/api/chat".to_string(),
                completions_path: "/api/generate".to_string(),
                generate_path: "/api/generate".to_string(),
                model_field_name: "model".to_string(),
                supports_streaming: true,
            },
        },
        characteristics: CharacteristicsConfig {
            timeout_secs: 300,
            max_concurrent_requests: 10,
            default_priority: 100,
            streaming_support: true,
        },
        models: ModelsConfig {
            capability_patterns,
            context_patterns: vec![
                ContextPattern { pattern: "*:32k*".to_string(), context: 32768 },
                ContextPattern { pattern: "llama3*".to_string(), context: 8192 },
            ],
            name_format: "{name}".to_string(),
        },
        resources: ResourcesConfig {
            model_sizes: vec![
                ModelSizeEntry {
                    patterns: vec!["70b".to_string(), "72b".to_string()],
                    min_memory_gb: 40.0,
                    recommended_memory_gb: 48.0,
                    min_gpu_memory_gb: 40.0,
                    estimated_load_time_ms: 300_000,
                },
                ModelSizeEntry {
                    patterns: vec!["7b".to_string(), "8b".to_string()],
                    min_memory_gb: 6.0,
                    recommended_memory_gb: 8.0,
                    min_gpu_memory_gb: 6.0,
                    estimated_load_time_ms: 30_000,
                },
            ],
            quantization: QuantizationConfig { multipliers },
            concurrency_limits: vec![
                ConcurrencyLimit { min_memory_gb: 30.0, max_concurrent: 1 },
                ConcurrencyLimit { min_memory_gb: 15.0, max_concurrent: 2 },
                ConcurrencyLimit { min_memory_gb: 8.0, max_concurrent: 4 },
                ConcurrencyLimit { min_memory_gb: 0.0, max_concurrent: 8 },
            ],
            timeout_scaling: TimeoutScaling { base_timeout_secs: 30, load_time_buffer: true },
            defaults: ResourceDefaults {
                min_memory_gb: 4.0,
                recommended_memory_gb: 8.0,
                min_gpu_memory_gb: 4.0,
                requires_gpu: false,
                estimated_load_time_ms: 5_000,
            },
        },
    }
}

/// The LM Studio built-in.
pub fn lm_studio() -> ProfileConfig {
    let mut capability_patterns = HashMap::new();
    capability_patterns.insert(
        "vision".to_string(),
        vec!["*llava*".to_string(), "*vision*".to_string(), "*vl*".to_string()],
    );
    capability_patterns.insert("embeddings".to_string(), vec!["*embed*".to_string()]);
    capability_patterns.insert(
        "code".to_string(),
        vec!["*code*".to_string(), "*coder*".to_string()],
    );

    let multipliers = OrderedMultipliers(vec![
        ("q4".to_string(), 0.5),
        ("q5".to_string(), 0.625),
        ("q6".to_string(), 0.75),
        ("q8".to_string(), 0.875),
    ]);

    ProfileConfig {
        name: "lm-studio".to_string(),
        version: "1.0".to_string(),
        display_name: "LM Studio".to_string(),
        description: "Local LM Studio inference server".to_string(),
        routing: RoutingConfig {
            prefixes: vec!["lm-studio".to_string(), "lmstudio".to_string(), "lm_studio".to_string()],
        },
        api: ApiConfig {
            openai_compatible: true,
            paths: vec![
                "/v1/models".to_string(),
                "/v1/chat/completions".to_string(),
                "/v1/completions".to_string(),
                "/v1/embeddings".to_string(),
            ],
            model_discovery_path: "/v1/models".to_string(),
            health_check_path: "/v1/models".to_string(),
            path_indices: PathIndices {
                health: Some(0),
                models: Some(0),
                completions: Some(2),
                chat_completions: Some(1),
                embeddings: Some(3),
            },
        },
        detection: DetectionConfig {
            user_agent_patterns: vec!["lmstudio/".to_string()],
            headers: HashMap::new(),
            path_indicators: vec!["/v1/models".to_string()],
            default_ports: vec![1234],
        },
        request: RequestConfig {
            response_format: "lmstudio".to_string(),
            parsing_rules: ParsingRules {
                chat_completions_path: "/v1/chat/completions".to_string(),
                completions_path: "/v1/completions".to_string(),
                generate_path: "/v1/completions".to_string(),
                model_field_name: "model".to_string(),
                supports_streaming: true,
            },
        },
        characteristics: CharacteristicsConfig {
            timeout_secs: 300,
            max_concurrent_requests: 4,
            default_priority: 90,
            streaming_support: true,
        },
        models: ModelsConfig {
            capability_patterns,
            context_patterns: vec![],
            name_format: "{publisher}/{name}".to_string(),
        },
        resources: ResourcesConfig {
            model_sizes: vec![
                ModelSizeEntry {
                    patterns: vec!["70b".to_string(), "72b".to_string()],
                    min_memory_gb: 40.0,
                    recommended_memory_gb: 48.0,
                    min_gpu_memory_gb: 40.0,
                    estimated_load_time_ms: 300_000,
                },
                ModelSizeEntry {
                    patterns: vec!["7b".to_string(), "8b".to_string()],
                    min_memory_gb: 6.0,
                    recommended_memory_gb: 8.0,
                    min_gpu_memory_gb: 6.0,
                    estimated_load_time_ms: 30_000,
                },
            ],
            quantization: QuantizationConfig { multipliers },
            concurrency_limits: vec![
                ConcurrencyLimit { min_memory_gb: 30.0, max_concurrent: 1 },
                ConcurrencyLimit { min_memory_gb: 15.0, max_concurrent: 2 },
                ConcurrencyLimit { min_memory_gb: 0.0, max_concurrent: 4 },
            ],
            timeout_scaling: TimeoutScaling { base_timeout_secs: 0, load_time_buffer: false },
            defaults: ResourceDefaults {
                min_memory_gb: 4.0,
                recommended_memory_gb: 8.0,
                min_gpu_memory_gb: 4.0,
                requires_gpu: false,
                estimated_load_time_ms: 5_000,
            },
        },
    }
}

/// The OpenAI-compatible built-in — the universal fallback. Never returned
/// from `Factory::available_profiles`.
pub fn openai_compatible() -> ProfileConfig {
    let mut capability_patterns = HashMap::new();
    capability_patterns.insert("embeddings".to_string(), vec!["*embed*".to_string()]);
    capability_patterns.insert("vision".to_string(), vec!["*vision*".to_string()]);
    capability_patterns.insert("code".to_string(), vec!["*code*".to_string()]);

    ProfileConfig {
        name: "openai-compatible".to_string(),
        version: "1.0".to_string(),
        display_name: "OpenAI-compatible".to_string(),
        description: "Generic OpenAI-compatible cloud endpoint".to_string(),
        routing: RoutingConfig {
            prefixes: vec!["openai".to_string(), "openai-compatible".to_string()],
        },
        api: ApiConfig {
            openai_compatible: true,
            paths: vec![
                "/v1/models".to_string(),
                "/v1/chat/completions".to_string(),
                "/v1/completions".to_string(),
                "/v1/embeddings".to_string(),
            ],
            model_discovery_path: "/v1/models".to_string(),
            health_check_path: "/v1/models".to_string(),
            path_indices: PathIndices {
                health: Some(0),
                models: Some(0),
                completions: Some(2),
                chat_completions: Some(1),
                embeddings: Some(3),
            },
        },
        detection: DetectionConfig::default(),
        request: RequestConfig {
            response_format: "openai".to_string(),
            parsing_rules: ParsingRules {
                chat_completions_path: "/v1/chat/completions".to_string(),
                completions_path: "/v1/completions".to_string(),
                generate_path: "/v1/completions".to_string(),
                model_field_name: "model".to_string(),
                supports_streaming: true,
            },
        },
        characteristics: CharacteristicsConfig {
            timeout_secs: 120,
            max_concurrent_requests: 50,
            default_priority: 50,
            streaming_support: true,
        },
        models: ModelsConfig {
            capability_patterns,
            context_patterns: vec![],
            name_format: "{name}".to_string(),
        },
        // No model_sizes and a zero `defaults.min_memory_gb` — the
        // cloud/remote answer in every case.
        resources: ResourcesConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_named_after_themselves() {
        assert_eq!(ollama().name, "ollama");
        assert_eq!(lm_studio().name, "lm-studio");
        assert_eq!(openai_compatible().name, "openai-compatible");
    }

    #[test]
    fn openai_compatible_has_no_resource_table() {
        let cfg = openai_compatible();
        assert!(cfg.resources.model_sizes.is_empty());
        assert_eq!(cfg.resources.defaults.min_memory_gb, 0.0);
    }

    #[test]
    fn lm_studio_prefixes_cover_common_spellings() {
        let cfg = lm_studio();
        assert!(cfg.routing.prefixes.contains(&"lmstudio".to_string()));
        assert!(cfg.routing.prefixes.contains(&"lm_studio".to_string()));
    }
}
