//! Provider profile and model capability subsystem for a multi-provider
//! inference gateway.
//!
//! Normalises heterogeneous LLM-serving backends — local engines (Ollama,
//! LM Studio, llama.cpp), GPU-optimised runtimes (vLLM, vLLM-MLX, SGLang),
//! hardware-specialised runtimes (AMD Lemonade), container-based model
//! runners (Docker Model Runner), and generic OpenAI-compatible cloud
//! endpoints — into a single, routable abstraction: for a `(provider-hint,
//! model-name)` pair, which backend speaks this, where does it expose
//! models, how is its model listing decoded, and what resource footprint,
//! concurrency ceiling, timeout and capability set does the named model
//! imply.
//!
//! Everything is data-driven: new providers are added by dropping a
//! declarative profile file into a directory, not by changing code. See
//! [`factory::ProfileFactory`] for the entry point.

pub mod error;
pub mod factory;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod pattern;
pub mod profile;

pub use error::ProfileError;
pub use factory::{ProfileFactory, Resolution};
pub use loader::ProfileLoader;
pub use models::{ModelCapabilities, ModelDetails, ModelInfo, ResourceRequirements};
pub use parsers::{ParserRegistry, ResponseParser};
pub use profile::{ConfigurableProfile, PathIndices, Profile, ProfileConfig, ProfileFilter};
