//! Error type for the profile/capability subsystem.
//!
//! Every fallible operation in this crate returns `Result<T, ProfileError>`.
//! Callers at the gateway boundary are expected to compose this with their
//! own `anyhow`/`thiserror` stacks via the standard [`std::error::Error`]
//! impl `thiserror` derives for us.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    /// No alias resolves and no OpenAI-compatible fallback is loaded.
    #[error("no profile found for `{0}` and no openai-compatible fallback is loaded")]
    ProfileNotFound(String),

    /// A URL handed to `validate_endpoint` is missing or schemeless.
    #[error("invalid endpoint `{0}`: {1}")]
    EndpointInvalid(String, &'static str),

    /// A provider's `/models` response could not be parsed.
    #[error("failed to parse {provider} response: {cause}")]
    Parse {
        provider: &'static str,
        cause: String,
    },

    /// The profile's `response_format` did not resolve to a known parser.
    #[error("no parser configured for response_format `{0}`")]
    NoParserConfigured(String),

    /// A profile config or filter pattern failed validation.
    #[error("invalid config field `{field}`: {reason}")]
    ConfigInvalid { field: String, reason: String },
}
