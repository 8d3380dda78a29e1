//! The profile subsystem: declarative config, the configurable `Profile`
//! implementation, built-in defaults, and the include/exclude filter.

pub mod builtins;
pub mod config;
pub mod configurable;
pub mod filter;

pub use config::{PathIndices, ProfileConfig};
pub use configurable::{ConfigurableProfile, DetectionHints, ModelResponseFormat, ParsingRules, Profile};
pub use filter::ProfileFilter;
