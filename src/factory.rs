//! Thread-safe accessor over the profile loader: builds the alias/prefix
//! table, resolves provider hints to profiles, and falls back to the
//! OpenAI-compatible profile on a miss.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::ProfileError;
use crate::loader::ProfileLoader;
use crate::profile::{Profile, ProfileFilter};

const OPENAI_COMPATIBLE: &str = "openai-compatible";
const AUTO: &str = "auto";

/// What `Factory::get` resolved a name to.
pub enum Resolution {
    /// The caller asked for the `"auto"` sentinel; try provider detection.
    Auto,
    /// A concrete profile, either the alias's target or the OpenAI-compatible
    /// fallback.
    Profile(Arc<dyn Profile>),
}

/// Builds and guards the `prefix -> profile name` alias table over a
/// [`ProfileLoader`], and resolves provider hints against it.
pub struct ProfileFactory {
    loader: ProfileLoader,
    alias_table: RwLock<Arc<HashMap<String, String>>>,
}

impl ProfileFactory {
    pub fn new(profiles_dir: Option<PathBuf>, filter: ProfileFilter) -> Self {
        let loader = ProfileLoader::new(profiles_dir, filter);
        let table = build_alias_table(&loader.profiles());
        info!(aliases = table.len(), "profile factory constructed");
        let alias_table = RwLock::new(Arc::new(table));
        Self { loader, alias_table }
    }

    /// Resolve a provider hint to a profile.
    ///
    /// `"auto"` resolves to [`Resolution::Auto`] with no profile lookup.
    /// A known alias resolves to its target profile. Anything else falls
    /// back to the OpenAI-compatible profile; if none is loaded, this fails
    /// with [`ProfileError::ProfileNotFound`].
    pub fn get(&self, name: &str) -> Result<Resolution, ProfileError> {
        if name == AUTO {
            return Ok(Resolution::Auto);
        }

        let profiles = self.loader.profiles();
        let alias_table = self.alias_table.read().expect("alias table lock poisoned").clone();

        if let Some(target) = alias_table.get(name) {
            if let Some(profile) = profiles.get(target) {
                return Ok(Resolution::Profile(profile.clone()));
            }
        }

        profiles
            .get(OPENAI_COMPATIBLE)
            .cloned()
            .map(Resolution::Profile)
            .ok_or_else(|| ProfileError::ProfileNotFound(name.to_string()))
    }

    /// Every loaded profile name, sorted, excluding the OpenAI-compatible
    /// fallback.
    pub fn available_profiles(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loader
            .profiles()
            .keys()
            .filter(|name| name.as_str() != OPENAI_COMPATIBLE)
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Whether `name` is `"auto"`, a known alias, or a known profile name.
    pub fn validate(&self, name: &str) -> bool {
        if name == AUTO {
            return true;
        }
        let alias_table = self.alias_table.read().expect("alias table lock poisoned");
        alias_table.contains_key(name) || self.loader.profiles().contains_key(name)
    }

    /// The canonical profile name for an alias, or `name` unchanged if it
    /// resolves to nothing.
    pub fn normalise(&self, name: &str) -> String {
        let alias_table = self.alias_table.read().expect("alias table lock poisoned");
        alias_table.get(name).cloned().unwrap_or_else(|| name.to_string())
    }

    /// Rebuild the loader's profile map and the alias table. In-flight
    /// `get()` calls see either the pre- or post-reload state atomically,
    /// never a partial mix of the two.
    pub fn reload(&self) {
        self.loader.load_profiles();
        let rebuilt = build_alias_table(&self.loader.profiles());
        info!(aliases = rebuilt.len(), "profile factory reloaded");
        *self.alias_table.write().expect("alias table lock poisoned") = Arc::new(rebuilt);
    }
}

/// Build the alias table from profiles in sorted-name order: for each
/// profile, every entry of `routing.prefixes` then the profile's own name,
/// later writes overwriting earlier ones. Sorting by name first — rather
/// than walking the loader's `HashMap` in its arbitrary iteration order —
/// makes a colliding alias between two profiles resolve deterministically
/// to whichever profile name sorts last.
fn build_alias_table(profiles: &HashMap<String, Arc<dyn Profile>>) -> HashMap<String, String> {
    let mut names: Vec<&String> = profiles.keys().collect();
    names.sort();

    let mut table = HashMap::new();
    for name in names {
        let profile = &profiles[name];
        for alias in profile.aliases() {
            table.insert(alias.clone(), name.clone());
        }
        table.insert(name.clone(), name.clone());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileFilter;

    fn factory() -> ProfileFactory {
        ProfileFactory::new(None, ProfileFilter::pass_through())
    }

    #[test]
    fn auto_resolves_to_sentinel() {
        let factory = factory();
        assert!(matches!(factory.get("auto"), Ok(Resolution::Auto)));
    }

    #[test]
    fn unknown_name_falls_back_to_openai_compatible() {
        let factory = factory();
        match factory.get("something-unheard-of") {
            Ok(Resolution::Profile(profile)) => assert_eq!(profile.name(), "openai-compatible"),
            _ => panic!("expected an openai-compatible fallback"),
        }
    }

    #[test]
    fn known_alias_resolves_to_its_target_profile() {
        let factory = factory();
        match factory.get("lmstudio") {
            Ok(Resolution::Profile(profile)) => assert_eq!(profile.name(), "lm-studio"),
            _ => panic!("expected lm-studio via its lmstudio alias"),
        }
        assert_eq!(factory.normalise("lmstudio"), "lm-studio");
    }

    #[test]
    fn available_profiles_excludes_openai_compatible_fallback() {
        let factory = factory();
        let names = factory.available_profiles();
        assert!(!names.contains(&"openai-compatible".to_string()));
        assert!(names.contains(&"ollama".to_string()));
        assert_eq!(names, {
            let mut sorted = names.clone();
            sorted.sort();
            sorted
        });
    }

    #[test]
    fn validate_accepts_auto_and_known_names() {
        let factory = factory();
        assert!(factory.validate("auto"));
        assert!(factory.validate("ollama"));
        assert!(!factory.validate("does-not-exist"));
    }

    #[test]
    fn reload_rebuilds_alias_table() {
        let factory = factory();
        factory.reload();
        assert!(factory.validate("ollama"));
    }
}
