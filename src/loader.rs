//! Seeds the built-in profiles, overlays any on-disk YAML profiles found in
//! a directory, applies an include/exclude filter, and publishes the result
//! under a read/write lock.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::parsers::ParserRegistry;
use crate::profile::configurable::ConfigurableProfile;
use crate::profile::{builtins, Profile, ProfileConfig, ProfileFilter};

/// Extensions a file may carry to be considered a profile on disk.
const PROFILE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Seeds built-ins, overlays a directory of on-disk profiles, and exposes
/// the resulting name → profile map behind a read/write lock.
pub struct ProfileLoader {
    profiles_dir: Option<PathBuf>,
    filter: ProfileFilter,
    parsers: Arc<ParserRegistry>,
    profiles: RwLock<Arc<HashMap<String, Arc<dyn Profile>>>>,
}

impl ProfileLoader {
    /// Build a loader and perform its initial load synchronously.
    pub fn new(profiles_dir: Option<PathBuf>, filter: ProfileFilter) -> Self {
        let loader = Self {
            profiles_dir,
            filter,
            parsers: Arc::new(ParserRegistry::new()),
            profiles: RwLock::new(Arc::new(HashMap::new())),
        };
        loader.load_profiles();
        loader
    }

    fn instantiate(&self, config: ProfileConfig) -> (String, Arc<dyn Profile>) {
        let parser = Some(self.parsers.resolve(&config.request.response_format));
        let name = config.name.clone();
        let profile: Arc<dyn Profile> = Arc::new(ConfigurableProfile::new(Arc::new(config), parser));
        (name, profile)
    }

    /// Seed built-ins, overlay any on-disk profiles, apply the filter, and
    /// publish the result in one write.
    pub fn load_profiles(&self) {
        let mut configs: HashMap<String, ProfileConfig> = HashMap::new();
        for config in [builtins::ollama(), builtins::lm_studio(), builtins::openai_compatible()] {
            configs.insert(config.name.clone(), config);
        }

        if let Some(dir) = &self.profiles_dir {
            for config in read_profile_directory(dir) {
                configs.insert(config.name.clone(), config);
            }
        }

        let allowed_names: Vec<&str> = self.filter.apply(configs.keys().map(String::as_str));
        let allowed_names: std::collections::HashSet<&str> = allowed_names.into_iter().collect();

        let mut built: HashMap<String, Arc<dyn Profile>> = HashMap::new();
        for (name, config) in configs {
            if !allowed_names.contains(name.as_str()) {
                continue;
            }
            let (name, profile) = self.instantiate(config);
            built.insert(name, profile);
        }

        info!(profiles = built.len(), "loaded profile map");
        *self.profiles.write().expect("profile loader lock poisoned") = Arc::new(built);
    }

    /// A point-in-time snapshot of the published profile map.
    pub fn profiles(&self) -> Arc<HashMap<String, Arc<dyn Profile>>> {
        self.profiles.read().expect("profile loader lock poisoned").clone()
    }
}

/// Walk `dir` for `.yaml` files, deserialising each into a [`ProfileConfig`].
/// A file that fails to parse or deserialise is skipped with a warning, not
/// an abort; a profile with no `name` is rejected the same way.
fn read_profile_directory(dir: &Path) -> Vec<ProfileConfig> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "profiles directory is not readable; skipping overlay");
            return Vec::new();
        }
    };

    let mut configs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_profile_file = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| PROFILE_EXTENSIONS.contains(&ext));
        if !is_profile_file {
            continue;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "failed to read profile file");
                continue;
            }
        };

        match serde_yaml::from_str::<ProfileConfig>(&contents) {
            Ok(config) if config.name.is_empty() => {
                warn!(file = %path.display(), "profile has no name; skipping");
            }
            Ok(config) => configs.push(config),
            Err(err) => {
                warn!(file = %path.display(), error = %err, "failed to deserialise profile");
            }
        }
    }
    configs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_built_ins_with_no_profiles_directory() {
        let loader = ProfileLoader::new(None, ProfileFilter::pass_through());
        let profiles = loader.profiles();
        assert!(profiles.contains_key("ollama"));
        assert!(profiles.contains_key("lm-studio"));
        assert!(profiles.contains_key("openai-compatible"));
    }

    #[test]
    fn filter_restricts_the_published_map() {
        let filter = ProfileFilter::new(vec!["ollama".into()], vec![]).unwrap();
        let loader = ProfileLoader::new(None, filter);
        let profiles = loader.profiles();
        assert_eq!(profiles.len(), 1);
        assert!(profiles.contains_key("ollama"));
    }

    #[test]
    fn missing_profiles_directory_falls_back_to_built_ins_only() {
        let loader = ProfileLoader::new(Some(PathBuf::from("/nonexistent/path")), ProfileFilter::pass_through());
        assert_eq!(loader.profiles().len(), 3);
    }

    #[test]
    fn reload_rebuilds_the_published_map() {
        let loader = ProfileLoader::new(None, ProfileFilter::pass_through());
        let before = loader.profiles();
        loader.load_profiles();
        let after = loader.profiles();
        assert_eq!(before.len(), after.len());
        assert!(!Arc::ptr_eq(&before, &after));
    }

    /// A unique scratch directory under the OS temp dir, removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(label: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("llm-profile-core-test-{label}"));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).expect("create scratch dir");
            Self(dir)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn yaml_and_yml_extensions_are_both_overlaid() {
        let scratch = ScratchDir::new("yaml-yml");
        fs::write(scratch.0.join("a.yaml"), "name: custom-a\n").unwrap();
        fs::write(scratch.0.join("b.yml"), "name: custom-b\n").unwrap();
        fs::write(scratch.0.join("c.txt"), "name: ignored\n").unwrap();

        let loader = ProfileLoader::new(Some(scratch.0.clone()), ProfileFilter::pass_through());
        let profiles = loader.profiles();
        assert!(profiles.contains_key("custom-a"));
        assert!(profiles.contains_key("custom-b"));
        assert!(!profiles.contains_key("ignored"));
    }
}
