//! Include/exclude glob filter applied by the profile loader.

use crate::error::ProfileError;
use crate::pattern::{glob_match, validate_glob};

/// An include/exclude filter over profile names.
///
/// An item passes when `include` is empty, contains `"*"`, or any include
/// pattern matches — AND no exclude pattern matches. Exclude dominates
/// include on ties.
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

fn validate_filter_pattern(pattern: &str) -> Result<(), ProfileError> {
    if pattern.contains("**") {
        return Err(ProfileError::ConfigInvalid {
            field: "filter.pattern".to_string(),
            reason: format!("`**` is not a legal filter pattern: `{pattern}`"),
        });
    }
    validate_glob(pattern).map_err(|reason| ProfileError::ConfigInvalid {
        field: "filter.pattern".to_string(),
        reason,
    })
}

impl ProfileFilter {
    /// Build a filter, validating every pattern up front.
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Result<Self, ProfileError> {
        for pattern in include.iter().chain(exclude.iter()) {
            validate_filter_pattern(pattern)?;
        }
        Ok(Self { include, exclude })
    }

    /// An empty filter passes everything.
    pub fn pass_through() -> Self {
        Self::default()
    }

    /// Whether `name` passes this filter.
    pub fn passes(&self, name: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| glob_match(p, name));
        if !included {
            return false;
        }
        !self.exclude.iter().any(|p| glob_match(p, name))
    }

    /// Retain only the names that pass.
    pub fn apply<'a, I: IntoIterator<Item = &'a str>>(&self, names: I) -> Vec<&'a str> {
        names.into_iter().filter(|n| self.passes(n)).collect()
    }

    /// Combine two filters' pattern lists under union.
    pub fn union(&self, other: &ProfileFilter) -> ProfileFilter {
        let mut include = self.include.clone();
        include.extend(other.include.iter().cloned());
        let mut exclude = self.exclude.clone();
        exclude.extend(other.exclude.iter().cloned());
        ProfileFilter { include, exclude }
    }
}
