//! Property selection policy and its configuration.
//!
//! # Example Config
//!
//! ```toml
//! mode = "include"
//! properties = ["name", "balance"]
//! ```

use std::path::Path;

use im::HashSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Error, InvalidArgument, Result};

/// Identity accessor every bean carries; never exercised in exclude mode.
pub const CLASS_PROPERTY: &str = "class";

/// How the selection set is read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TestMode {
    /// Everything testable except the named properties
    #[default]
    Exclude,
    /// Only the named properties
    Include,
}

/// A fixed mode plus a set of property names that only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    mode: TestMode,
    names: HashSet<String>,
}

impl Selection {
    /// Exclude mode starts out excluding [`CLASS_PROPERTY`].
    #[must_use]
    pub fn new(mode: TestMode) -> Self {
        let names = match mode {
            TestMode::Exclude => HashSet::unit(CLASS_PROPERTY.to_string()),
            TestMode::Include => HashSet::new(),
        };
        Self { mode, names }
    }

    #[must_use]
    pub const fn mode(&self) -> TestMode {
        self.mode
    }

    /// Add an exclusion. Fails in include mode.
    pub fn exclude(&mut self, name: impl Into<String>) -> Result<()> {
        match self.mode {
            TestMode::Exclude => {
                self.names.insert(name.into());
                Ok(())
            }
            TestMode::Include => Err(InvalidArgument::ExclusionInIncludeMode.into()),
        }
    }

    /// Add an inclusion. Fails in exclude mode.
    pub fn include(&mut self, name: impl Into<String>) -> Result<()> {
        match self.mode {
            TestMode::Include => {
                self.names.insert(name.into());
                Ok(())
            }
            TestMode::Exclude => Err(InvalidArgument::InclusionInExcludeMode.into()),
        }
    }

    /// Add `name` without the mode check; config names always match the mode.
    pub(crate) fn select(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Whether a testable property called `name` gets exercised.
    #[must_use]
    pub fn selects(&self, name: &str) -> bool {
        match self.mode {
            TestMode::Exclude => !self.names.contains(name),
            TestMode::Include => self.names.contains(name),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in the set, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(TestMode::default())
    }
}

/// Selection policy as read from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    pub mode: TestMode,
    /// Excluded or included names, depending on `mode`
    pub properties: Vec<String>,
}

impl SelectionConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            InvalidArgument::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// The policy this config describes.
    #[must_use]
    pub fn to_selection(&self) -> Selection {
        self.properties
            .iter()
            .fold(Selection::new(self.mode), |mut selection, name| {
                selection.select(name.as_str());
                selection
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_mode_seeds_class() {
        let selection = Selection::new(TestMode::Exclude);
        assert!(selection.contains(CLASS_PROPERTY));
        assert!(!selection.selects(CLASS_PROPERTY));
        assert!(selection.selects("name"));
    }

    #[test]
    fn test_include_mode_starts_empty() {
        let selection = Selection::new(TestMode::Include);
        assert!(selection.is_empty());
        assert!(!selection.selects("name"));
        assert!(!selection.selects(CLASS_PROPERTY));
    }

    #[test]
    fn test_wrong_mode_mutations_fail() {
        let mut exclude = Selection::new(TestMode::Exclude);
        let err = exclude.include("name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot accept inclusion properties in EXCLUDE mode"
        );

        let mut include = Selection::new(TestMode::Include);
        let err = include.exclude("name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot accept exclusion properties in INCLUDE mode"
        );
        assert!(include.is_empty());
    }

    #[test]
    fn test_mutations_are_idempotent() {
        let mut selection = Selection::new(TestMode::Include);
        selection.include("name").unwrap();
        selection.include("name").unwrap();
        assert_eq!(selection.names(), vec!["name"]);
    }

    #[test]
    fn test_mode_parses_case_insensitively() {
        assert_eq!("Include".parse::<TestMode>().unwrap(), TestMode::Include);
        assert_eq!("EXCLUDE".parse::<TestMode>().unwrap(), TestMode::Exclude);
        assert_eq!(TestMode::Include.to_string(), "include");
        assert!("both".parse::<TestMode>().is_err());
    }

    #[test]
    fn test_config_defaults_to_exclude() {
        let config = SelectionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SelectionConfig::default());
        assert_eq!(config.to_selection(), Selection::new(TestMode::Exclude));
    }

    #[test]
    fn test_config_include_list() {
        let config =
            SelectionConfig::from_toml_str("mode = \"include\"\nproperties = [\"a\", \"b\"]")
                .unwrap();
        let selection = config.to_selection();
        assert_eq!(selection.mode(), TestMode::Include);
        assert_eq!(selection.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_config_selection_still_guards_mode() {
        let mut selection = SelectionConfig {
            mode: TestMode::Include,
            properties: vec!["a".into()],
        }
        .to_selection();
        assert!(selection.exclude("b").is_err());
        selection.include("b").unwrap();
        assert_eq!(selection.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let err = SelectionConfig::from_toml_str("modes = \"include\"").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument(InvalidArgument::Config(_))
        ));
    }

    #[test]
    fn test_config_rejects_unknown_mode() {
        assert!(SelectionConfig::from_toml_str("mode = \"sometimes\"").is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = SelectionConfig::load(Path::new("/nonexistent/beanprobe.toml")).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
