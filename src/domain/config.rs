use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for corpus scanning and parsing.
///
/// Stored as `.qbank/config.toml` in the corpus root. Every field has a
/// default so a missing file is equivalent to an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Accepted question-heading prefixes, matched case-insensitively.
    ///
    /// A bare numbered heading (`## 12. Title`) is always accepted; prefixes
    /// additionally allow forms such as `## Q12. Title`.
    prefixes: Vec<String>,

    /// Language tag assigned to fenced code blocks whose opening fence
    /// carries no language token.
    fallback_language: String,

    /// File names excluded from the corpus scan.
    ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefixes: default_prefixes(),
            fallback_language: default_fallback_language(),
            ignore: default_ignore(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the accepted question-heading prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns the language tag used for unlabelled code fences.
    #[must_use]
    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    /// Checks whether a file name is excluded from the corpus scan.
    #[must_use]
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore.iter().any(|name| name == file_name)
    }
}

fn default_prefixes() -> Vec<String> {
    vec!["Q".to_string(), "Question".to_string()]
}

fn default_fallback_language() -> String {
    "text".to_string()
}

fn default_ignore() -> Vec<String> {
    vec!["README.md".to_string(), "SUMMARY.md".to_string()]
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_prefixes")]
        prefixes: Vec<String>,

        #[serde(default = "default_fallback_language")]
        fallback_language: String,

        #[serde(default = "default_ignore")]
        ignore: Vec<String>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                prefixes,
                fallback_language,
                ignore,
            } => Self {
                prefixes,
                fallback_language,
                ignore,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            prefixes: config.prefixes,
            fallback_language: config.fallback_language,
            ignore: config.ignore,
        }
    }
}
