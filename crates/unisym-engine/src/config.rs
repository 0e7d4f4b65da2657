//! Analyzer configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! extract_imports = true
//! include_private = false
//! max_diagnostics_per_file = 50
//! threads = 4
//!
//! [extensions]
//! vue = "typescript"
//! csx = "csharp"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unisym_ast::Profile;
use unisym_symbols::ExtractOptions;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Also emit import symbols for `using`/`import` declarations
    pub extract_imports: bool,

    /// Keep private members in the symbol model
    pub include_private: bool,

    /// Cap on diagnostics kept per file; the overflow is summarised in one
    /// final warning
    pub max_diagnostics_per_file: Option<usize>,

    /// Worker count for batch analysis (`None` = rayon's default)
    pub threads: Option<usize>,

    /// Extra extension → profile mappings, checked before the built-in table
    pub extensions: BTreeMap<String, Profile>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extract_imports: false,
            include_private: true,
            max_diagnostics_per_file: None,
            threads: None,
            extensions: BTreeMap::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: AnalyzerConfig = toml::from_str(text)?;
        config.extensions = config
            .extensions
            .into_iter()
            .map(|(ext, profile)| (normalize_extension(&ext), profile))
            .collect();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == Some(0) {
            return Err(ConfigError::Invalid("threads must be at least 1".into()));
        }
        if self.max_diagnostics_per_file == Some(0) {
            return Err(ConfigError::Invalid(
                "max_diagnostics_per_file must be at least 1".into(),
            ));
        }
        if let Some(ext) = self.extensions.keys().find(|ext| normalize_extension(ext).is_empty()) {
            return Err(ConfigError::Invalid(format!("empty extension mapping {:?}", ext)));
        }
        Ok(())
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            include_private: self.include_private,
            extract_imports: self.extract_imports,
        }
    }

    /// Profile for `path`: configured extensions first, then the built-in
    /// table, then a look at the content
    pub fn resolve_profile(&self, path: &Path, text: &str) -> Option<Profile> {
        let configured = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.extensions.get(&normalize_extension(ext)))
            .copied();
        configured.or_else(|| Profile::detect(path, text))
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
