use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    corpus::is_glob_pattern,
    differ::TagCheckExemption,
    patterns::{CallPattern, validate_template},
};

pub const CONFIG_FILE_NAME: &str = ".locscanrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_locales_root")]
    pub locales_root: String,
    #[serde(default = "default_master_locale")]
    pub master_locale: String,
    #[serde(default = "default_dictionary_file")]
    pub dictionary_file: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub call_patterns: Vec<CallPattern>,
    #[serde(default)]
    pub intentionally_unused: Vec<String>,
    #[serde(default)]
    pub tag_check_exemptions: Vec<TagCheckExemption>,
    #[serde(default)]
    pub static_replacements: BTreeMap<String, String>,
}

fn default_source_root() -> String {
    "./ts".to_string()
}

fn default_locales_root() -> String {
    "./_locales".to_string()
}

fn default_master_locale() -> String {
    "en".to_string()
}

fn default_dictionary_file() -> String {
    "messages.json".to_string()
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx"].map(String::from).to_vec()
}

fn default_ignores() -> Vec<String> {
    vec!["LocalizerKeys.ts".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            locales_root: default_locales_root(),
            master_locale: default_master_locale(),
            dictionary_file: default_dictionary_file(),
            extensions: default_extensions(),
            ignores: default_ignores(),
            call_patterns: Vec::new(),
            intentionally_unused: Vec::new(),
            tag_check_exemptions: Vec::new(),
            static_replacements: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, call patterns
    /// that lack `{key}` or do not compile, and an empty extension list.
    pub fn validate(&self) -> Result<()> {
        // Entries without wildcards are plain path fragments.
        for pattern in &self.ignores {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }

        for pattern in &self.call_patterns {
            validate_template(pattern).context("Invalid entry in 'callPatterns'")?;
        }

        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }
        if self.master_locale.trim().is_empty() {
            bail!("'masterLocale' must not be empty");
        }

        Ok(())
    }

    pub fn source_root(&self) -> PathBuf {
        PathBuf::from(&self.source_root)
    }

    pub fn locales_root(&self) -> PathBuf {
        PathBuf::from(&self.locales_root)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the file the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {}", path.display()))?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
