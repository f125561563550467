//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/csvcount/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use csvcount_core::discovery::{compile_pattern, DEFAULT_PATTERN};
use directories::BaseDirs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{confirm, CommandContext, CommandError, ConfirmResult, Overrides, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CSVCOUNT_CONFIG";

pub const DEFAULT_INPUT_DIR: &str = "unfiltered_CLC_data";
pub const DEFAULT_FILTER_FILE: &str = "filters.csv";
pub const DEFAULT_RESULTS_FILE: &str = "results.csv";
pub const DEFAULT_ERROR_FILE: &str = "errors.csv";
pub const DEFAULT_SAMPLE_FILTER_FILE: &str = "filters_SAMPLE.csv";

/// Keys accepted by `config set`.
const VALID_KEYS: &[&str] = &[
    "case_sensitive",
    "paths.input_dir",
    "paths.filter_file",
    "paths.results_file",
    "paths.error_file",
    "paths.sample_filter_file",
    "discovery.pattern",
];

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# csvcount configuration

# Config schema version (do not modify)
version = 1

# Compare OR-set values case-sensitively
# case_sensitive = true

# Relative paths are resolved against the working directory
[paths]
# input_dir = "unfiltered_CLC_data"
# filter_file = "filters.csv"
# results_file = "results.csv"
# error_file = "errors.csv"
# sample_filter_file = "filters_SAMPLE.csv"

# Input file names must match this pattern; group 1 is the file number
[discovery]
# pattern = '^.*_([0-9]{3})_g1_.*\.csv$'
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Compare OR-set values case-sensitively.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    /// File locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Input file discovery.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            case_sensitive: None,
            paths: PathsConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

/// File location configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_filter_file: Option<PathBuf>,
}

/// Input discovery configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File name pattern; capture group 1 is the file number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Effective settings for one invocation: config values with defaults
/// filled in and command-line overrides applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub case_sensitive: bool,
    pub input_dir: PathBuf,
    pub filter_file: PathBuf,
    pub results_file: PathBuf,
    pub error_file: PathBuf,
    pub sample_filter_file: PathBuf,
    pub pattern: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Settings {
    /// Fills every unset config value with its default.
    pub fn from_config(config: &Config) -> Self {
        let path_or = |value: &Option<PathBuf>, default: &str| {
            value.clone().unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            case_sensitive: config.case_sensitive.unwrap_or(true),
            input_dir: path_or(&config.paths.input_dir, DEFAULT_INPUT_DIR),
            filter_file: path_or(&config.paths.filter_file, DEFAULT_FILTER_FILE),
            results_file: path_or(&config.paths.results_file, DEFAULT_RESULTS_FILE),
            error_file: path_or(&config.paths.error_file, DEFAULT_ERROR_FILE),
            sample_filter_file: path_or(
                &config.paths.sample_filter_file,
                DEFAULT_SAMPLE_FILTER_FILE,
            ),
            pattern: config
                .discovery
                .pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(dir) = &overrides.input_dir {
            self.input_dir = dir.clone();
        }
        if let Some(file) = &overrides.filter_file {
            self.filter_file = file.clone();
        }
        if let Some(file) = &overrides.results_file {
            self.results_file = file.clone();
        }
        if let Some(file) = &overrides.error_file {
            self.error_file = file.clone();
        }
        if overrides.ignore_case {
            self.case_sensitive = false;
        }
        self
    }

    /// Compiles the discovery pattern.
    pub fn compiled_pattern(&self) -> Result<Regex> {
        compile_pattern(&self.pattern).map_err(|e| CommandError::Config(e.to_string()))
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/csvcount/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("csvcount"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("csvcount"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the only schema so far.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }
    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let config = load_config()?;
    let settings = Settings::from_config(&config).with_overrides(&ctx.overrides);

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
            "effective": settings,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        println!("Settings:");
        println!("  case_sensitive: {}", settings.case_sensitive);

        println!("\n[paths]");
        println!("  input_dir: {}", settings.input_dir.display());
        println!("  filter_file: {}", settings.filter_file.display());
        println!("  results_file: {}", settings.results_file.display());
        println!("  error_file: {}", settings.error_file.display());
        println!("  sample_filter_file: {}", settings.sample_filter_file.display());

        println!("\n[discovery]");
        println!("  pattern: {}", settings.pattern);

        if !path.exists() {
            println!("\n(No config file exists. Defaults are in use.)");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config, &path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Validates `value` and stores it under `key`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let (section, field) = match key.split_once('.') {
        Some((section, field)) => (Some(section), field),
        None => (None, key),
    };

    match (section, field) {
        (None, "case_sensitive") => {
            config.case_sensitive = Some(parse_bool(value)?);
        }
        (Some("paths"), field) => {
            let path = parse_path(key, value)?;
            let slot = match field {
                "input_dir" => &mut config.paths.input_dir,
                "filter_file" => &mut config.paths.filter_file,
                "results_file" => &mut config.paths.results_file,
                "error_file" => &mut config.paths.error_file,
                "sample_filter_file" => &mut config.paths.sample_filter_file,
                _ => return Err(unknown_key(key)),
            };
            *slot = Some(path);
        }
        (Some("discovery"), "pattern") => {
            compile_pattern(value).map_err(|e| CommandError::Config(e.to_string()))?;
            config.discovery.pattern = Some(value.to_string());
        }
        _ => return Err(unknown_key(key)),
    }

    Ok(())
}

fn unknown_key(key: &str) -> CommandError {
    CommandError::Config(format!(
        "Unknown config key '{}'. Valid keys: {}",
        key,
        VALID_KEYS.join(", ")
    ))
}

/// Executes the config reset command.
pub fn execute_reset(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if path.exists() {
        let prompt = format!("Replace {} with the default configuration?", path.display());
        if confirm(ctx, &prompt)? == ConfirmResult::Aborted {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    ensure_parent_dir(&path)?;
    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Configuration reset: {}", path.display());
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}

fn parse_path(key: &str, s: &str) -> Result<PathBuf> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CommandError::Config(format!("{} cannot be empty", key)));
    }
    Ok(PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn with_config_env<T>(value: Option<&Path>, f: impl FnOnce() -> T) -> T {
        let original = env::var(CONFIG_ENV_VAR).ok();
        match value {
            Some(path) => env::set_var(CONFIG_ENV_VAR, path),
            None => env::remove_var(CONFIG_ENV_VAR),
        }

        let result = f();

        match original {
            Some(val) => env::set_var(CONFIG_ENV_VAR, val),
            None => env::remove_var(CONFIG_ENV_VAR),
        }
        result
    }

    #[test]
    fn test_parse_bool_values() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.case_sensitive);
        assert_eq!(settings.input_dir, PathBuf::from("unfiltered_CLC_data"));
        assert_eq!(settings.filter_file, PathBuf::from("filters.csv"));
        assert_eq!(settings.results_file, PathBuf::from("results.csv"));
        assert_eq!(settings.error_file, PathBuf::from("errors.csv"));
        assert_eq!(settings.sample_filter_file, PathBuf::from("filters_SAMPLE.csv"));
        assert_eq!(settings.pattern, DEFAULT_PATTERN);
    }

    #[test]
    fn test_default_config_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(Settings::from_config(&config), Settings::default());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1
case_sensitive = false

[paths]
input_dir = "data"
results_file = "out/results.csv"

[discovery]
pattern = '^([0-9]{3})\.csv$'
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let settings = Settings::from_config(&config);

        assert!(!settings.case_sensitive);
        assert_eq!(settings.input_dir, PathBuf::from("data"));
        assert_eq!(settings.results_file, PathBuf::from("out/results.csv"));
        assert_eq!(settings.filter_file, PathBuf::from("filters.csv"));
        assert_eq!(settings.pattern, r"^([0-9]{3})\.csv$");
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.case_sensitive.is_none());
        assert!(config.paths.input_dir.is_none());
    }

    #[test]
    fn test_config_serialization_skips_unset() {
        let mut config = Config::default();
        config.paths.filter_file = Some(PathBuf::from("f.csv"));

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[paths]"));
        assert!(toml_str.contains("filter_file = \"f.csv\""));
        assert!(!toml_str.contains("case_sensitive"));
        assert!(!toml_str.contains("input_dir"));
    }

    #[test]
    fn test_overrides_win_over_config() {
        let mut config = Config::default();
        config.paths.input_dir = Some(PathBuf::from("from_config"));
        let overrides = Overrides {
            input_dir: Some(PathBuf::from("from_flag")),
            error_file: Some(PathBuf::from("e.csv")),
            ignore_case: true,
            ..Overrides::default()
        };

        let settings = Settings::from_config(&config).with_overrides(&overrides);

        assert_eq!(settings.input_dir, PathBuf::from("from_flag"));
        assert_eq!(settings.error_file, PathBuf::from("e.csv"));
        assert_eq!(settings.results_file, PathBuf::from("results.csv"));
        assert!(!settings.case_sensitive);
    }

    #[test]
    fn test_apply_setting_known_keys() {
        let mut config = Config::default();
        apply_setting(&mut config, "case_sensitive", "no").unwrap();
        apply_setting(&mut config, "paths.sample_filter_file", "s.csv").unwrap();
        apply_setting(&mut config, "discovery.pattern", r"^run_([0-9]+)\.csv$").unwrap();

        assert_eq!(config.case_sensitive, Some(false));
        assert_eq!(config.paths.sample_filter_file, Some(PathBuf::from("s.csv")));
        assert_eq!(config.discovery.pattern.as_deref(), Some(r"^run_([0-9]+)\.csv$"));
    }

    #[test]
    fn test_apply_setting_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "case_sensitive", "sometimes").is_err());
        assert!(apply_setting(&mut config, "paths.input_dir", "  ").is_err());
        assert!(apply_setting(&mut config, "discovery.pattern", "([").is_err());
        assert!(config.discovery.pattern.is_none());
    }

    #[test]
    fn test_apply_setting_unknown_key() {
        let mut config = Config::default();
        let err = apply_setting(&mut config, "paths.output", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key 'paths.output'"));
        assert!(apply_setting(&mut config, "colour", "x").is_err());
    }

    #[test]
    fn test_migrate_config_sets_current_version() {
        let config = Config {
            version: 0,
            case_sensitive: Some(false),
            ..Config::default()
        };
        let migrated = migrate_config(config).unwrap();
        assert_eq!(migrated.version, CONFIG_VERSION);
        assert_eq!(migrated.case_sensitive, Some(false));
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        let path = PathBuf::from("/tmp/csvcount-test/custom.toml");
        let resolved = with_config_env(Some(path.as_path()), get_config_path).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    #[serial]
    fn test_load_config_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let config = with_config_env(Some(path.as_path()), load_config).unwrap();
        assert!(config.case_sensitive.is_none());
        assert!(config.paths.input_dir.is_none());
    }

    #[test]
    #[serial]
    fn test_load_config_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "case_sensitive = [").unwrap();

        let err = with_config_env(Some(path.as_path()), load_config).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        apply_setting(&mut config, "paths.input_dir", "samples").unwrap();
        save_config(&config, &path).unwrap();

        let loaded = with_config_env(Some(path.as_path()), load_config).unwrap();
        assert_eq!(loaded.paths.input_dir, Some(PathBuf::from("samples")));
    }
}
