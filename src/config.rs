use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.model-catalog/config.toml`.
///
/// Every section is optional; a missing section takes its built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display defaults used by the normalizers.
    pub defaults: Defaults,
    pub github: GitHubConfig,
    pub huggingface: HuggingFaceConfig,
    pub scoring: ScoringConfig,
}

/// Values substituted when an upstream payload omits a field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Shown when neither `language` nor `primary_language` is present.
    pub not_available: String,
    /// Shown when no license can be extracted.
    pub no_license: String,
    pub no_description: String,
    pub default_branch: String,
    /// Author and last-modified placeholder for models.
    pub unknown: String,
    /// Upper bound on sample lists returned without a total count.
    pub sample_size: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            not_available: "N/A".to_string(),
            no_license: "None".to_string(),
            no_description: "No description available".to_string(),
            default_branch: "main".to_string(),
            unknown: "Unknown".to_string(),
            sample_size: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_base: String,
    /// Environment variable holding an optional bearer token.
    pub token_env: String,
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_base: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HuggingFaceConfig {
    pub api_base: String,
    pub token_env: String,
    pub timeout_secs: u64,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        HuggingFaceConfig {
            api_base: "https://huggingface.co".to_string(),
            token_env: "HF_TOKEN".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Weights for the composite `net_score` metric.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub license: f64,
    pub ramp_up: f64,
    pub bus_factor: f64,
    pub responsive_maintainer: f64,
    pub popularity: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            license: 0.3,
            ramp_up: 0.2,
            bus_factor: 0.2,
            responsive_maintainer: 0.2,
            popularity: 0.1,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<cwd>/.model-catalog/config.toml`
/// 3. `~/.config/model-catalog/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(cwd: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = cwd.join(".model-catalog").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("model-catalog")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using built-in defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_builtin_defaults() {
        let defaults = Defaults::default();
        assert_eq!(defaults.not_available, "N/A");
        assert_eq!(defaults.no_license, "None");
        assert_eq!(defaults.no_description, "No description available");
        assert_eq!(defaults.default_branch, "main");
        assert_eq!(defaults.unknown, "Unknown");
        assert_eq!(defaults.sample_size, 30);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
[defaults]
not_available = "-"

[scoring]
license = 1.0
"#
        )
        .unwrap();

        let cfg = load_config(Path::new("."), Some(f.path())).unwrap();
        assert_eq!(cfg.defaults.not_available, "-");
        assert_eq!(cfg.defaults.default_branch, "main");
        assert_eq!(cfg.scoring.license, 1.0);
        assert_eq!(cfg.scoring.ramp_up, 0.2);
        assert_eq!(cfg.github.api_base, "https://api.github.com");
    }

    #[test]
    fn test_local_config_is_found() {
        let dir = TempDir::new().unwrap();
        let cfg_dir = dir.path().join(".model-catalog");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("config.toml"),
            "[github]\napi_base = \"http://localhost:9000\"\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.github.api_base, "http://localhost:9000");
        assert_eq!(cfg.github.token_env, "GITHUB_TOKEN");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[defaults\nnot_available = ").unwrap();
        assert!(load_config(Path::new("."), Some(f.path())).is_err());
    }
}
