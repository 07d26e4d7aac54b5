mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, OutputConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/fin-health/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("fin-health"))
}

/// Get the default config file path (~/.config/fin-health/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/fin-health/config.yaml) and falls back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => {
            let path = get_config_path()?;
            if path.exists() {
                read_config(&path)
            } else {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{ColorChoice, OutputFormat};
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("missing.yaml")));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_full_config() {
        let file = write_temp(
            r#"
scoring:
  base_score: 55
  rules:
    - metric: revenue_growth
      when: ">5"
      effect: "+20"
output:
  format: json
  color: never
"#,
        );
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        let scoring = config.effective_scoring();
        assert_eq!(scoring.effective_base_score(), 55.0);
        assert_eq!(scoring.effective_rules().len(), 1);
        assert_eq!(config.output_format(), Some(OutputFormat::Json));
        assert_eq!(config.color_choice(), Some(ColorChoice::Never));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = write_temp("{}");
        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.effective_scoring(), crate::scoring::ScoringConfig::default());
        assert_eq!(config.output_format(), None);
    }

    #[test]
    fn test_invalid_yaml() {
        let file = write_temp("scoring: [unclosed");
        let result = load_config(Some(file.path().to_path_buf()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let file = write_temp("queries: []");
        assert!(load_config(Some(file.path().to_path_buf())).is_err());
    }
}
