use anyhow::{bail, Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::schema::{Config, OutputConfig};
use crate::output::{ColorChoice, OutputFormat};
use crate::scoring::ScoringConfig;

const HEADER: &str = "\
# fin-health configuration
#
# Rules are independent: each one is checked against the input metrics and
# the effects of every matching rule are added to base_score. The total is
# clamped to [0, 100].
#
# when:      <N, <=N, >N, >=N, =N, or N..M (inclusive)
# effect:    +N or -N
# if_absent: zero (compare against 0) or skip (rule does not fire).
#            Defaults to zero for rewards and skip for penalties.

";

/// Config written by `init`: the built-in rubric spelled out in full
pub fn default_config() -> Config {
    Config {
        scoring: Some(ScoringConfig::default()),
        output: Some(OutputConfig {
            format: Some(OutputFormat::Table),
            color: Some(ColorChoice::Auto),
        }),
    }
}

/// Write the default config to `path` atomically.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let yaml = serde_saphyr::to_string(&default_config()).context("Failed to serialize config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .context("Failed to write config header")?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit().context("Failed to save config")?;

    tracing::debug!(path = %path.display(), "wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        write_default_config(&path, false).unwrap();

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, default_config());
        assert!(fs::read_to_string(&path).unwrap().starts_with("# fin-health"));
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "scoring:\n  base_score: 10\n").unwrap();

        let result = write_default_config(&path, false);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("--force"));
        assert!(fs::read_to_string(&path).unwrap().contains("base_score: 10"));
    }

    #[test]
    fn test_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "scoring:\n  base_score: 10\n").unwrap();

        write_default_config(&path, true).unwrap();
        let loaded = load_config(Some(path)).unwrap();
        assert_eq!(loaded.effective_scoring().effective_base_score(), 50.0);
    }
}
