//! Config file lookup

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fdc_convert::{CONFIG_FILE_NAME, ConverterConfig};

/// Load `explicit`, else `fdc.toml` in the working directory, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<ConverterConfig> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    load_from(explicit, &cwd)
}

fn load_from(explicit: Option<&Path>, dir: &Path) -> Result<ConverterConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let local = dir.join(CONFIG_FILE_NAME);
            if !local.exists() {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(ConverterConfig::default());
            }
            local
        }
    };

    let config = ConverterConfig::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdc_shared::DeviceClass;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = load_from(None, dir.path()).unwrap();
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_local_file_is_picked_up() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[device]\ndefault_class = \"GT\"\n",
        )
        .unwrap();

        let config = load_from(None, dir.path()).unwrap();
        assert_eq!(config.device.default_class, DeviceClass::Gt);
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[online]\nlegacy_cap = true\n").unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[input]\nmax_bytes = 10\n").unwrap();

        let config = load_from(Some(&explicit), dir.path()).unwrap();
        assert_eq!(config.input.max_bytes, 10);
        assert!(!config.online.legacy_cap);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_from(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
