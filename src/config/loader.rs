//! Configuration loading and discovery for `pxm.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PxmConfig;
use crate::output::OutputFormat;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for.
pub const CONFIG_FILE_NAME: &str = "pxm.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxm.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override ASCII width
    pub ascii_width: Option<u32>,
    /// Override ASCII palette
    pub palette: Option<String>,
    /// Override pixelation block size
    pub pixelate_block: Option<u32>,
    /// Override sticker edge limit
    pub sticker_max_edge: Option<u32>,
    /// Override output format
    pub format: Option<OutputFormat>,
    /// Override JPEG quality
    pub jpeg_quality: Option<u8>,
}

/// Find pxm.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pxm.toml
/// 2. Check XDG_CONFIG_HOME/pixmorph/pxm.toml (or ~/.config/pixmorph/pxm.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pxm.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixmorph").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find pxm.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pxm.toml file.
///
/// If a path is provided, loads from that file (which must exist). Otherwise
/// uses [`find_config`], falling back to defaults when nothing is found.
pub fn load_config(path: Option<&Path>) -> Result<PxmConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(PxmConfig::default()),
    }
}

/// Load and validate configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<PxmConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PxmConfig = toml::from_str(&contents)?;
    validated(config)
}

fn validated(config: PxmConfig) -> Result<PxmConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Merge CLI overrides into a configuration and re-validate it.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(
    mut config: PxmConfig,
    overrides: &CliOverrides,
) -> Result<PxmConfig, ConfigError> {
    if let Some(width) = overrides.ascii_width {
        config.ascii.width = width;
    }
    if let Some(ref palette) = overrides.palette {
        config.ascii.palette = palette.clone();
    }
    if let Some(block) = overrides.pixelate_block {
        config.effects.pixelate_block = block;
    }
    if let Some(edge) = overrides.sticker_max_edge {
        config.effects.sticker_max_edge = edge;
    }
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    if let Some(quality) = overrides.jpeg_quality {
        config.output.jpeg_quality = quality;
    }

    validated(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(body.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[ascii]\nwidth = 30\n");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let subdir = temp.path().join("photos").join("2024");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            r##"
[ascii]
width = 60
palette = "#. "

[effects]
pixelate_block = 12

[heatmap]
mid = "purple"
"##,
        );

        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.ascii.width, 60);
        assert_eq!(config.ascii.palette, "#. ");
        assert_eq!(config.effects.pixelate_block, 12);
        assert_eq!(config.effects.sticker_max_edge, 512);
        assert_eq!(config.heatmap.mid, "purple");
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[ascii\nwidth = ");
        assert!(matches!(load_config(Some(&config_path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_failure() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[effects]\npixelate_block = 0\n");

        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(err.to_string().contains("effects.pixelate_block"));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let overrides = CliOverrides {
            ascii_width: Some(80),
            palette: Some("xo".to_string()),
            format: Some(OutputFormat::Png),
            ..Default::default()
        };

        let config = merge_cli_overrides(PxmConfig::default(), &overrides).unwrap();
        assert_eq!(config.ascii.width, 80);
        assert_eq!(config.ascii.palette, "xo");
        assert_eq!(config.output.format, OutputFormat::Png);
        assert_eq!(config.effects.pixelate_block, 20);
    }

    #[test]
    fn test_merge_cli_overrides_revalidates() {
        let overrides = CliOverrides { jpeg_quality: Some(101), ..Default::default() };
        assert!(matches!(
            merge_cli_overrides(PxmConfig::default(), &overrides),
            Err(ConfigError::Validation(_))
        ));
    }
}
