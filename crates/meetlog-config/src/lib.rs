use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use meetlog_core::time::{is_valid_date_format, DEFAULT_DATE_DISPLAY_FORMAT};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "meetlog";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_PREVIEW_CHARS: usize = 120;
pub const MAX_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub sample_data: bool,
    pub default_attendees: Option<String>,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub date_format: String,
    pub preview_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sample_data: true,
            default_attendees: None,
            display: DisplayConfig {
                date_format: DEFAULT_DATE_DISPLAY_FORMAT.to_string(),
                preview_chars: DEFAULT_PREVIEW_CHARS,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid display.date_format value: {0}")]
    InvalidDateFormat(String),
    #[error("invalid display.preview_chars value: {0} (expected 1..=500)")]
    InvalidPreviewChars(usize),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    sample_data: Option<bool>,
    default_attendees: Option<String>,
    display: Option<DisplayFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplayFile {
    date_format: Option<String>,
    preview_chars: Option<usize>,
}

/// Loads the config file. A missing default file yields defaults; an explicit
/// path must exist.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    Ok(load_at_path(&path, required)?.unwrap_or_default())
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfigPath(path));
        }
        return Ok(path);
    }

    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => {
            let path = PathBuf::from(dir);
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            path
        }
        None => dirs::home_dir()
            .ok_or(ConfigError::MissingHomeDir)?
            .join(".config"),
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    merge_config(parsed).map(Some)
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(sample_data) = parsed.sample_data {
        config.sample_data = sample_data;
    }

    config.default_attendees = parsed
        .default_attendees
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    if let Some(display) = parsed.display {
        if let Some(format) = display.date_format {
            if !is_valid_date_format(&format) {
                return Err(ConfigError::InvalidDateFormat(format));
            }
            config.display.date_format = format;
        }
        if let Some(chars) = display.preview_chars {
            if chars == 0 || chars > MAX_PREVIEW_CHARS {
                return Err(ConfigError::InvalidPreviewChars(chars));
            }
            config.display.preview_chars = chars;
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.permissions().mode() & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load, load_at_path, merge_config, ConfigError, ConfigFile, DisplayFile};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            sample_data: Some(false),
            default_attendees: Some("  Ahmet Yılmaz  ".to_string()),
            display: Some(DisplayFile {
                date_format: Some("%Y-%m-%d".to_string()),
                preview_chars: Some(40),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert!(!merged.sample_data);
        assert_eq!(merged.default_attendees.as_deref(), Some("Ahmet Yılmaz"));
        assert_eq!(merged.display.date_format, "%Y-%m-%d");
        assert_eq!(merged.display.preview_chars, 40);
    }

    #[test]
    fn merge_config_rejects_bad_display_values() {
        let parsed = ConfigFile {
            sample_data: None,
            default_attendees: None,
            display: Some(DisplayFile {
                date_format: Some("%Q".to_string()),
                preview_chars: None,
            }),
        };
        assert!(matches!(
            merge_config(parsed),
            Err(ConfigError::InvalidDateFormat(_))
        ));

        let parsed = ConfigFile {
            sample_data: None,
            default_attendees: None,
            display: Some(DisplayFile {
                date_format: None,
                preview_chars: Some(0),
            }),
        };
        assert!(matches!(
            merge_config(parsed),
            Err(ConfigError::InvalidPreviewChars(0))
        ));
    }

    #[test]
    fn merge_config_rejects_time_of_day_in_date_format() {
        let parsed: ConfigFile =
            toml::from_str("[display]\ndate_format = \"%d.%m.%Y %H:%M\"\n").expect("parse");
        match merge_config(parsed) {
            Err(ConfigError::InvalidDateFormat(format)) => assert_eq!(format, "%d.%m.%Y %H:%M"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_default_attendees_is_ignored() {
        let parsed = ConfigFile {
            sample_data: None,
            default_attendees: Some("   ".to_string()),
            display: None,
        };
        let merged = merge_config(parsed).expect("merge");
        assert!(merged.default_attendees.is_none());
        assert!(merged.sample_data);
    }

    #[test]
    fn load_requires_explicit_file() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "sample_data = false\ndefault_attendees = \"Mehmet Demir\"\n[display]\npreview_chars = 80\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert!(!config.sample_data);
        assert_eq!(config.default_attendees.as_deref(), Some("Mehmet Demir"));
        assert_eq!(config.display.preview_chars, 80);
        assert_eq!(config.display.date_format, "%d %B %Y");
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "persist = true\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "sample_data = true\n").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
