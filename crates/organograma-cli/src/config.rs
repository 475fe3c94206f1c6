//! Configuration file discovery for the CLI.
//!
//! Layout, style and selection settings come from a TOML file. The first
//! existing file among the [`ConfigSource`] candidates wins; with none, the
//! library defaults apply.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use organograma::{OrganogramaError, config::AppConfig};

/// Project-local configuration file, relative to the working directory
const LOCAL_CONFIG: &str = "organograma/config.toml";

/// File name looked up in the platform configuration directory
const SYSTEM_CONFIG_FILE: &str = "config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error in {path}: {message}")]
    Validation { path: PathBuf, message: String },
}

impl From<ConfigError> for OrganogramaError {
    fn from(err: ConfigError) -> Self {
        OrganogramaError::Config(err.to_string())
    }
}

/// Where a configuration file was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; it must exist
    Explicit(PathBuf),
    /// `organograma/config.toml` under the working directory
    Local(PathBuf),
    /// The platform configuration directory
    System(PathBuf),
}

impl ConfigSource {
    /// Candidate files in lookup order.
    ///
    /// An explicit path replaces the search entirely.
    pub fn candidates(explicit_path: Option<&Path>) -> Vec<Self> {
        if let Some(path) = explicit_path {
            return vec![Self::Explicit(path.to_path_buf())];
        }

        let mut sources = vec![Self::Local(PathBuf::from(LOCAL_CONFIG))];
        match ProjectDirs::from("com", "organograma", "organograma") {
            Some(dirs) => sources.push(Self::System(dirs.config_dir().join(SYSTEM_CONFIG_FILE))),
            None => debug!("Could not determine platform-specific config directory"),
        }
        sources
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::System(path) => path,
        }
    }

    fn is_required(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Explicit(_) => "explicit",
            Self::Local(_) => "local",
            Self::System(_) => "system",
        };
        write!(f, "{kind} path {}", self.path().display())
    }
}

/// Find and load the chart configuration.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (organograma/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values fail validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, OrganogramaError> {
    let explicit_path: Option<&Path> = explicit_path.as_ref().map(|path| path.as_ref());
    load_first(&ConfigSource::candidates(explicit_path))
}

fn load_first(sources: &[ConfigSource]) -> Result<AppConfig, OrganogramaError> {
    for source in sources {
        let path = source.path();
        if path.exists() {
            info!(source:% = source; "Loading chart configuration");
            return load_config_file(path);
        }
        if source.is_required() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        debug!(source:% = source; "Configuration file not found");
    }

    debug!("No configuration file found, using default chart settings");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, OrganogramaError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_config(path, &content)?)
}

fn parse_config(path: &Path, content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.validate().map_err(|message| ConfigError::Validation {
        path: path.to_path_buf(),
        message,
    })?;

    debug!(
        node_width = config.layout().node_width(),
        node_height = config.layout().node_height(),
        on_change:? = config.selection().on_change();
        "Chart configuration validated"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use organograma::highlight::SelectionPolicy;
    use tempfile::tempdir;

    use super::*;

    fn parse(content: &str) -> Result<AppConfig, ConfigError> {
        parse_config(Path::new("config.toml"), content)
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse(
            r#"
            [layout]
            node_width = 200.0

            [selection]
            on_change = "clear_if_missing"
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().node_width(), 200.0);
        assert_eq!(config.layout().node_height(), 80.0);
        assert_eq!(config.selection().on_change(), SelectionPolicy::ClearIfMissing);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = parse("[layout\nnode_width = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let err = parse("[layout]\nnode_width = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_unsafe_root_offset_fails_validation() {
        let err = parse("[layout]\nnode_height = 80.0\nroot_offset = 30.0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_explicit_path_replaces_search() {
        let sources = ConfigSource::candidates(Some(Path::new("chart.toml")));
        assert_eq!(sources, vec![ConfigSource::Explicit(PathBuf::from("chart.toml"))]);
    }

    #[test]
    fn test_local_path_is_searched_first() {
        let sources = ConfigSource::candidates(None);
        assert_eq!(sources[0], ConfigSource::Local(PathBuf::from(LOCAL_CONFIG)));
        assert!(sources[1..]
            .iter()
            .all(|source| matches!(source, ConfigSource::System(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, OrganogramaError::Config(msg) if msg.contains("Missing")));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present.toml");
        fs::write(&present, "[layout]\nnode_width = 150.0\n").unwrap();

        let sources = [
            ConfigSource::Local(dir.path().join("absent.toml")),
            ConfigSource::System(present),
        ];
        let config = load_first(&sources).unwrap();
        assert_eq!(config.layout().node_width(), 150.0);
    }

    #[test]
    fn test_no_candidate_uses_defaults() {
        let dir = tempdir().unwrap();
        let sources = [ConfigSource::Local(dir.path().join("absent.toml"))];
        let config = load_first(&sources).unwrap();
        assert_eq!(config.layout().node_width(), AppConfig::default().layout().node_width());
    }
}
