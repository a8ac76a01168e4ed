//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variable → XDG path →
//! system path → defaults.

use crate::scan::ScanConfig;
use crate::validate::validate_config;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Where the configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/hostscan/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: ScanConfig,
    /// File the config was read from (None for built-in defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "HOSTSCAN_CONFIG";

/// Standard config file name.
const CONFIG_FILENAME: &str = "config.toml";

/// Application name for XDG and system directories.
const APP_NAME: &str = "hostscan";

/// Resolve and load the scan configuration.
///
/// Resolution order:
/// 1. Explicit CLI path (must exist)
/// 2. `HOSTSCAN_CONFIG` (must exist when set)
/// 3. XDG config directory (`~/.config/hostscan/config.toml`), if present
/// 4. System config (`/etc/hostscan/config.toml`), if present
/// 5. Built-in defaults
pub fn resolve_config(cli_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let env_path = std::env::var_os(ENV_CONFIG_PATH)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let candidates = ConfigCandidates {
        cli: cli_path.map(Path::to_path_buf),
        env: env_path,
        xdg_dir: xdg_config_dir(),
        system_dir: system_config_dir(),
    };
    load_from_candidates(&candidates)
}

/// The places a config file may come from, in priority order.
#[derive(Debug, Clone, Default)]
pub struct ConfigCandidates {
    pub cli: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub xdg_dir: Option<PathBuf>,
    pub system_dir: PathBuf,
}

/// Pick the config file from a set of candidates and load it.
pub fn load_from_candidates(
    candidates: &ConfigCandidates,
) -> Result<ResolvedConfig, ConfigError> {
    let Some((path, source)) = select_config_path(candidates)? else {
        return Ok(ResolvedConfig {
            config: ScanConfig::default(),
            path: None,
            source: ConfigSource::BuiltinDefault,
        });
    };

    let config = load_config_file(&path)?;
    Ok(ResolvedConfig {
        config,
        path: Some(path),
        source,
    })
}

fn select_config_path(
    candidates: &ConfigCandidates,
) -> Result<Option<(PathBuf, ConfigSource)>, ConfigError> {
    // 1. CLI argument
    if let Some(path) = &candidates.cli {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.clone() });
        }
        return Ok(Some((path.clone(), ConfigSource::CliArgument)));
    }

    // 2. Environment variable
    if let Some(path) = &candidates.env {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.clone() });
        }
        return Ok(Some((path.clone(), ConfigSource::Environment)));
    }

    // 3. XDG config directory
    if let Some(dir) = &candidates.xdg_dir {
        let path = dir.join(CONFIG_FILENAME);
        if path.exists() {
            return Ok(Some((path, ConfigSource::XdgConfig)));
        }
    }

    // 4. System config
    let system_path = candidates.system_dir.join(CONFIG_FILENAME);
    if system_path.exists() {
        return Ok(Some((system_path, ConfigSource::SystemConfig)));
    }

    Ok(None)
}

/// Read, parse and validate a single config file.
pub fn load_config_file(path: &Path) -> Result<ScanConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = ScanConfig::from_toml(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Get the XDG config directory for hostscan.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn empty_candidates(tmp: &TempDir) -> ConfigCandidates {
        ConfigCandidates {
            cli: None,
            env: None,
            xdg_dir: Some(tmp.path().join("xdg")),
            system_dir: tmp.path().join("etc"),
        }
    }

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::CliArgument), "CLI argument");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(format!("{}", ConfigSource::SystemConfig), "system config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_defaults_when_nothing_present() {
        let tmp = TempDir::new().unwrap();
        let resolved = load_from_candidates(&empty_candidates(&tmp)).unwrap();
        assert_eq!(resolved.source, ConfigSource::BuiltinDefault);
        assert!(resolved.path.is_none());
        assert_eq!(resolved.config, ScanConfig::default());
    }

    #[test]
    fn test_cli_beats_env() {
        let tmp = TempDir::new().unwrap();
        let cli = write_config(&tmp.path().join("cli"), "suid = true\n");
        let env = write_config(&tmp.path().join("env"), "quick = true\n");

        let mut candidates = empty_candidates(&tmp);
        candidates.cli = Some(cli.clone());
        candidates.env = Some(env);

        let resolved = load_from_candidates(&candidates).unwrap();
        assert_eq!(resolved.source, ConfigSource::CliArgument);
        assert_eq!(resolved.path, Some(cli));
        assert!(resolved.config.suid);
        assert!(!resolved.config.quick);
    }

    #[test]
    fn test_env_beats_xdg() {
        let tmp = TempDir::new().unwrap();
        let env = write_config(&tmp.path().join("env"), "quick = true\n");
        write_config(&tmp.path().join("xdg"), "suid = true\n");

        let mut candidates = empty_candidates(&tmp);
        candidates.env = Some(env);

        let resolved = load_from_candidates(&candidates).unwrap();
        assert_eq!(resolved.source, ConfigSource::Environment);
        assert!(resolved.config.quick);
        assert!(!resolved.config.suid);
    }

    #[test]
    fn test_xdg_beats_system() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp.path().join("xdg"), "display_limit = 5\n");
        write_config(&tmp.path().join("etc"), "display_limit = 9\n");

        let resolved = load_from_candidates(&empty_candidates(&tmp)).unwrap();
        assert_eq!(resolved.source, ConfigSource::XdgConfig);
        assert_eq!(resolved.config.display_limit, 5);
    }

    #[test]
    fn test_system_config_used_last() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp.path().join("etc"), "network = false\n");

        let resolved = load_from_candidates(&empty_candidates(&tmp)).unwrap();
        assert_eq!(resolved.source, ConfigSource::SystemConfig);
        assert!(!resolved.config.network);
    }

    #[test]
    fn test_missing_cli_path_is_error() {
        let tmp = TempDir::new().unwrap();
        let mut candidates = empty_candidates(&tmp);
        candidates.cli = Some(tmp.path().join("missing.toml"));

        match load_from_candidates(&candidates) {
            Err(ConfigError::NotFound { path }) => assert!(path.ends_with("missing.toml")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let cli = write_config(&tmp.path().join("cli"), "max_log_lines = \"many\"\n");
        let mut candidates = empty_candidates(&tmp);
        candidates.cli = Some(cli);

        assert!(matches!(
            load_from_candidates(&candidates),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_semantic_validation_applied() {
        let tmp = TempDir::new().unwrap();
        let cli = write_config(&tmp.path().join("cli"), "display_limit = 0\n");
        let mut candidates = empty_candidates(&tmp);
        candidates.cli = Some(cli);

        assert!(matches!(
            load_from_candidates(&candidates),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_system_config_dir() {
        assert_eq!(system_config_dir(), PathBuf::from("/etc/hostscan"));
    }
}
