use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::input::{CaptureSettings, DEFAULT_DEADZONE};
use crate::logging::LogLevel;

/// Directory under `$HOME` holding front-end configuration.
pub const CONFIG_DIR_NAME: &str = ".emulationstation";
/// File the joystick mapping is saved to.
pub const INPUT_CONFIG_NAME: &str = "es_input.cfg";

/// Largest magnitude an SDL axis reports.
const AXIS_MAX: u32 = 32767;

/// Options that can be set via the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Where to save (and look for) the mapping
    pub config_path: Option<PathBuf>,
    pub deadzone: u32,
    /// Which attached joystick to configure
    pub device_index: u32,
    /// Calibrate even if a config already exists
    pub force: bool,
    /// Write via a temporary file
    pub atomic_write: bool,
    pub log_level: LogLevel,
    /// Replay events from this file ("-" for stdin) instead of SDL
    pub script: Option<PathBuf>,
    /// Device name used with `script`
    pub device_name: Option<String>,
    /// Print the saved config and exit
    pub show: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_path: None,
            deadzone: DEFAULT_DEADZONE,
            device_index: 0,
            force: false,
            atomic_write: false,
            log_level: LogLevel::Info,
            script: None,
            device_name: None,
            show: false,
        }
    }
}

impl Options {
    /// Config path, falling back to [`default_config_path`].
    pub fn resolved_config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => default_config_path(),
        }
    }

    pub fn capture_settings(&self) -> Result<CaptureSettings> {
        Ok(CaptureSettings::new(self.resolved_config_path()?)
            .with_deadzone(self.deadzone)
            .with_atomic_write(self.atomic_write))
    }
}

/// `$HOME/.emulationstation/es_input.cfg`
pub fn default_config_path() -> Result<PathBuf> {
    let home = env::var_os("HOME").context("HOME is not set; pass --config")?;
    Ok(PathBuf::from(home)
        .join(CONFIG_DIR_NAME)
        .join(INPUT_CONFIG_NAME))
}

/// Parse an axis deadzone (0-32767)
pub fn parse_deadzone(s: &str) -> Result<u32> {
    let deadzone: u32 = s.trim().parse().context("Invalid deadzone value")?;
    if deadzone > AXIS_MAX {
        anyhow::bail!("Deadzone out of range (0 to {})", AXIS_MAX);
    }
    Ok(deadzone)
}

/// Parse a log level (0-6)
pub fn parse_log_level(s: &str) -> Result<LogLevel> {
    let level: i32 = s.trim().parse().context("Invalid log level")?;
    if !(0..=6).contains(&level) {
        anyhow::bail!("Log level out of range (0 to 6)");
    }
    Ok(LogLevel::from_i32(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deadzone() {
        assert_eq!(parse_deadzone("3200").unwrap(), 3200);
        assert_eq!(parse_deadzone("0").unwrap(), 0);
        assert_eq!(parse_deadzone("32767").unwrap(), 32767);
        assert!(parse_deadzone("32768").is_err());
        assert!(parse_deadzone("-1").is_err());
        assert!(parse_deadzone("abc").is_err());
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("5").unwrap(), LogLevel::Debug);
        assert!(parse_log_level("7").is_err());
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_options_default() {
        let opts = Options::default();
        assert_eq!(opts.deadzone, 3200);
        assert_eq!(opts.device_index, 0);
        assert!(!opts.force);
        assert!(opts.config_path.is_none());
    }

    #[test]
    fn test_capture_settings_from_options() {
        let opts = Options {
            config_path: Some(PathBuf::from("/tmp/es_input.cfg")),
            deadzone: 8000,
            atomic_write: true,
            ..Options::default()
        };
        let settings = opts.capture_settings().unwrap();
        assert_eq!(settings.destination, PathBuf::from("/tmp/es_input.cfg"));
        assert_eq!(settings.deadzone, 8000);
        assert!(settings.atomic_write);
    }

    #[test]
    fn test_default_config_path_ends_with_file_name() {
        if env::var_os("HOME").is_some() {
            let path = default_config_path().unwrap();
            assert!(path.ends_with(".emulationstation/es_input.cfg"));
        }
    }
}
