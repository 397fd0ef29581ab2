//! Input config reader
//!
//! Loads a file produced by [`writer`](super::writer) back into a
//! [`MappingStore`]. Parsing is forgiving: records this build does not
//! understand are skipped so files written by newer versions still load.

use std::fs;
use std::path::Path;

use super::error::{CalibrationError, CalibrationResult};
use super::mapping::MappingStore;
use super::roles::LogicalRole;
use super::signal::RecordKind;

/// Contents of a parsed input config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedConfig {
    /// Name from the JOYNAME record, if present.
    pub device_name: Option<String>,
    pub mappings: MappingStore,
    /// Number of non-blank lines that were not applied.
    pub skipped: usize,
}

/// Parse config text. Never fails; bad lines are counted in
/// [`LoadedConfig::skipped`].
pub fn parse_config(text: &str) -> LoadedConfig {
    let mut config = LoadedConfig::default();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !apply_line(&mut config, line) {
            log::debug!("Skipping input config line {}: {:?}", number + 1, line);
            config.skipped += 1;
        }
    }

    config
}

fn apply_line(config: &mut LoadedConfig, line: &str) -> bool {
    let (tag, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let Ok(kind) = tag.parse::<RecordKind>() else {
        return false;
    };

    if kind == RecordKind::JoyName {
        let name = rest.trim();
        if name.is_empty() {
            return false;
        }
        config.device_name = Some(name.to_string());
        return true;
    }

    let fields: Vec<&str> = rest.split_whitespace().collect();
    let [index, ordinal] = fields.as_slice() else {
        return false;
    };
    let (Ok(index), Ok(ordinal)) = (index.parse::<u32>(), ordinal.parse::<u8>()) else {
        return false;
    };

    match (kind.signal(index), LogicalRole::from_ordinal(ordinal)) {
        (Some(signal), Some(role)) if role != LogicalRole::Unknown => {
            config.mappings.assign(signal, role);
            true
        }
        _ => false,
    }
}

/// Read and parse the config at `path`.
pub fn load_config(path: &Path) -> CalibrationResult<LoadedConfig> {
    let text = fs::read_to_string(path).map_err(|source| CalibrationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text);
    log::info!(
        "Loaded {} input mappings from {} ({} lines skipped)",
        config.mappings.len(),
        path.display(),
        config.skipped
    );
    Ok(config)
}

/// Whether the host should run calibration: a device is attached and no
/// config has been saved yet. Deleting the config file forces a remap.
pub fn needs_calibration(path: &Path, device_count: usize) -> bool {
    device_count > 0 && !path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::signal::{AxisDirection, RawSignal};
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_file() {
        let config = parse_config(
            "JOYNAME Logitech Dual Action\nBUTTON 0 5\nAXISPOS 1 1\nAXISNEG 1 2\n",
        );
        assert_eq!(config.device_name.as_deref(), Some("Logitech Dual Action"));
        assert_eq!(config.mappings.len(), 3);
        assert_eq!(config.skipped, 0);
        assert_eq!(
            config.mappings.get(RawSignal::Button(0)),
            Some(LogicalRole::Accept)
        );
        assert_eq!(
            config.mappings.get(RawSignal::Axis(1, AxisDirection::Positive)),
            Some(LogicalRole::Up)
        );
        assert_eq!(
            config.mappings.get(RawSignal::Axis(1, AxisDirection::Negative)),
            Some(LogicalRole::Down)
        );
    }

    #[test]
    fn test_unknown_ordinals_are_skipped() {
        let config = parse_config("BUTTON 0 5\nBUTTON 1 42\nBUTTON 2 0\nBUTTON 3 999\n");
        assert_eq!(config.mappings.len(), 1);
        assert_eq!(config.skipped, 3);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let config = parse_config(
            "HAT 0 1\nBUTTON\nBUTTON x 1\nBUTTON 1\nBUTTON 1 2 3\nAXISPOS -1 2\nJOYNAME\n\nAXISNEG 4 3\n",
        );
        assert_eq!(config.mappings.len(), 1);
        assert_eq!(config.skipped, 7);
        assert_eq!(config.device_name, None);
    }

    #[test]
    fn test_later_lines_overwrite() {
        let config = parse_config("BUTTON 0 5\nBUTTON 0 6\n");
        assert_eq!(
            config.mappings.get(RawSignal::Button(0)),
            Some(LogicalRole::Back)
        );
    }

    #[test]
    fn test_whitespace_tolerance() {
        let config = parse_config("  JOYNAME   Pad  One  \r\nBUTTON\t3\t7\r\n");
        assert_eq!(config.device_name.as_deref(), Some("Pad  One"));
        assert_eq!(config.mappings.get(RawSignal::Button(3)), Some(LogicalRole::Menu));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_config(&dir.path().join("es_input.cfg")).unwrap_err();
        assert_eq!(err.kind(), crate::input::ErrorKind::IoReadFailure);
    }

    #[test]
    fn test_needs_calibration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("es_input.cfg");
        assert!(needs_calibration(&path, 1));
        assert!(!needs_calibration(&path, 0));

        fs::write(&path, "BUTTON 0 5\n").unwrap();
        assert!(!needs_calibration(&path, 2));
    }
}
