//! Input config writer
//!
//! Persists a [`MappingStore`] as line-oriented text:
//!
//! ```text
//! JOYNAME <device name>
//! BUTTON <index> <role ordinal>
//! AXISPOS <index> <role ordinal>
//! AXISNEG <index> <role ordinal>
//! ```

use std::ffi::OsString;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::error::{CalibrationError, CalibrationResult};
use super::mapping::MappingStore;
use super::signal::RecordKind;

/// Write the identity line (if any) and every mapping record to `out`.
pub fn write_records<W: Write>(
    out: &mut W,
    device_name: Option<&str>,
    store: &MappingStore,
) -> io::Result<()> {
    if let Some(name) = device_name.and_then(identity) {
        writeln!(out, "{} {}", RecordKind::JoyName, name)?;
    }
    for line in store.serialize_lines() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Device name as it goes on the JOYNAME line. Line breaks would split the
/// record, so they become spaces; a blank name means no identity line.
fn identity(name: &str) -> Option<String> {
    let name = name.replace(['\r', '\n'], " ");
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Create or overwrite `path` with the mapping.
///
/// Not transactional: a failure partway through leaves a partial file. Use
/// [`write_config_atomic`] when that matters.
pub fn write_config(
    path: &Path,
    device_name: Option<&str>,
    store: &MappingStore,
) -> CalibrationResult<()> {
    log::debug!("Writing input config to {}", path.display());
    write_file(path, device_name, store).map_err(|e| CalibrationError::write(path, e))?;
    log::debug!("Wrote {} mappings", store.len());
    Ok(())
}

/// Like [`write_config`], but writes a sibling temporary file first and
/// renames it over `path` once complete.
pub fn write_config_atomic(
    path: &Path,
    device_name: Option<&str>,
    store: &MappingStore,
) -> CalibrationResult<()> {
    let tmp = temp_path(path);
    log::debug!(
        "Writing input config to {} via {}",
        path.display(),
        tmp.display()
    );

    let result = write_file(&tmp, device_name, store).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(CalibrationError::write(path, e));
    }
    Ok(())
}

fn write_file(path: &Path, device_name: Option<&str>, store: &MappingStore) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut out = BufWriter::new(file);
    write_records(&mut out, device_name, store)?;
    out.flush()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("input.cfg"));
    name.push(".tmp");
    path.with_file_name(name)
}
