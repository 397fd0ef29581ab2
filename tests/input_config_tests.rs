//! Integration tests for the input config file format
//!
//! Covers writing, reading back, compatibility with files from newer
//! role tables, and driving a session from an event script.

use std::fs;

use joyconfig::input::{
    load_config, parse_config, parse_script, write_config, write_config_atomic, AxisDirection,
    CaptureSession, CaptureSettings, LogicalRole, MappingStore, RawSignal, ScriptedDevice,
};
use rstest::rstest;
use tempfile::tempdir;

fn three_entry_store() -> MappingStore {
    let mut store = MappingStore::new();
    store.assign(RawSignal::Button(0), LogicalRole::Accept);
    store.assign(RawSignal::Axis(1, AxisDirection::Positive), LogicalRole::Up);
    store.assign(RawSignal::Axis(1, AxisDirection::Negative), LogicalRole::Down);
    store
}

#[rstest]
#[case::plain(false)]
#[case::atomic(true)]
fn test_write_then_load(#[case] atomic: bool) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("es_input.cfg");
    let store = three_entry_store();

    if atomic {
        write_config_atomic(&path, Some("Pad"), &store).unwrap();
    } else {
        write_config(&path, Some("Pad"), &store).unwrap();
    }

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.device_name.as_deref(), Some("Pad"));
    assert_eq!(loaded.mappings, store);
    assert_eq!(loaded.skipped, 0);
}

#[test]
fn test_read_is_independent_of_row_order() {
    let loaded = parse_config("AXISNEG 1 2\nBUTTON 0 5\nAXISPOS 1 1\n");
    assert_eq!(loaded.mappings, three_entry_store());
    assert_eq!(loaded.device_name, None);
}

#[rstest]
#[case::future_role("BUTTON 3 11\n")]
#[case::far_future_role("AXISPOS 0 200\n")]
#[case::unknown_role("AXISNEG 0 0\n")]
#[case::future_record("HAT 0 1 3\n")]
#[case::garbage("!!!\n")]
fn test_newer_files_still_load(#[case] extra: &str) {
    let text = format!("JOYNAME Pad\nBUTTON 0 5\n{}AXISPOS 1 1\nAXISNEG 1 2\n", extra);
    let loaded = parse_config(&text);
    assert_eq!(loaded.mappings, three_entry_store());
    assert_eq!(loaded.skipped, 1);
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("es_input.cfg");
    let err = write_config(&path, None, &three_entry_store()).unwrap_err();
    assert!(err.to_string().contains("no-such-dir"));
    assert!(!path.exists());
}

#[test]
fn test_scripted_session() {
    let script = "\
# up/down on the left stick
axis 1 -30000
axis 1 0
axis 1 30000
axis 1 0
# left/right on the d-pad buttons
button 14
button 15
button 0   # accept
button 1   # back
button 9   # menu
key        # no select button
button 4
button 5
# confirm
button 0
";
    let dir = tempdir().unwrap();
    let path = dir.path().join("es_input.cfg");
    let device = ScriptedDevice::new(Some("Retro Pad".to_string()));
    let mut session = CaptureSession::new(Some(device), CaptureSettings::new(&path));

    for event in parse_script(script).unwrap() {
        session.on_event(event).unwrap();
    }
    assert!(session.is_finished());

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "JOYNAME Retro Pad\n\
         BUTTON 0 5\n\
         BUTTON 1 6\n\
         BUTTON 4 9\n\
         BUTTON 5 10\n\
         BUTTON 9 7\n\
         BUTTON 14 3\n\
         BUTTON 15 4\n\
         AXISPOS 1 2\n\
         AXISNEG 1 1\n"
    );

    // the confirming press must not remap button 0
    let loaded = load_config(&path).unwrap();
    assert_eq!(
        loaded.mappings.get(RawSignal::Button(0)),
        Some(LogicalRole::Accept)
    );
    assert_eq!(loaded.mappings.len(), 9);
}
