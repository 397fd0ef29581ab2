//! Joystick input configuration
//!
//! Maps a controller's raw buttons and axes onto the logical roles the
//! front end navigates with, and saves the result.
//!
//! # Architecture
//!
//! - [`roles`]: the fixed, ordered table of logical roles
//! - [`mapping`]: raw signal → role assignments for one session
//! - [`capture`]: the state machine that turns host events into mappings
//! - [`writer`] / [`reader`]: the on-disk format
//!
//! The host owns the event loop and the screen. It feeds events to a
//! [`CaptureSession`] one at a time; the session never blocks.

pub mod capture;
pub mod cursor;
pub mod device;
pub mod error;
pub mod mapping;
pub mod reader;
pub mod roles;
pub mod script;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod signal;
pub mod writer;

pub use capture::{CaptureSession, CaptureSettings, Prompt, SessionState, Step, DEFAULT_DEADZONE};
pub use cursor::{AxisLatch, CalibrationCursor};
pub use device::{DeviceGuard, InputDevice};
pub use error::{CalibrationError, CalibrationResult, ErrorKind};
pub use mapping::MappingStore;
pub use reader::{load_config, needs_calibration, parse_config, LoadedConfig};
pub use roles::{role_count, role_name, LogicalRole};
pub use script::{parse_script, ScriptedDevice};
pub use signal::{AxisDirection, RawEvent, RawSignal, RecordKind};
pub use writer::{write_config, write_config_atomic, write_records};
