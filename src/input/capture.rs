//! Capture state machine
//!
//! Walks the logical button table one role at a time, assigning whatever
//! button or axis the user presses next, then waits for a confirming press
//! before saving the mapping.
//!
//! ```text
//! AwaitingDevice ──(no device)──────────────────────────────► Finished
//!       │
//!       └──► Capturing ──(last role)──► AwaitingConfirmation ──► Finished
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use super::cursor::{AxisLatch, CalibrationCursor};
use super::device::{DeviceGuard, InputDevice};
use super::error::{CalibrationError, CalibrationResult};
use super::mapping::MappingStore;
use super::roles::LogicalRole;
use super::signal::{AxisDirection, RawEvent, RawSignal};
use super::writer::{write_config, write_config_atomic};

/// Axis deadzone used when the host does not configure one.
pub const DEFAULT_DEADZONE: u32 = 3200;

/// Host-provided settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Axis values with a magnitude below this are neutral.
    pub deadzone: u32,
    /// Where the mapping is saved on confirmation.
    pub destination: PathBuf,
    /// Write through a temporary file and rename.
    pub atomic_write: bool,
}

impl CaptureSettings {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
            destination: destination.into(),
            atomic_write: false,
        }
    }

    pub fn with_deadzone(mut self, deadzone: u32) -> Self {
        self.deadzone = deadzone;
        self
    }

    pub fn with_atomic_write(mut self, atomic: bool) -> Self {
        self.atomic_write = atomic;
        self
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingDevice,
    Capturing,
    AwaitingConfirmation,
    Finished,
}

/// What a single event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing changed.
    Ignored,
    /// The role was left unmapped and the cursor moved on.
    Skipped(LogicalRole),
    /// The signal was assigned to the role and the cursor moved on.
    Mapped(RawSignal, LogicalRole),
    /// The latched axis returned inside the deadzone.
    AxisReleased(u32),
    /// The mapping was written and the session finished.
    Saved,
}

impl Step {
    /// Whether this step moved the calibration cursor.
    pub fn advanced(&self) -> bool {
        matches!(self, Step::Skipped(_) | Step::Mapped(..))
    }
}

/// Instruction the host should show for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Press(LogicalRole),
    Confirm,
    NoDevice,
    Done,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::Press(role) => write!(f, "Please press the axis/button for {}", role),
            Prompt::Confirm => write!(f, "All done! Press a key or button to save."),
            Prompt::NoDevice => write!(f, "No joystick found"),
            Prompt::Done => write!(f, "Configuration saved"),
        }
    }
}

/// One calibration session for a single device.
///
/// Feed host events through [`on_event`](Self::on_event). The session owns
/// the device until it finishes; dropping an unfinished session closes the
/// device. A finished session ignores all events and cannot be restarted.
pub struct CaptureSession<D: InputDevice> {
    state: SessionState,
    settings: CaptureSettings,
    device: Option<DeviceGuard<D>>,
    device_name: Option<String>,
    mappings: MappingStore,
    cursor: CalibrationCursor,
    latch: AxisLatch,
    failure: Option<CalibrationError>,
    finish_hook: Option<Box<dyn FnOnce()>>,
}

impl<D: InputDevice> CaptureSession<D> {
    /// Start a session on `device`. With no device the session finishes
    /// immediately and [`failure`](Self::failure) reports
    /// [`CalibrationError::NoDeviceAvailable`].
    pub fn new(device: Option<D>, settings: CaptureSettings) -> Self {
        let mut session = Self {
            state: SessionState::AwaitingDevice,
            settings,
            device: None,
            device_name: None,
            mappings: MappingStore::new(),
            cursor: CalibrationCursor::new(),
            latch: AxisLatch::new(),
            failure: None,
            finish_hook: None,
        };

        match device {
            Some(device) => {
                session.device_name = device.name();
                log::info!(
                    "Opening joystick \"{}\" for configuration...",
                    session.device_name.as_deref().unwrap_or("")
                );
                session.device = Some(DeviceGuard::new(device));
                session.state = SessionState::Capturing;
            }
            None => {
                log::error!("Input configuration found no joysticks");
                session.failure = Some(CalibrationError::NoDeviceAvailable);
                session.state = SessionState::Finished;
            }
        }

        session
    }

    /// Register a callback run once when the session finishes. Runs
    /// immediately if it already has.
    pub fn on_finished(&mut self, hook: impl FnOnce() + 'static) {
        if self.state == SessionState::Finished {
            hook();
        } else {
            self.finish_hook = Some(Box::new(hook));
        }
    }

    /// Process one host event.
    ///
    /// Only a failed save returns an error. The session then stays in
    /// [`SessionState::AwaitingConfirmation`] with its mappings and device
    /// intact, so the host can fix the destination and confirm again.
    pub fn on_event(&mut self, event: RawEvent) -> CalibrationResult<Step> {
        log::debug!("[{:?}] {:?}", self.state, event);
        match self.state {
            SessionState::Capturing => Ok(self.capture(event)),
            SessionState::AwaitingConfirmation => self.confirm(event),
            SessionState::AwaitingDevice | SessionState::Finished => Ok(Step::Ignored),
        }
    }

    fn capture(&mut self, event: RawEvent) -> Step {
        let Some(role) = self.cursor.current_role() else {
            return Step::Ignored;
        };

        let step = match event {
            RawEvent::KeyUp => {
                log::debug!("Skipping {}", role);
                self.cursor.advance();
                Step::Skipped(role)
            }
            RawEvent::ButtonDown { index } => self.map(RawSignal::Button(index), role),
            RawEvent::AxisMotion { index, value } => self.capture_axis(index, value, role),
            _ => Step::Ignored,
        };

        if step.advanced() && self.cursor.is_complete() {
            log::debug!("All roles visited, waiting for confirmation");
            self.state = SessionState::AwaitingConfirmation;
        }

        step
    }

    fn capture_axis(&mut self, axis: u32, value: i32, role: LogicalRole) -> Step {
        let neutral = value == 0 || value.unsigned_abs() < self.settings.deadzone;

        if self.latch.is_latched(axis) {
            if neutral {
                self.latch.release();
                return Step::AxisReleased(axis);
            }
            return Step::Ignored;
        }
        if neutral {
            return Step::Ignored;
        }

        let step = self.map(RawSignal::Axis(axis, AxisDirection::of(value)), role);
        self.latch.latch(axis);
        step
    }

    fn map(&mut self, signal: RawSignal, role: LogicalRole) -> Step {
        if let Some(previous) = self.mappings.assign(signal, role) {
            log::debug!("Remapping {} from {} to {}", signal, previous, role);
        }
        log::info!("Mapping {} to {}", role, signal);
        self.cursor.advance();
        Step::Mapped(signal, role)
    }

    fn confirm(&mut self, event: RawEvent) -> CalibrationResult<Step> {
        if !matches!(event, RawEvent::KeyUp | RawEvent::ButtonDown { .. }) {
            return Ok(Step::Ignored);
        }

        log::debug!("Finishing configuration...");
        self.save()?;

        if let Some(mut device) = self.device.take() {
            device.release();
        }
        log::debug!("Config complete, joystick closed");

        self.state = SessionState::Finished;
        if let Some(hook) = self.finish_hook.take() {
            hook();
        }
        Ok(Step::Saved)
    }

    fn save(&self) -> CalibrationResult<()> {
        let path = self.settings.destination.as_path();
        let name = self.device_name.as_deref();
        let result = if self.settings.atomic_write {
            write_config_atomic(path, name, &self.mappings)
        } else {
            write_config(path, name, &self.mappings)
        };
        if let Err(ref e) = result {
            log::error!("{}", e);
        }
        result
    }

    /// Change where the mapping is saved. Used to retry after a failed write.
    pub fn set_destination(&mut self, path: impl Into<PathBuf>) {
        self.settings.destination = path.into();
    }

    pub fn destination(&self) -> &Path {
        &self.settings.destination
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Every role has been visited; the session is waiting for confirmation
    /// or already finished.
    pub fn is_complete(&self) -> bool {
        matches!(
            self.state,
            SessionState::AwaitingConfirmation | SessionState::Finished
        )
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Why the session ended without calibrating, if it did.
    pub fn failure(&self) -> Option<&CalibrationError> {
        self.failure.as_ref()
    }

    /// Role waiting for input, while capturing.
    pub fn current_role(&self) -> Option<LogicalRole> {
        match self.state {
            SessionState::Capturing => self.cursor.current_role(),
            _ => None,
        }
    }

    pub fn cursor(&self) -> CalibrationCursor {
        self.cursor
    }

    pub fn latched_axis(&self) -> Option<u32> {
        self.latch.latched()
    }

    pub fn mappings(&self) -> &MappingStore {
        &self.mappings
    }

    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    /// Whether the session still holds the device open.
    pub fn holds_device(&self) -> bool {
        self.device.as_ref().is_some_and(DeviceGuard::is_open)
    }

    pub fn prompt(&self) -> Prompt {
        match self.state {
            SessionState::AwaitingDevice => Prompt::NoDevice,
            SessionState::Capturing => match self.cursor.current_role() {
                Some(role) => Prompt::Press(role),
                None => Prompt::Confirm,
            },
            SessionState::AwaitingConfirmation => Prompt::Confirm,
            SessionState::Finished if self.failure.is_some() => Prompt::NoDevice,
            SessionState::Finished => Prompt::Done,
        }
    }
}

impl<D: InputDevice> fmt::Debug for CaptureSession<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSession")
            .field("state", &self.state)
            .field("device_name", &self.device_name)
            .field("cursor", &self.cursor)
            .field("latch", &self.latch)
            .field("mappings", &self.mappings)
            .finish_non_exhaustive()
    }
}
