//! Calibration progress and axis latch.

use super::roles::LogicalRole;

/// Position in the logical button table.
///
/// Starts at the first real role and only moves forward. Once it runs past
/// the end of the table calibration is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationCursor {
    position: usize,
}

impl Default for CalibrationCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationCursor {
    pub fn new() -> Self {
        Self {
            position: LogicalRole::FIRST_TARGET,
        }
    }

    /// Ordinal of the role being captured, or of one past the last role.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Role waiting for input, `None` once complete.
    pub fn current_role(&self) -> Option<LogicalRole> {
        if self.is_complete() {
            return None;
        }
        LogicalRole::ALL.get(self.position).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= LogicalRole::COUNT
    }

    /// Move to the next role. Saturates once complete.
    pub fn advance(&mut self) {
        if !self.is_complete() {
            self.position += 1;
        }
    }
}

/// Remembers the axis that last produced a mapping so a held stick does not
/// fire again until it returns inside the deadzone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisLatch {
    axis: Option<u32>,
}

impl AxisLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latched(&self) -> Option<u32> {
        self.axis
    }

    pub fn is_latched(&self, axis: u32) -> bool {
        self.axis == Some(axis)
    }

    pub fn latch(&mut self, axis: u32) {
        self.axis = Some(axis);
    }

    pub fn release(&mut self) {
        self.axis = None;
    }
}
