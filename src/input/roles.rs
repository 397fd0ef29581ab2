//! Logical button table
//!
//! The fixed, ordered catalog of logical roles a controller is calibrated
//! against.

use std::fmt;

/// A logical input role, independent of the physical hardware.
///
/// # Compatibility
///
/// The discriminant of each variant is its *ordinal*: the calibration order
/// and the integer written to the persisted mapping file. Ordinals of
/// existing variants must never change. New roles may only be appended after
/// [`LogicalRole::PageDown`], and [`LogicalRole::ALL`] and the label table
/// must be extended in the same order. Readers skip ordinals they do not
/// recognize, so appending stays compatible with older files and binaries.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicalRole {
    /// Placeholder at ordinal 0; never a calibration target.
    Unknown = 0,
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
    Accept = 5,
    Back = 6,
    Menu = 7,
    JumpToLetter = 8,
    PageUp = 9,
    PageDown = 10,
}

/// Display labels, indexed by ordinal.
const LABELS: [&str; LogicalRole::COUNT] = [
    "UNKNOWN",
    "UP",
    "DOWN",
    "LEFT",
    "RIGHT",
    "BUTTON1 (Accept)",
    "BUTTON2 (Back)",
    "START (Menu)",
    "SELECT (Jump-to-letter)",
    "PAGE UP",
    "PAGE DOWN",
];

impl LogicalRole {
    /// Number of entries in the table, UNKNOWN included.
    pub const COUNT: usize = 11;

    /// Every role in ordinal order.
    pub const ALL: [LogicalRole; Self::COUNT] = [
        LogicalRole::Unknown,
        LogicalRole::Up,
        LogicalRole::Down,
        LogicalRole::Left,
        LogicalRole::Right,
        LogicalRole::Accept,
        LogicalRole::Back,
        LogicalRole::Menu,
        LogicalRole::JumpToLetter,
        LogicalRole::PageUp,
        LogicalRole::PageDown,
    ];

    /// Ordinal of the first role that is actually calibrated.
    pub const FIRST_TARGET: usize = 1;

    /// The stable integer position of this role.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a role by ordinal. Returns `None` for ordinals this build
    /// does not know about.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Human-readable label shown when prompting for this role.
    pub fn label(self) -> &'static str {
        LABELS[self as usize]
    }

    /// Calibration targets, in the order they are prompted.
    pub fn targets() -> impl Iterator<Item = LogicalRole> + Clone {
        Self::ALL.into_iter().skip(Self::FIRST_TARGET)
    }
}

impl fmt::Display for LogicalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of roles in the table, UNKNOWN included.
pub fn role_count() -> usize {
    LogicalRole::COUNT
}

/// Display label for an ordinal.
///
/// # Panics
/// Panics if `ordinal >= role_count()`.
pub fn role_name(ordinal: usize) -> &'static str {
    LABELS[ordinal]
}
