//! Raw hardware signals and the events that carry them.

use std::fmt;
use std::str::FromStr;

/// Direction of an analog axis deflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisDirection {
    Positive,
    Negative,
}

impl AxisDirection {
    /// Classify a signed axis value. Zero counts as positive; callers filter
    /// neutral values against the deadzone first.
    pub fn of(value: i32) -> Self {
        if value < 0 {
            AxisDirection::Negative
        } else {
            AxisDirection::Positive
        }
    }

    fn sign(self) -> char {
        match self {
            AxisDirection::Positive => '+',
            AxisDirection::Negative => '-',
        }
    }
}

/// A physical input source on one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RawSignal {
    Button(u32),
    Axis(u32, AxisDirection),
}

impl RawSignal {
    /// Device-local index of the button or axis.
    pub fn index(&self) -> u32 {
        match *self {
            RawSignal::Button(index) | RawSignal::Axis(index, _) => index,
        }
    }

    /// Record kind used when persisting this signal.
    pub fn record_kind(&self) -> RecordKind {
        match self {
            RawSignal::Button(_) => RecordKind::Button,
            RawSignal::Axis(_, AxisDirection::Positive) => RecordKind::AxisPos,
            RawSignal::Axis(_, AxisDirection::Negative) => RecordKind::AxisNeg,
        }
    }
}

impl fmt::Display for RawSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawSignal::Button(index) => write!(f, "button {}", index),
            RawSignal::Axis(index, dir) => write!(f, "axis{} {}", dir.sign(), index),
        }
    }
}

/// Tag at the start of each persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    JoyName,
    Button,
    AxisPos,
    AxisNeg,
}

impl RecordKind {
    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::JoyName => "JOYNAME",
            RecordKind::Button => "BUTTON",
            RecordKind::AxisPos => "AXISPOS",
            RecordKind::AxisNeg => "AXISNEG",
        }
    }

    /// Build the signal a mapping record of this kind refers to.
    /// `JoyName` carries no signal.
    pub fn signal(self, index: u32) -> Option<RawSignal> {
        match self {
            RecordKind::JoyName => None,
            RecordKind::Button => Some(RawSignal::Button(index)),
            RecordKind::AxisPos => Some(RawSignal::Axis(index, AxisDirection::Positive)),
            RecordKind::AxisNeg => Some(RawSignal::Axis(index, AxisDirection::Negative)),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RecordKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JOYNAME" => Ok(RecordKind::JoyName),
            "BUTTON" => Ok(RecordKind::Button),
            "AXISPOS" => Ok(RecordKind::AxisPos),
            "AXISNEG" => Ok(RecordKind::AxisNeg),
            _ => Err(()),
        }
    }
}

/// An input event delivered by the host's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// A keyboard key was released.
    KeyUp,
    /// A keyboard key was pressed.
    KeyDown,
    /// A joystick button was pressed.
    ButtonDown { index: u32 },
    /// A joystick button was released.
    ButtonUp { index: u32 },
    /// An analog axis moved to a signed position.
    AxisMotion { index: u32, value: i32 },
    /// A POV hat changed position.
    HatMotion { index: u32, value: u8 },
    /// Anything else the host forwards.
    Other,
}
