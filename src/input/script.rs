//! Event scripts
//!
//! A plain-text stand-in for a live event loop, one event per line:
//!
//! ```text
//! # comment
//! key              keyboard key released
//! keydown          keyboard key pressed
//! button <n>       button pressed
//! buttonup <n>     button released
//! axis <n> <value> axis moved
//! hat <n> <value>  hat moved
//! ```

use super::device::InputDevice;
use super::error::{CalibrationError, CalibrationResult};
use super::signal::RawEvent;

/// Parse a whole script into events.
pub fn parse_script(text: &str) -> CalibrationResult<Vec<RawEvent>> {
    let mut events = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        };
        if line.trim().is_empty() {
            continue;
        }
        let event = parse_event(line).map_err(|message| CalibrationError::Parse {
            line: number + 1,
            message,
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Parse one script line.
pub fn parse_event(line: &str) -> Result<RawEvent, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some((&word, args)) = fields.split_first() else {
        return Err("empty event".to_string());
    };

    let event = match (word.to_lowercase().as_str(), args) {
        ("key" | "keyup", []) => RawEvent::KeyUp,
        ("keydown", []) => RawEvent::KeyDown,
        ("button" | "buttondown", [index]) => RawEvent::ButtonDown {
            index: number(index)?,
        },
        ("buttonup", [index]) => RawEvent::ButtonUp {
            index: number(index)?,
        },
        ("axis", [index, value]) => RawEvent::AxisMotion {
            index: number(index)?,
            value: number(value)?,
        },
        ("hat", [index, value]) => RawEvent::HatMotion {
            index: number(index)?,
            value: number(value)?,
        },
        _ => return Err(format!("unrecognized event '{}'", line.trim())),
    };
    Ok(event)
}

fn number<T: std::str::FromStr>(field: &str) -> Result<T, String> {
    field
        .parse()
        .map_err(|_| format!("invalid number '{}'", field))
}

/// A device that exists only to give a scripted session an identity.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDevice {
    name: Option<String>,
    closed: bool,
}

impl ScriptedDevice {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl InputDevice for ScriptedDevice {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn close(&mut self) {
        log::debug!("Scripted device closed");
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let events = parse_script(
            "# map UP with the stick\naxis 1 -20000\naxis 1 0\nbutton 3  # accept\n\nkey\nKEYDOWN\nbuttonup 3\nhat 0 1\n",
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                RawEvent::AxisMotion {
                    index: 1,
                    value: -20000
                },
                RawEvent::AxisMotion { index: 1, value: 0 },
                RawEvent::ButtonDown { index: 3 },
                RawEvent::KeyUp,
                RawEvent::KeyDown,
                RawEvent::ButtonUp { index: 3 },
                RawEvent::HatMotion { index: 0, value: 1 },
            ]
        );
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = parse_script("key\nbutton x\n").unwrap_err();
        match err {
            CalibrationError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert_eq!(message, "invalid number 'x'");
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_event_rejects_bad_arity() {
        assert!(parse_event("button").is_err());
        assert!(parse_event("axis 1").is_err());
        assert!(parse_event("key 1").is_err());
        assert!(parse_event("wiggle").is_err());
        assert!(parse_event("button -1").is_err());
    }

    #[test]
    fn test_scripted_device() {
        let mut device = ScriptedDevice::new(Some("Script Pad".to_string()));
        assert_eq!(device.name().as_deref(), Some("Script Pad"));
        assert!(!device.is_closed());
        device.close();
        assert!(device.is_closed());
    }
}
