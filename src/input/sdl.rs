//! SDL2 host for a calibration session.
//!
//! Opens the joystick, translates SDL events into [`RawEvent`]s and pumps
//! them into a [`CaptureSession`] until it finishes.

use anyhow::{anyhow, Result};
use sdl2::event::Event;
use sdl2::joystick::{HatState, Joystick};
use sdl2::{JoystickSubsystem, Sdl};

use super::capture::{CaptureSession, SessionState};
use super::device::InputDevice;
use super::signal::RawEvent;

/// An open SDL joystick.
pub struct SdlJoystick {
    joystick: Option<Joystick>,
    instance_id: u32,
}

impl SdlJoystick {
    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }
}

impl InputDevice for SdlJoystick {
    fn name(&self) -> Option<String> {
        self.joystick
            .as_ref()
            .map(Joystick::name)
            .filter(|name| !name.is_empty())
    }

    fn close(&mut self) {
        // SDL_JoystickClose runs when the handle drops
        self.joystick = None;
    }
}

/// SDL context plus a window so keyboard events are delivered.
pub struct SdlHost {
    sdl: Sdl,
    joysticks: JoystickSubsystem,
    _window: sdl2::video::Window,
}

impl SdlHost {
    pub fn init() -> Result<Self> {
        let sdl = sdl2::init().map_err(|e| anyhow!("SDL init failed: {}", e))?;
        let joysticks = sdl
            .joystick()
            .map_err(|e| anyhow!("SDL joystick init failed: {}", e))?;
        let video = sdl
            .video()
            .map_err(|e| anyhow!("SDL video init failed: {}", e))?;
        let window = video
            .window("joyconfig", 480, 160)
            .position_centered()
            .build()
            .map_err(|e| anyhow!("Failed to create window: {}", e))?;

        Ok(Self {
            sdl,
            joysticks,
            _window: window,
        })
    }

    pub fn device_count(&self) -> usize {
        match self.joysticks.num_joysticks() {
            Ok(n) => n as usize,
            Err(e) => {
                log::warn!("Can't enumerate joysticks: {}", e);
                0
            }
        }
    }

    /// Open the joystick at `index`, or `None` if there isn't one.
    pub fn open(&self, index: u32) -> Option<SdlJoystick> {
        if index as usize >= self.device_count() {
            return None;
        }
        match self.joysticks.open(index) {
            Ok(joystick) => Some(SdlJoystick {
                instance_id: joystick.instance_id(),
                joystick: Some(joystick),
            }),
            Err(e) => {
                log::warn!("Failed to open joystick {}: {}", index, e);
                None
            }
        }
    }

    /// Pump events into `session` until it finishes or the window closes.
    pub fn run(&self, session: &mut CaptureSession<SdlJoystick>, instance_id: u32) -> Result<()> {
        let mut pump = self
            .sdl
            .event_pump()
            .map_err(|e| anyhow!("Failed to get event pump: {}", e))?;

        let mut shown = None;
        while !session.is_finished() {
            let prompt = session.prompt();
            if shown != Some(prompt) {
                println!("{}", prompt);
                shown = Some(prompt);
            }

            let event = pump.wait_event();
            if let Event::Quit { .. } = event {
                log::info!("Quit requested before configuration was saved");
                return Ok(());
            }
            if let Some(raw) = translate(&event, instance_id) {
                if let Err(e) = session.on_event(raw) {
                    // the session keeps its mappings; report and wait for another try
                    eprintln!("{}", e);
                }
            }
        }

        debug_assert_eq!(session.state(), SessionState::Finished);
        Ok(())
    }
}

/// Translate an SDL event from joystick `instance_id` (or the keyboard).
pub fn translate(event: &Event, instance_id: u32) -> Option<RawEvent> {
    let raw = match *event {
        Event::KeyUp { .. } => RawEvent::KeyUp,
        Event::KeyDown { .. } => RawEvent::KeyDown,
        Event::JoyButtonDown {
            which, button_idx, ..
        } if which == instance_id => RawEvent::ButtonDown {
            index: u32::from(button_idx),
        },
        Event::JoyButtonUp {
            which, button_idx, ..
        } if which == instance_id => RawEvent::ButtonUp {
            index: u32::from(button_idx),
        },
        Event::JoyAxisMotion {
            which,
            axis_idx,
            value,
            ..
        } if which == instance_id => RawEvent::AxisMotion {
            index: u32::from(axis_idx),
            value: i32::from(value),
        },
        Event::JoyHatMotion {
            which,
            hat_idx,
            state,
            ..
        } if which == instance_id => RawEvent::HatMotion {
            index: u32::from(hat_idx),
            value: hat_bits(state),
        },
        _ => return None,
    };
    Some(raw)
}

fn hat_bits(state: HatState) -> u8 {
    match state {
        HatState::Centered => 0,
        HatState::Up => 1,
        HatState::Right => 2,
        HatState::Down => 4,
        HatState::Left => 8,
        HatState::RightUp => 3,
        HatState::RightDown => 6,
        HatState::LeftUp => 9,
        HatState::LeftDown => 12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_filters_other_devices() {
        let event = Event::JoyButtonDown {
            timestamp: 0,
            which: 1,
            button_idx: 2,
        };
        assert_eq!(translate(&event, 1), Some(RawEvent::ButtonDown { index: 2 }));
        assert_eq!(translate(&event, 0), None);
    }

    #[test]
    fn test_translate_axis() {
        let event = Event::JoyAxisMotion {
            timestamp: 0,
            which: 0,
            axis_idx: 3,
            value: -32768,
        };
        assert_eq!(
            translate(&event, 0),
            Some(RawEvent::AxisMotion {
                index: 3,
                value: -32768
            })
        );
    }

    #[test]
    fn test_hat_bits() {
        assert_eq!(hat_bits(HatState::Centered), 0);
        assert_eq!(hat_bits(HatState::LeftDown), 12);
    }
}
