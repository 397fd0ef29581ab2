// joyconfig: joystick calibration for front-end navigation

pub mod cli;
pub mod config;
pub mod input;
pub mod logging;

pub use cli::Cli;
pub use config::Options;
pub use logging::LogLevel;
