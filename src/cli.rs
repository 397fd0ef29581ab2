use crate::config::{parse_deadzone, parse_log_level, Options};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Map a joystick's buttons and axes to front-end navigation
#[derive(Parser, Debug)]
#[command(name = "joyconfig")]
#[command(version)]
#[command(about = "Configure a joystick for front-end navigation", long_about = None)]
pub struct Cli {
    /// Input config file (default: ~/.emulationstation/es_input.cfg)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Axis deadzone (0-32767)
    #[arg(short, long, value_name = "VALUE")]
    pub deadzone: Option<String>,

    /// Index of the joystick to configure
    #[arg(short = 'j', long, value_name = "INDEX")]
    pub joystick: Option<String>,

    /// Configure even if an input config already exists
    #[arg(short, long)]
    pub force: bool,

    /// Write the config through a temporary file
    #[arg(long)]
    pub atomic: bool,

    /// Log level (0 = nothing .. 6 = all)
    #[arg(short, long, value_name = "LEVEL")]
    pub loglevel: Option<String>,

    /// Replay events from a script file ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Device name recorded when replaying a script
    #[arg(long, value_name = "NAME", requires = "script")]
    pub name: Option<String>,

    /// Print the saved input config and exit
    #[arg(long)]
    pub show: bool,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref config) = self.config {
            opts.config_path = Some(config.clone());
        }

        if let Some(ref deadzone) = self.deadzone {
            opts.deadzone = parse_deadzone(deadzone)?;
        }

        if let Some(ref joystick) = self.joystick {
            opts.device_index = joystick
                .trim()
                .parse()
                .context("Invalid joystick index")?;
        }

        if self.force {
            opts.force = true;
        }
        if self.atomic {
            opts.atomic_write = true;
        }

        if let Some(ref level) = self.loglevel {
            opts.log_level = parse_log_level(level)?;
        }

        if let Some(ref script) = self.script {
            opts.script = Some(script.clone());
        }
        if let Some(ref name) = self.name {
            opts.device_name = Some(name.clone());
        }

        if self.show {
            opts.show = true;
        }

        Ok(opts)
    }
}
