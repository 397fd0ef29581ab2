use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use joyconfig::config::Options;
use joyconfig::input::{
    load_config, needs_calibration, parse_script, CaptureSession, LogicalRole, ScriptedDevice,
};
use joyconfig::{logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.merge_into_options(Options::default())?;

    logging::init(options.log_level);

    let path = options.resolved_config_path()?;
    log::debug!("Input config: {}", path.display());

    if options.show {
        return show(&path);
    }

    match options.script {
        Some(ref script) => run_script(&options, script),
        None => run_sdl(&options),
    }
}

fn show(path: &Path) -> Result<()> {
    let loaded = load_config(path)?;
    println!(
        "Joystick: {}",
        loaded.device_name.as_deref().unwrap_or("(unnamed)")
    );
    for (signal, role) in loaded.mappings.entries() {
        println!("  {:<24} {}", role.label(), signal);
    }
    let unmapped: Vec<&str> = LogicalRole::targets()
        .filter(|role| !loaded.mappings.entries().any(|(_, r)| r == *role))
        .map(LogicalRole::label)
        .collect();
    if !unmapped.is_empty() {
        println!("Unmapped: {}", unmapped.join(", "));
    }
    if loaded.skipped > 0 {
        println!("({} unrecognized lines skipped)", loaded.skipped);
    }
    Ok(())
}

fn run_script(options: &Options, script: &Path) -> Result<()> {
    let text = if script == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read script from stdin")?;
        text
    } else {
        fs::read_to_string(script)
            .with_context(|| format!("Failed to read script {}", script.display()))?
    };
    let events = parse_script(&text)?;

    let settings = options.capture_settings()?;
    if !options.force && !needs_calibration(&settings.destination, 1) {
        println!(
            "{} already exists; use --force to reconfigure",
            settings.destination.display()
        );
        return Ok(());
    }

    let device = ScriptedDevice::new(options.device_name.clone());
    let mut session = CaptureSession::new(Some(device), settings);
    for event in events {
        if let Err(e) = session.on_event(event) {
            eprintln!("{}", e);
        }
        if session.is_finished() {
            break;
        }
    }

    if !session.is_finished() {
        anyhow::bail!(
            "Script ended before the configuration was saved ({})",
            session.prompt()
        );
    }
    println!(
        "Saved {} mappings to {}",
        session.mappings().len(),
        session.destination().display()
    );
    Ok(())
}

#[cfg(feature = "sdl")]
fn run_sdl(options: &Options) -> Result<()> {
    use joyconfig::input::sdl::SdlHost;

    let host = SdlHost::init()?;
    let settings = options.capture_settings()?;
    if !options.force && !needs_calibration(&settings.destination, host.device_count()) {
        log::info!("No calibration needed");
        return Ok(());
    }

    let device = host.open(options.device_index);
    let instance_id = device.as_ref().map(|d| d.instance_id()).unwrap_or(0);
    let mut session = CaptureSession::new(device, settings);
    if let Some(e) = session.failure() {
        println!("{}", e);
        return Ok(());
    }

    host.run(&mut session, instance_id)?;
    if session.is_finished() {
        println!("{}", session.prompt());
    }
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn run_sdl(_options: &Options) -> Result<()> {
    anyhow::bail!("Built without SDL support; rebuild with --features sdl or pass --script")
}
