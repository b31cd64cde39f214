// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

/// Thermal sensor heat-map over live video.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Serial port the sensor is attached to (e.g. /dev/ttyACM0, COM4)
    #[arg(short, long, required_unless_present_any = ["simulate", "list", "replay"])]
    pub port: Option<String>,

    #[arg(short, long, default_value_t = 115_200)]
    pub baud: u32,

    /// Camera index as reported by --list
    #[arg(short, long, default_value_t = 0)]
    pub camera: u32,

    #[arg(long, default_value_t = 640)]
    pub width: u32,

    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// JSON file with pipeline settings
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Use a synthetic sensor and test-pattern video instead of devices
    #[arg(long)]
    pub simulate: bool,

    /// Replay a captured sensor log (one record per line) instead of a serial port
    #[arg(long, conflicts_with = "port")]
    pub replay: Option<PathBuf>,

    /// Print serial ports and cameras, then exit
    #[arg(short, long)]
    pub list: bool,
}
