// src/main.rs
mod cli;
mod drivers;
mod engine;
mod gui;
mod scheduler;
mod settings;
mod thermal;
mod types;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use crate::cli::Args;
use crate::drivers::{
    list_cameras, list_ports, CameraSource, LineSource, ManualLineSource, SerialLineSource,
    SimulatedSensor, TestPatternSource, VideoSource,
};
use crate::engine::FrameLoop;
use crate::settings::OverlaySettings;

const STATUS_BAR_HEIGHT: f32 = 90.0;

fn print_devices() {
    println!("Serial ports:");
    match list_ports() {
        Ok(ports) if ports.is_empty() => println!("  (none)"),
        Ok(ports) => ports.iter().for_each(|p| println!("  {p}")),
        Err(e) => println!("  unavailable: {e}"),
    }
    println!("Cameras:");
    match list_cameras() {
        Ok(cams) if cams.is_empty() => println!("  (none)"),
        Ok(cams) => cams.iter().for_each(|c| println!("  {c}")),
        Err(e) => println!("  unavailable: {e}"),
    }
}

// 启动时解析数据源, 任何一个失败都直接退出
fn open_line_source(args: &Args, settings: &OverlaySettings) -> Result<Box<dyn LineSource>> {
    if let Some(path) = &args.replay {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading replay file {}", path.display()))?;
        return Ok(Box::new(ManualLineSource::from_capture(&text)));
    }
    if let Some(port) = &args.port {
        let source = SerialLineSource::open(port, args.baud, settings.line_threshold)
            .context("no thermal sensor available")?;
        return Ok(Box::new(source));
    }
    if args.simulate {
        return Ok(Box::new(SimulatedSensor::new(settings.line_threshold)));
    }
    Err(anyhow!("no sensor source given; pass --port, --replay or --simulate"))
}

fn open_video_source(args: &Args) -> Result<Box<dyn VideoSource>> {
    if args.simulate {
        return Ok(Box::new(TestPatternSource::new(args.width, args.height)));
    }
    let camera = CameraSource::open(args.camera, args.width, args.height)
        .with_context(|| format!("no video source available (camera {})", args.camera))?;
    Ok(Box::new(camera))
}

// 入口函数
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.list {
        print_devices();
        return Ok(());
    }

    let settings = match &args.settings {
        Some(path) => OverlaySettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => OverlaySettings::default(),
    };
    let lines = open_line_source(&args, &settings)?;
    let video = open_video_source(&args)?;

    let frame_loop = FrameLoop::new(lines, video, &settings);
    let app = gui::ThermalOverlayApp::new(frame_loop, settings.style());

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([args.width as f32, args.height as f32 + STATUS_BAR_HEIGHT])
        .with_title("thermocam");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native("thermocam", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow!("window closed with error: {e}"))
}
