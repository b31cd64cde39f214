// src/engine.rs
use std::time::{Duration, Instant};

use crate::drivers::{LineSource, VideoFrame, VideoSource};
use crate::scheduler::TickScheduler;
use crate::settings::OverlaySettings;
use crate::thermal::{HueGrid, IngestOutcome, ThermalPipeline};
use crate::types::{DisplayConfig, Toggle};

/// 每个 tick 的计数
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub ticks: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub starved: u64,
    pub source_errors: u64,
}

/// Result of one tick, handed to the window for drawing.
pub struct TickReport {
    /// Newly captured frame, if the camera produced one since the last tick.
    pub video: Option<VideoFrame>,
    pub outcome: IngestOutcome,
}

/// Single-threaded frame loop: video poll, line poll + pipeline, color map.
/// Drawing is left to the caller so the loop stays independent of the window.
pub struct FrameLoop {
    lines: Box<dyn LineSource>,
    video: Box<dyn VideoSource>,
    pipeline: ThermalPipeline,
    scheduler: TickScheduler,
    hue_grid: HueGrid,
    stats: TickStats,
}

impl FrameLoop {
    pub fn new(
        lines: Box<dyn LineSource>,
        video: Box<dyn VideoSource>,
        settings: &OverlaySettings,
    ) -> Self {
        log::info!(
            "frame loop: {} + {} at {} fps",
            lines.describe(),
            video.describe(),
            settings.frame_rate_hz
        );
        let pipeline = ThermalPipeline::new(settings);
        let hue_grid = pipeline.hue_grid();
        Self {
            lines,
            video,
            pipeline,
            scheduler: TickScheduler::from_rate(settings.frame_rate_hz),
            hue_grid,
            stats: TickStats::default(),
        }
    }

    /// Runs a tick if one is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TickReport> {
        if self.scheduler.poll(now) {
            Some(self.tick())
        } else {
            None
        }
    }

    pub fn until_next_tick(&self, now: Instant) -> Duration {
        self.scheduler.until_next(now)
    }

    /// One full pass regardless of the clock.
    pub fn tick(&mut self) -> TickReport {
        self.stats.ticks += 1;

        // 1. 视频帧 (非阻塞)
        let video = self.video.poll_frame();

        // 2. 串口数据 -> 解析 -> 滤波 -> 量程
        let line = match self.lines.poll_line() {
            Ok(line) => line,
            Err(e) => {
                self.stats.source_errors += 1;
                log::warn!("{}: {e}", self.lines.describe());
                None
            }
        };
        let outcome = self.pipeline.ingest(line.as_deref());
        match outcome {
            IngestOutcome::Accepted { .. } => self.stats.accepted += 1,
            IngestOutcome::Rejected => self.stats.rejected += 1,
            IngestOutcome::Starved => self.stats.starved += 1,
        }

        // 3. 着色
        self.hue_grid = self.pipeline.hue_grid();

        TickReport { video, outcome }
    }

    pub fn toggle(&mut self, toggle: Toggle) -> String {
        let message = self.pipeline.toggle(toggle);
        log::info!("{message}");
        message
    }

    pub fn hue_grid(&self) -> &HueGrid {
        &self.hue_grid
    }

    pub fn config(&self) -> DisplayConfig {
        self.pipeline.config()
    }

    pub fn pipeline(&self) -> &ThermalPipeline {
        &self.pipeline
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }
}
