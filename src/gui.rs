// src/gui.rs
use std::time::Instant;

use eframe::egui;
use egui::{Color32, ColorImage, TextureHandle, TextureOptions};

use crate::engine::FrameLoop;
use crate::drivers::VideoFrame;
use crate::thermal::{paint_frame, IngestOutcome, OverlayStyle};
use crate::types::Toggle;

const MAX_LOG_LINES: usize = 4;

pub struct ThermalOverlayApp {
    frame_loop: FrameLoop,
    style: OverlayStyle,
    // 最近一帧视频 (没有新帧时重画它)
    video_texture: Option<TextureHandle>,
    last_outcome: Option<IngestOutcome>,
    // 状态栏日志
    log_messages: Vec<String>,
}

impl ThermalOverlayApp {
    pub fn new(frame_loop: FrameLoop, style: OverlayStyle) -> Self {
        Self {
            frame_loop,
            style,
            video_texture: None,
            last_outcome: None,
            log_messages: vec!["A: auto scale   M: mirror".to_owned()],
        }
    }

    fn log(&mut self, msg: String) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > MAX_LOG_LINES {
            self.log_messages.remove(0);
        }
    }

    fn upload_frame(&mut self, ctx: &egui::Context, frame: VideoFrame) {
        let size = [frame.width() as usize, frame.height() as usize];
        let image = ColorImage::from_rgb(size, frame.image.as_raw());
        if let Some(texture) = self.video_texture.as_mut() {
            texture.set(image, TextureOptions::LINEAR);
        } else {
            self.video_texture = Some(ctx.load_texture("video_frame", image, TextureOptions::LINEAR));
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (auto_scale, mirror) =
            ctx.input(|i| (i.key_pressed(egui::Key::A), i.key_pressed(egui::Key::M)));
        if auto_scale {
            let msg = self.frame_loop.toggle(Toggle::AutoScale);
            self.log(msg);
        }
        if mirror {
            let msg = self.frame_loop.toggle(Toggle::Mirror);
            self.log(msg);
        }
    }

    fn status_line(&self) -> String {
        let range = self.frame_loop.pipeline().range();
        let config = self.frame_loop.config();
        let stats = self.frame_loop.stats();
        let data = match self.last_outcome {
            Some(IngestOutcome::Accepted { valid_cells }) => format!("{valid_cells}/64 cells"),
            Some(IngestOutcome::Rejected) => "bad record".to_owned(),
            Some(IngestOutcome::Starved) | None => "waiting".to_owned(),
        };
        format!(
            "range {:.1}..{:.1} | {} | auto {} | mirror {} | frames {} ok / {} bad",
            range.min,
            range.max,
            data,
            if config.auto_scale { "on" } else { "off" },
            if config.mirror { "on" } else { "off" },
            stats.accepted,
            stats.rejected,
        )
    }
}

impl eframe::App for ThermalOverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. 键盘切换, 下一帧生效
        self.handle_keys(ctx);

        // 2. 定时 tick
        let now = Instant::now();
        if let Some(report) = self.frame_loop.poll(now) {
            if let Some(frame) = report.video {
                self.upload_frame(ctx, frame);
            }
            if report.outcome != IngestOutcome::Starved || self.last_outcome.is_none() {
                self.last_outcome = Some(report.outcome);
            }
        }

        // 3. 绘制
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.monospace(self.status_line());
            for m in &self.log_messages {
                ui.monospace(m);
            }
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                let config = self.frame_loop.config();
                paint_frame(
                    ui.painter(),
                    area,
                    self.video_texture.as_ref().map(|t| t.id()),
                    self.frame_loop.hue_grid(),
                    &self.style,
                    config.mirror,
                );
            });

        ctx.request_repaint_after(self.frame_loop.until_next_tick(Instant::now()));
    }
}
