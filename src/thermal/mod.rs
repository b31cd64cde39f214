// src/thermal/mod.rs
// 每帧数据管线: 解析 -> 平滑 -> 量程 -> 着色 -> 叠加
pub mod color;
pub mod compositor;
pub mod filter;
pub mod pipeline;
pub mod range;
pub mod record;
pub use color::{HueGradient, HueGrid, OverlayStyle};
pub use compositor::paint_frame;
pub use pipeline::{IngestOutcome, ThermalPipeline};
pub use range::DisplayRange;
