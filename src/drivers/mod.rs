// src/drivers/mod.rs
// 外部数据源: 串口传感器, 摄像头, 以及模拟源
pub mod camera;
pub mod error;
pub mod serial;
pub mod simulated;
pub mod source;
pub use camera::{list_cameras, CameraSource, TestPatternSource, VideoFrame, VideoSource};
pub use error::ThermalError;
pub use serial::{list_ports, SerialLineSource};
pub use simulated::SimulatedSensor;
pub use source::{LineSource, ManualLineSource};
