use thiserror::Error;
#[derive(Debug, Error)]
pub enum ThermalError {
    #[error("failed to open serial port {port}")]
    SerialOpen {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to open camera: {0}")]
    CameraOpen(String),
    #[error("camera capture thread stopped")]
    CameraDisconnected,
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
}
impl From<nokhwa::NokhwaError> for ThermalError {
    fn from(value: nokhwa::NokhwaError) -> Self {
        ThermalError::CameraOpen(value.to_string())
    }
}
