use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use std::thread;
use std::time::Duration;
use image::{Rgb, RgbImage};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::{Camera, NokhwaError};
use crate::drivers::ThermalError;
const FRAME_QUEUE: usize = 2;
const OPEN_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_DELAY: Duration = Duration::from_millis(50);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Back-to-back frame errors tolerated before the device is treated as gone.
const MAX_FAILED_FRAMES: u32 = 20;
/// One decoded RGB video frame.
#[derive(Clone, Debug)]
pub struct VideoFrame {
    pub image: RgbImage,
}
impl VideoFrame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
/// Polled once per tick. Returns the newest frame if one arrived since the
/// last poll; never waits for the device.
pub trait VideoSource {
    fn poll_frame(&mut self) -> Option<VideoFrame>;
    fn describe(&self) -> String;
}
/// Webcam read on a dedicated capture thread; frames cross over a small
/// bounded queue and are dropped when the frame loop falls behind.
pub struct CameraSource {
    name: String,
    frames: Receiver<VideoFrame>,
    disconnected: bool,
}
impl CameraSource {
    /// Opens the camera and waits for the capture thread to confirm it is streaming.
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self, ThermalError> {
        let (open_tx, open_rx) = mpsc::channel();
        let (frame_tx, frame_rx) = mpsc::sync_channel(FRAME_QUEUE);
        thread::Builder::new()
            .name("camera-capture".to_owned())
            .spawn(move || capture_loop(index, width, height, open_tx, frame_tx))?;
        let name = match open_rx.recv_timeout(OPEN_TIMEOUT) {
            Ok(Ok(name)) => name,
            Ok(Err(msg)) => return Err(ThermalError::CameraOpen(msg)),
            Err(_) => {
                return Err(ThermalError::CameraOpen(format!(
                    "camera {index} did not start within {OPEN_TIMEOUT:?}"
                )))
            }
        };
        log::info!("opened camera {index}: {name}");
        Ok(Self {
            name,
            frames: frame_rx,
            disconnected: false,
        })
    }
}
impl VideoSource for CameraSource {
    fn poll_frame(&mut self) -> Option<VideoFrame> {
        let mut latest = None;
        loop {
            match self.frames.try_recv() {
                Ok(frame) => latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        log::warn!("{}", ThermalError::CameraDisconnected);
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        latest
    }
    fn describe(&self) -> String {
        format!("camera {}", self.name)
    }
}
fn open_camera(index: u32, width: u32, height: u32) -> Result<Camera, NokhwaError> {
    let format = CameraFormat::new(Resolution::new(width, height), FrameFormat::MJPEG, 30);
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(format));
    let mut camera = Camera::new(CameraIndex::Index(index), requested)?;
    camera.open_stream()?;
    Ok(camera)
}
/// Run of consecutive capture errors. The retry delay doubles with each one.
#[derive(Debug, Default)]
struct FailureRun {
    count: u32,
}
impl FailureRun {
    /// Records one failure. `None` means the run is long enough to give up.
    fn fail(&mut self) -> Option<Duration> {
        self.count += 1;
        if self.count >= MAX_FAILED_FRAMES {
            return None;
        }
        let factor = 1u32 << (self.count - 1).min(5);
        Some(RETRY_DELAY.saturating_mul(factor).min(MAX_RETRY_DELAY))
    }
    fn reset(&mut self) {
        self.count = 0;
    }
}
fn capture_loop(
    index: u32,
    width: u32,
    height: u32,
    open_tx: mpsc::Sender<Result<String, String>>,
    frame_tx: SyncSender<VideoFrame>,
) {
    let mut camera = match open_camera(index, width, height) {
        Ok(camera) => camera,
        Err(e) => {
            let _ = open_tx.send(Err(e.to_string()));
            return;
        }
    };
    if open_tx.send(Ok(camera.info().human_name())).is_err() {
        return;
    }
    let mut failures = FailureRun::default();
    loop {
        let decoded = match camera.frame().and_then(|buf| buf.decode_image::<RgbFormat>()) {
            Ok(img) => {
                failures.reset();
                img
            }
            Err(e) => match failures.fail() {
                Some(delay) => {
                    if failures.count == 1 {
                        log::warn!("camera frame dropped: {e}");
                    } else {
                        log::debug!("camera frame dropped ({} in a row): {e}", failures.count);
                    }
                    thread::sleep(delay);
                    continue;
                }
                None => {
                    log::error!("camera {index}: giving up after {} failed frames: {e}", failures.count);
                    break;
                }
            },
        };
        let (w, h) = (decoded.width(), decoded.height());
        let Some(image) = RgbImage::from_raw(w, h, decoded.into_raw()) else {
            continue;
        };
        match frame_tx.try_send(VideoFrame { image }) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => break,
        }
    }
    if let Err(e) = camera.stop_stream() {
        log::debug!("camera stop_stream: {e}");
    }
}
/// Human-readable list of cameras the native backend can see.
pub fn list_cameras() -> Result<Vec<String>, ThermalError> {
    Ok(nokhwa::query(ApiBackend::Auto)?
        .into_iter()
        .map(|cam| format!("{} | {}", cam.index(), cam.human_name()))
        .collect())
}
/// Synthetic video used with `--simulate`: a diagonal gradient with a marker in
/// the top-left corner, so mirroring is obvious on screen.
pub struct TestPatternSource {
    width: u32,
    height: u32,
    tick: u32,
}
impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            tick: 0,
        }
    }
    fn render(&self) -> RgbImage {
        let (w, h) = (self.width, self.height);
        let marker = (w.min(h) / 6).max(1);
        let sweep = (self.tick * 4) % w;
        RgbImage::from_fn(w, h, |x, y| {
            if x < marker && y < marker {
                return Rgb([255, 255, 255]);
            }
            if x == sweep {
                return Rgb([0, 0, 0]);
            }
            let r = (x * 255 / w) as u8;
            let g = (y * 255 / h) as u8;
            Rgb([r / 2 + 40, g / 2 + 40, 90])
        })
    }
}
impl VideoSource for TestPatternSource {
    fn poll_frame(&mut self) -> Option<VideoFrame> {
        self.tick = self.tick.wrapping_add(1);
        Some(VideoFrame {
            image: self.render(),
        })
    }
    fn describe(&self) -> String {
        format!("test pattern {}x{}", self.width, self.height)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_pattern_has_marker_top_left() {
        let mut src = TestPatternSource::new(64, 48);
        let frame = src.poll_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (64, 48));
        assert_eq!(*frame.image.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_ne!(*frame.image.get_pixel(63, 0), Rgb([255, 255, 255]));
    }
    #[test]
    fn failure_run_backs_off_then_gives_up() {
        let mut run = FailureRun::default();
        assert_eq!(run.fail(), Some(Duration::from_millis(50)));
        assert_eq!(run.fail(), Some(Duration::from_millis(100)));
        assert_eq!(run.fail(), Some(Duration::from_millis(200)));
        for _ in 3..MAX_FAILED_FRAMES - 1 {
            assert!(run.fail().is_some_and(|d| d <= MAX_RETRY_DELAY));
        }
        assert_eq!(run.fail(), None);
        run.reset();
        assert_eq!(run.fail(), Some(RETRY_DELAY));
    }
    #[test]
    fn ended_capture_thread_is_reported_once_frames_drain() {
        let (tx, rx) = mpsc::sync_channel(FRAME_QUEUE);
        tx.send(VideoFrame {
            image: RgbImage::new(4, 4),
        })
        .unwrap();
        drop(tx);
        let mut cam = CameraSource {
            name: "gone".to_owned(),
            frames: rx,
            disconnected: false,
        };
        assert!(cam.poll_frame().is_some());
        assert!(cam.disconnected);
        assert!(cam.poll_frame().is_none());
    }
}
