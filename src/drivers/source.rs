use std::collections::VecDeque;
use crate::drivers::ThermalError;
/// Records from the sensor end with a carriage return.
pub const LINE_TERMINATOR: u8 = b'\r';
/// Upper bound on buffered-but-unconsumed bytes.
pub const MAX_PENDING_BYTES: usize = 16 * 1024;
/// Something that can be polled once per tick for the next complete record line.
///
/// Implementations must never block: `Ok(None)` means nothing is ready yet.
pub trait LineSource {
    fn poll_line(&mut self) -> Result<Option<String>, ThermalError>;
    fn describe(&self) -> String;
}
/// Accumulates raw bytes across ticks and hands out whole lines.
pub struct LineAssembler {
    pending: Vec<u8>,
    threshold: usize,
    max_pending: usize,
}
impl LineAssembler {
    pub fn new(threshold: usize) -> Self {
        Self::with_limit(threshold, MAX_PENDING_BYTES)
    }
    pub fn with_limit(threshold: usize, max_pending: usize) -> Self {
        Self {
            pending: Vec::with_capacity(max_pending.min(4096)),
            threshold,
            max_pending: max_pending.max(threshold),
        }
    }
    #[cfg(test)]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
    pub fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        if self.pending.len() <= self.max_pending {
            return;
        }
        // Drop the oldest bytes, cutting on a line boundary so the next line starts clean.
        let excess = self.pending.len() - self.max_pending;
        let cut = self.pending[excess - 1..]
            .iter()
            .position(|&b| b == LINE_TERMINATOR)
            .map(|p| excess + p)
            .unwrap_or(self.pending.len());
        log::warn!("serial backlog over {} bytes, dropping {cut}", self.max_pending);
        self.pending.drain(..cut);
    }
    /// Takes the next line once at least `threshold` bytes are buffered and a
    /// terminator has arrived. The terminator and surrounding whitespace are stripped.
    pub fn next_line(&mut self) -> Option<String> {
        if self.pending.len() < self.threshold {
            return None;
        }
        let end = self.pending.iter().position(|&b| b == LINE_TERMINATOR)?;
        let raw: Vec<u8> = self.pending.drain(..=end).collect();
        Some(String::from_utf8_lossy(&raw[..end]).trim().to_owned())
    }
}
/// In-memory source for tests and deterministic playback. Each poll consumes
/// one entry; `None` entries model ticks where nothing arrived.
pub struct ManualLineSource {
    queue: VecDeque<Option<String>>,
}
impl ManualLineSource {
    pub fn new<I, S>(ticks: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            queue: ticks.into_iter().map(|t| t.map(Into::into)).collect(),
        }
    }
    /// Replays a captured sensor log, one non-empty line per tick.
    pub fn from_capture(text: &str) -> Self {
        Self::new(
            text.split(|c| c == '\r' || c == '\n')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(Some),
        )
    }
}
impl LineSource for ManualLineSource {
    fn poll_line(&mut self) -> Result<Option<String>, ThermalError> {
        Ok(self.queue.pop_front().flatten())
    }
    fn describe(&self) -> String {
        "manual".to_owned()
    }
}
