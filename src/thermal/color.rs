use eframe::egui::ecolor::Hsva;
use eframe::egui::Color32;
use crate::thermal::filter::FilteredState;
use crate::thermal::range::DisplayRange;
use crate::types::{cell_index, CELL_COUNT};
/// Hue interval (degrees) the normalized readings are spread across.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HueGradient {
    pub low: f32,
    pub high: f32,
}
impl Default for HueGradient {
    fn default() -> Self {
        // blue -> magenta -> red
        Self {
            low: 240.0,
            high: 360.0,
        }
    }
}
impl HueGradient {
    /// Linear map of `value` from `range` onto the gradient, clamped to its ends.
    /// A collapsed range, or one too wide to normalize against, maps to `low`.
    pub fn hue_for(&self, value: f32, range: DisplayRange) -> f32 {
        // f64 keeps the span finite for any pair of finite f32 bounds.
        let span = range.max as f64 - range.min as f64;
        if !(span > 0.0) {
            return self.low;
        }
        let t = (value as f64 - range.min as f64) / span;
        if !t.is_finite() {
            return self.low;
        }
        let t = t.clamp(0.0, 1.0) as f32;
        self.low + t * (self.high - self.low)
    }
}
/// Hues for every sensor cell, row-major like the sensor.
#[derive(Clone, Debug, PartialEq)]
pub struct HueGrid {
    hues: [f32; CELL_COUNT],
}
impl HueGrid {
    pub fn from_state(state: &FilteredState, range: DisplayRange, gradient: HueGradient) -> Self {
        let mut hues = [gradient.low; CELL_COUNT];
        for (hue, &value) in hues.iter_mut().zip(state.cells()) {
            *hue = gradient.hue_for(value, range);
        }
        Self { hues }
    }
    #[cfg(test)]
    pub fn uniform(hue: f32) -> Self {
        Self {
            hues: [hue; CELL_COUNT],
        }
    }
    pub fn get(&self, col: usize, row: usize) -> f32 {
        self.hues[cell_index(col, row)]
    }
    #[cfg(test)]
    pub fn set(&mut self, col: usize, row: usize, hue: f32) {
        assert!(col < crate::types::GRID_COLS && row < crate::types::GRID_ROWS);
        self.hues[cell_index(col, row)] = hue;
    }
    #[cfg(test)]
    pub fn hues(&self) -> &[f32; CELL_COUNT] {
        &self.hues
    }
}
/// Saturation, brightness and fill alpha shared by every overlay cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}
impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            brightness: 1.0,
            alpha: 0.5,
        }
    }
}
impl OverlayStyle {
    pub fn color(&self, hue_degrees: f32) -> Color32 {
        let h = (hue_degrees / 360.0).rem_euclid(1.0);
        Hsva::new(h, self.saturation, self.brightness, self.alpha).into()
    }
}
