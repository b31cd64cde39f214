// src/settings.rs
use std::fs;
use std::path::Path;
use serde::Deserialize;
use crate::drivers::ThermalError;
use crate::scheduler::MIN_FRAME_RATE_HZ;
use crate::thermal::{DisplayRange, HueGradient, OverlayStyle};
use crate::types::DisplayConfig;

/// Pipeline tunables. Every field is optional in the JSON file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Weight on the newest reading in the moving average.
    pub alpha: f32,
    pub fixed_min: f32,
    pub fixed_max: f32,
    pub hue_low: f32,
    pub hue_high: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub fill_alpha: f32,
    pub frame_rate_hz: f32,
    /// Bytes that must be buffered before a line is read.
    pub line_threshold: usize,
    pub auto_scale: bool,
    pub mirror: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            fixed_min: 20.0,
            fixed_max: 40.0,
            hue_low: 240.0,
            hue_high: 360.0,
            saturation: 1.0,
            brightness: 1.0,
            fill_alpha: 0.5,
            frame_rate_hz: 10.0,
            line_threshold: 64,
            auto_scale: true,
            mirror: false,
        }
    }
}

impl OverlaySettings {
    pub fn load(path: &Path) -> Result<Self, ThermalError> {
        let text = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ThermalError> {
        let bad = |msg: String| -> Result<(), ThermalError> { Err(ThermalError::InvalidSettings(msg)) };
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return bad(format!("alpha must be in (0, 1], got {}", self.alpha));
        }
        if !(self.fixed_min.is_finite() && self.fixed_max.is_finite()) || self.fixed_min > self.fixed_max {
            return bad(format!(
                "fixed range {}..{} is not an ordered pair of finite numbers",
                self.fixed_min, self.fixed_max
            ));
        }
        let hue_ok = |h: f32| (0.0..=360.0).contains(&h);
        if !hue_ok(self.hue_low) || !hue_ok(self.hue_high) || self.hue_low > self.hue_high {
            return bad(format!(
                "hue range {}..{} must be ordered and within 0..=360",
                self.hue_low, self.hue_high
            ));
        }
        for (name, v) in [
            ("saturation", self.saturation),
            ("brightness", self.brightness),
            ("fill_alpha", self.fill_alpha),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return bad(format!("{name} must be in 0..=1, got {v}"));
            }
        }
        if !(self.frame_rate_hz >= MIN_FRAME_RATE_HZ && self.frame_rate_hz.is_finite()) {
            return bad(format!(
                "frame_rate_hz must be at least {MIN_FRAME_RATE_HZ}, got {}",
                self.frame_rate_hz
            ));
        }
        Ok(())
    }

    pub fn fixed_range(&self) -> DisplayRange {
        DisplayRange::new(self.fixed_min, self.fixed_max)
    }

    pub fn gradient(&self) -> HueGradient {
        HueGradient {
            low: self.hue_low,
            high: self.hue_high,
        }
    }

    pub fn style(&self) -> OverlayStyle {
        OverlayStyle {
            saturation: self.saturation,
            brightness: self.brightness,
            alpha: self.fill_alpha,
        }
    }

    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            auto_scale: self.auto_scale,
            mirror: self.mirror,
        }
    }
}
