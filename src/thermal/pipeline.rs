use crate::settings::OverlaySettings;
use crate::thermal::color::{HueGradient, HueGrid};
use crate::thermal::filter::{FilteredState, TemporalFilter};
use crate::thermal::range::{estimate_range, DisplayRange, RangeMode};
use crate::thermal::record::parse_record;
use crate::types::{DisplayConfig, Toggle};
/// What happened to the line offered on a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Nothing arrived; previous state and range are reused.
    Starved,
    /// A line arrived but held no usable reading.
    Rejected,
    Accepted { valid_cells: usize },
}
/// Everything that persists from one frame to the next: smoothed grid, last
/// display range and the user toggles.
pub struct ThermalPipeline {
    filter: TemporalFilter,
    fixed_range: DisplayRange,
    gradient: HueGradient,
    state: FilteredState,
    range: DisplayRange,
    config: DisplayConfig,
    range_stale: bool,
}
impl ThermalPipeline {
    pub fn new(settings: &OverlaySettings) -> Self {
        let mut pipeline = Self {
            filter: TemporalFilter::new(settings.alpha),
            fixed_range: settings.fixed_range(),
            gradient: settings.gradient(),
            state: FilteredState::default(),
            range: settings.fixed_range(),
            config: settings.display_config(),
            range_stale: false,
        };
        pipeline.range = estimate_range(&pipeline.state, pipeline.range_mode());
        pipeline
    }
    pub fn config(&self) -> DisplayConfig {
        self.config
    }
    #[cfg(test)]
    pub fn state(&self) -> &FilteredState {
        &self.state
    }
    pub fn range(&self) -> DisplayRange {
        self.range
    }
    /// Applies a key toggle and returns its status message. A scale change
    /// forces the range to be recomputed on the next tick even without new data.
    pub fn toggle(&mut self, toggle: Toggle) -> String {
        let message = self.config.apply(toggle);
        if toggle == Toggle::AutoScale {
            self.range_stale = true;
        }
        message
    }
    /// Parser -> filter -> range estimator for one tick.
    pub fn ingest(&mut self, line: Option<&str>) -> IngestOutcome {
        let outcome = match line.map(parse_record) {
            None => IngestOutcome::Starved,
            Some(None) => IngestOutcome::Rejected,
            Some(Some(sample)) => {
                self.filter.update(&mut self.state, &sample);
                self.range_stale = true;
                IngestOutcome::Accepted {
                    valid_cells: sample.valid_count(),
                }
            }
        };
        if self.range_stale {
            self.range = estimate_range(&self.state, self.range_mode());
            self.range_stale = false;
        }
        outcome
    }
    pub fn hue_grid(&self) -> HueGrid {
        HueGrid::from_state(&self.state, self.range, self.gradient)
    }
    fn range_mode(&self) -> RangeMode {
        if self.config.auto_scale {
            RangeMode::Adaptive
        } else {
            RangeMode::Fixed(self.fixed_range)
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CELL_COUNT;
    fn line_with(f: impl Fn(usize) -> f32) -> String {
        (0..CELL_COUNT)
            .map(|i| f(i).to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
    fn fixed_settings() -> OverlaySettings {
        OverlaySettings {
            auto_scale: false,
            ..Default::default()
        }
    }
    #[test]
    fn uniform_twenty_five_end_to_end() {
        let mut p = ThermalPipeline::new(&OverlaySettings::default());
        let line = line_with(|_| 25.0);
        assert_eq!(
            p.ingest(Some(&line)),
            IngestOutcome::Accepted { valid_cells: 64 }
        );
        assert!(p.state().cells().iter().all(|&c| (c - 20.0).abs() < 1e-5));
        p.ingest(Some(&line));
        assert!(p.state().cells().iter().all(|&c| (c - 24.0).abs() < 1e-5));
        // Uniform field: adaptive range collapses and every cell takes the fallback hue.
        assert_eq!(p.range().span(), 0.0);
        assert!(p.hue_grid().hues().iter().all(|&h| h == 240.0));
    }
    #[test]
    fn starvation_reuses_state_and_range() {
        let mut p = ThermalPipeline::new(&OverlaySettings::default());
        p.ingest(Some(&line_with(|i| 20.0 + i as f32 * 0.1)));
        let state = p.state().clone();
        let range = p.range();
        assert_eq!(p.ingest(None), IngestOutcome::Starved);
        assert_eq!(p.state(), &state);
        assert_eq!(p.range(), range);
    }
    #[test]
    fn garbage_line_is_rejected_without_touching_state() {
        let mut p = ThermalPipeline::new(&OverlaySettings::default());
        p.ingest(Some(&line_with(|_| 30.0)));
        let state = p.state().clone();
        assert_eq!(p.ingest(Some("#### sensor reset ####")), IngestOutcome::Rejected);
        assert_eq!(p.state(), &state);
    }
    #[test]
    fn record_fragment_does_not_shift_into_other_cells() {
        let mut p = ThermalPipeline::new(&fixed_settings());
        let full = line_with(|i| if i < 60 { 25.0 } else { 99.0 });
        p.ingest(Some(&full));
        let state = p.state().clone();
        let range = p.range();
        // Tail of the same record, starting mid-number.
        assert_eq!(p.ingest(Some("9,99,99,99")), IngestOutcome::Rejected);
        assert_eq!(p.state(), &state);
        assert_eq!(p.range(), range);
        assert!((p.state().cells()[0] - 20.0).abs() < 1e-5);
        assert!((p.state().cells()[60] - 79.2).abs() < 1e-3);
    }
    #[test]
    fn extreme_readings_keep_hues_in_gradient() {
        let mut p = ThermalPipeline::new(&OverlaySettings::default());
        let line = line_with(|i| if i == 0 { 3.4e38 } else { -3.4e38 });
        for _ in 0..2 {
            assert_eq!(
                p.ingest(Some(&line)),
                IngestOutcome::Accepted { valid_cells: 64 }
            );
        }
        assert!(p.range().min.is_finite() && p.range().max.is_finite());
        assert!(p.state().cells().iter().all(|c| c.is_finite()));
        let grid = p.hue_grid();
        assert!(grid.hues().iter().all(|&h| (240.0..=360.0).contains(&h)));
        assert_eq!(grid.get(0, 0), 360.0);
        assert!(grid.get(1, 0) < 360.0);
    }
    #[test]
    fn fixed_mode_uses_configured_bounds() {
        let mut p = ThermalPipeline::new(&fixed_settings());
        p.ingest(Some(&line_with(|i| if i == 0 { 75.0 } else { 37.5 })));
        assert_eq!(p.range(), DisplayRange::new(20.0, 40.0));
        let grid = p.hue_grid();
        // 0.8 * 75 = 60 -> clamped to the top; 0.8 * 37.5 = 30 -> midpoint.
        assert_eq!(grid.get(0, 0), 360.0);
        assert!((grid.get(1, 0) - 300.0).abs() < 1e-3);
    }
    #[test]
    fn scale_toggle_applies_on_next_tick_without_new_data() {
        let mut p = ThermalPipeline::new(&fixed_settings());
        p.ingest(Some(&line_with(|i| if i < 32 { 10.0 } else { 20.0 })));
        assert_eq!(p.range(), DisplayRange::new(20.0, 40.0));
        assert_eq!(p.toggle(Toggle::AutoScale), "Auto scale ON");
        assert_eq!(p.range(), DisplayRange::new(20.0, 40.0));
        p.ingest(None);
        // State is 8/16 split: mean 12, stdev 4.
        assert!((p.range().min - 8.0).abs() < 1e-4);
        assert!((p.range().max - 16.0).abs() < 1e-4);
    }
    #[test]
    fn mirror_toggle_leaves_range_alone() {
        let mut p = ThermalPipeline::new(&OverlaySettings::default());
        let before = p.range();
        assert_eq!(p.toggle(Toggle::Mirror), "Mirror ON");
        assert!(p.config().mirror);
        assert_eq!(p.range(), before);
    }
}
