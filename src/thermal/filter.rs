use crate::thermal::record::Sample;
use crate::types::CELL_COUNT;
/// Smoothed 8x8 grid carried across frames. Starts at zero and only ever
/// absorbs finite readings.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredState {
    cells: [f32; CELL_COUNT],
}
impl Default for FilteredState {
    fn default() -> Self {
        Self {
            cells: [0.0; CELL_COUNT],
        }
    }
}
impl FilteredState {
    pub fn cells(&self) -> &[f32; CELL_COUNT] {
        &self.cells
    }
    #[cfg(test)]
    pub fn at(&self, col: usize, row: usize) -> f32 {
        self.cells[crate::types::cell_index(col, row)]
    }
    #[cfg(test)]
    pub fn from_cells(cells: [f32; CELL_COUNT]) -> Self {
        Self { cells }
    }
}
/// Per-cell exponential moving average; `alpha` is the weight on the new reading.
#[derive(Clone, Copy, Debug)]
pub struct TemporalFilter {
    alpha: f32,
}
impl TemporalFilter {
    pub fn new(alpha: f32) -> Self {
        Self { alpha }
    }
    /// Folds `sample` into `state` in place. Cells the sample marks invalid keep
    /// their previous value; results are held to the finite f32 range.
    pub fn update(&self, state: &mut FilteredState, sample: &Sample) {
        let keep = 1.0 - self.alpha;
        for ((cell, &raw), &valid) in state
            .cells
            .iter_mut()
            .zip(sample.values())
            .zip(sample.validity())
        {
            if valid {
                *cell = (self.alpha * raw + keep * *cell).clamp(f32::MIN, f32::MAX);
            }
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermal::record::parse_record;
    use crate::types::cell_index;
    fn uniform_line(v: f32) -> String {
        vec![v.to_string(); CELL_COUNT].join(",")
    }
    #[test]
    fn two_ticks_of_constant_input() {
        let filter = TemporalFilter::new(0.8);
        let mut state = FilteredState::default();
        let sample = parse_record(&uniform_line(25.0)).unwrap();
        filter.update(&mut state, &sample);
        for &c in state.cells() {
            assert!((c - 20.0).abs() < 1e-5);
        }
        filter.update(&mut state, &sample);
        for &c in state.cells() {
            assert!((c - 24.0).abs() < 1e-5);
        }
    }
    #[test]
    fn corrupted_cell_is_left_alone() {
        let filter = TemporalFilter::new(0.8);
        let mut state = FilteredState::default();
        filter.update(&mut state, &parse_record(&uniform_line(10.0)).unwrap());
        let before = state.clone();
        let mut tokens = vec!["30".to_owned(); CELL_COUNT];
        tokens[cell_index(3, 5)] = "oops".to_owned();
        filter.update(&mut state, &parse_record(&tokens.join(",")).unwrap());
        for i in 0..CELL_COUNT {
            if i == cell_index(3, 5) {
                assert_eq!(state.cells()[i], before.cells()[i]);
            } else {
                let expected = 0.8 * 30.0 + 0.2 * before.cells()[i];
                assert!((state.cells()[i] - expected).abs() < 1e-5);
            }
        }
        assert!((state.at(3, 5) - 8.0).abs() < 1e-5);
    }
    #[test]
    fn extreme_readings_stay_finite() {
        let filter = TemporalFilter::new(0.8);
        let mut state = FilteredState::from_cells([f32::MAX; CELL_COUNT]);
        let sample = parse_record(&vec![f32::MAX.to_string(); CELL_COUNT].join(",")).unwrap();
        for _ in 0..3 {
            filter.update(&mut state, &sample);
        }
        assert!(state.cells().iter().all(|c| c.is_finite()));
    }
    #[test]
    fn converges_without_reaching_target() {
        let filter = TemporalFilter::new(0.5);
        let mut state = FilteredState::default();
        let sample = parse_record(&uniform_line(16.0)).unwrap();
        let mut last_gap = f32::MAX;
        for _ in 0..10 {
            filter.update(&mut state, &sample);
            let gap = (state.at(0, 0) - 16.0).abs();
            assert!(gap < last_gap);
            assert!(gap > 0.0);
            last_gap = gap;
        }
    }
}
