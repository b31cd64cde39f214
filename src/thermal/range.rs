use crate::thermal::filter::FilteredState;
use crate::types::CELL_COUNT;
/// Display bounds used to normalize the grid, in sensor units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRange {
    pub min: f32,
    pub max: f32,
}
impl DisplayRange {
    /// Builds a range, swapping the bounds if they arrive reversed.
    pub fn new(a: f32, b: f32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }
    #[cfg(test)]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeMode {
    /// Constant physical bounds.
    Fixed(DisplayRange),
    /// Mean +/- one population standard deviation of the current grid.
    Adaptive,
}
pub fn estimate_range(state: &FilteredState, mode: RangeMode) -> DisplayRange {
    match mode {
        RangeMode::Fixed(range) => range,
        RangeMode::Adaptive => {
            let (mean, stdev) = mean_and_stdev(state.cells());
            DisplayRange::new(saturate(mean - stdev), saturate(mean + stdev))
        }
    }
}
/// Narrows to f32 without overflowing to infinity.
fn saturate(v: f64) -> f32 {
    v.clamp(f32::MIN as f64, f32::MAX as f64) as f32
}
/// Population statistics, accumulated in f64.
fn mean_and_stdev(cells: &[f32; CELL_COUNT]) -> (f64, f64) {
    let n = cells.len() as f64;
    let mean = cells.iter().map(|&c| c as f64).sum::<f64>() / n;
    let variance = cells
        .iter()
        .map(|&c| {
            let delta = c as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}
