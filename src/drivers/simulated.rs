use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::drivers::source::{LineAssembler, LineSource, LINE_TERMINATOR};
use crate::drivers::ThermalError;
use crate::types::{GRID_COLS, GRID_ROWS};
const AMBIENT: f32 = 22.0;
const HOT_SPOT_PEAK: f32 = 12.0;
const HOT_SPOT_RADIUS: f32 = 1.6;
const NOISE: f32 = 0.3;
const CORRUPT_CHANCE: f64 = 0.02;
/// Stand-in for the sensor when no hardware is attached: a warm spot circling
/// over a room-temperature background, with the odd garbled token.
pub struct SimulatedSensor {
    rng: StdRng,
    phase: f32,
    assembler: LineAssembler,
}
impl SimulatedSensor {
    pub fn new(line_threshold: usize) -> Self {
        Self::from_rng(StdRng::from_entropy(), line_threshold)
    }
    #[cfg(test)]
    pub fn with_seed(seed: u64, line_threshold: usize) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), line_threshold)
    }
    fn from_rng(rng: StdRng, line_threshold: usize) -> Self {
        Self {
            rng,
            phase: 0.0,
            assembler: LineAssembler::new(line_threshold),
        }
    }
    fn next_record(&mut self) -> String {
        self.phase += 0.15;
        let cx = 3.5 + 2.5 * self.phase.cos();
        let cy = 3.5 + 2.5 * self.phase.sin();
        let corrupt_at = if self.rng.gen_bool(CORRUPT_CHANCE) {
            Some(self.rng.gen_range(0..GRID_COLS * GRID_ROWS))
        } else {
            None
        };
        let mut tokens = Vec::with_capacity(GRID_COLS * GRID_ROWS);
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                if corrupt_at == Some(col + row * GRID_COLS) {
                    tokens.push("nan".to_owned());
                    continue;
                }
                let dx = col as f32 - cx;
                let dy = row as f32 - cy;
                let falloff = (-(dx * dx + dy * dy) / (2.0 * HOT_SPOT_RADIUS * HOT_SPOT_RADIUS)).exp();
                let noise = self.rng.gen_range(-NOISE..NOISE);
                tokens.push(format!("{:.2}", AMBIENT + HOT_SPOT_PEAK * falloff + noise));
            }
        }
        tokens.join(",")
    }
}
impl LineSource for SimulatedSensor {
    fn poll_line(&mut self) -> Result<Option<String>, ThermalError> {
        let mut bytes = self.next_record().into_bytes();
        bytes.push(LINE_TERMINATOR);
        self.assembler.push(&bytes);
        Ok(self.assembler.next_line())
    }
    fn describe(&self) -> String {
        "simulated sensor".to_owned()
    }
}
