use crate::types::CELL_COUNT;
/// One parsed sensor record: 64 readings, row-major over the 8x8 grid, plus
/// which of them actually parsed to a finite number.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    values: [f32; CELL_COUNT],
    valid: [bool; CELL_COUNT],
}
impl Sample {
    pub fn values(&self) -> &[f32; CELL_COUNT] {
        &self.values
    }
    pub fn validity(&self) -> &[bool; CELL_COUNT] {
        &self.valid
    }
    /// Reading for `index` if that token was usable.
    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<f32> {
        match self.valid.get(index) {
            Some(true) => Some(self.values[index]),
            _ => None,
        }
    }
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }
}
/// Parses one record line. A bad token only marks its own cell invalid.
/// A line without exactly `CELL_COUNT` tokens cannot be placed on the grid
/// (typically a record cut in half when the port opens mid-stream), so it
/// yields `None`, as does a line where nothing was usable.
pub fn parse_record(line: &str) -> Option<Sample> {
    let token_count = line.split(',').count();
    if token_count != CELL_COUNT {
        log::debug!("record has {token_count} tokens, expected {CELL_COUNT}");
        return None;
    }
    let mut values = [0.0f32; CELL_COUNT];
    let mut valid = [false; CELL_COUNT];
    for (index, token) in line.split(',').enumerate() {
        if let Ok(v) = token.trim().parse::<f32>() {
            if v.is_finite() {
                values[index] = v;
                valid[index] = true;
            }
        }
    }
    let sample = Sample { values, valid };
    if sample.valid_count() == 0 {
        log::debug!("record has no usable readings: {line:?}");
        return None;
    }
    Some(sample)
}
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    fn line_of(values: &[f32]) -> String {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
    #[test]
    fn parses_full_record() {
        let values: Vec<f32> = (0..64).map(|i| 20.0 + i as f32 * 0.25).collect();
        let sample = parse_record(&line_of(&values)).unwrap();
        assert_eq!(sample.valid_count(), 64);
        assert_eq!(&sample.values()[..], &values[..]);
    }
    #[test]
    fn bad_token_marks_only_that_cell() {
        let mut tokens = vec!["25.0".to_owned(); 64];
        tokens[10] = "2x.5".to_owned();
        tokens[11] = "nan".to_owned();
        tokens[12] = "inf".to_owned();
        let sample = parse_record(&tokens.join(",")).unwrap();
        assert_eq!(sample.valid_count(), 61);
        assert_eq!(sample.get(10), None);
        assert_eq!(sample.get(11), None);
        assert_eq!(sample.get(12), None);
        assert_eq!(sample.get(13), Some(25.0));
    }
    #[test]
    fn record_tail_is_not_placed_on_the_grid() {
        // The end of a record cut off when the port opened mid-stream.
        assert!(parse_record("9,99,99,99").is_none());
        assert!(parse_record("1,2,3").is_none());
        let short = vec!["25"; CELL_COUNT - 1].join(",");
        assert!(parse_record(&short).is_none());
    }
    #[test]
    fn long_line_is_rejected() {
        // Two records glued together by a lost terminator.
        let line = vec!["1"; 70].join(",");
        assert!(parse_record(&line).is_none());
    }
    #[test]
    fn whitespace_around_tokens_is_tolerated() {
        let mut tokens = vec![" 22 ".to_owned(); CELL_COUNT];
        tokens[0] = "\n 21.5 ".to_owned();
        let sample = parse_record(&tokens.join(",")).unwrap();
        assert_eq!(sample.valid_count(), CELL_COUNT);
        assert_eq!(sample.get(0), Some(21.5));
        assert_eq!(sample.get(1), Some(22.0));
    }
    #[test]
    fn garbage_line_is_no_sample() {
        assert!(parse_record("").is_none());
        assert!(parse_record("hello,world").is_none());
        assert!(parse_record(&vec!["--"; CELL_COUNT].join(",")).is_none());
    }
    proptest! {
        #[test]
        fn round_trips_any_finite_record(values in prop::collection::vec(-100.0f32..200.0, 64)) {
            let sample = parse_record(&line_of(&values)).unwrap();
            prop_assert_eq!(sample.valid_count(), 64);
            prop_assert_eq!(&sample.values()[..], &values[..]);
        }
    }
}
