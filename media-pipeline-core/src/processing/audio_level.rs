use crate::models::audio_models::AudioLevelSnapshot;

/// Maps `abs_max / 1000` (0..=32) onto the 0..=9 level scale.
const LEVEL_PERMUTATION: [u8; 33] = [
    0, 1, 2, 3, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 6, 7, 7, 7, 7, 8, 8, 8, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9,
    9,
];

/// Number of blocks between level updates, minus one.
const UPDATE_FREQUENCY: u32 = 10;

/// Running microphone level meter.
///
/// Fed one block of samples at a time (normally 10 ms). The published level
/// is refreshed every 11th block from the loudest sample seen, after which
/// the running maximum decays by a factor of four.
#[derive(Debug, Clone, Default)]
pub struct AudioLevel {
    abs_max: u16,
    count: u32,
    current_level: u8,
    current_level_full_range: u16,
    total_energy: f64,
    total_duration: f64,
}

impl AudioLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one block of `duration_secs` worth of samples.
    pub fn compute_level(&mut self, samples: &[i16], muted: bool, duration_secs: f64) {
        let abs_value = if muted { 0 } else { max_abs_value(samples) };
        self.abs_max = self.abs_max.max(abs_value);

        if self.count == UPDATE_FREQUENCY {
            self.current_level_full_range = self.abs_max;
            self.count = 0;

            let mut position = (self.abs_max / 1000) as usize;
            // Keep quiet-but-present audio off the zero bar.
            if position == 0 && self.abs_max > 250 {
                position = 1;
            }
            self.current_level = LEVEL_PERMUTATION[position];
            self.abs_max >>= 2;
        } else {
            self.count += 1;
        }

        let additional = self.current_level_full_range as f64 / i16::MAX as f64;
        self.total_energy += additional * additional * duration_secs;
        self.total_duration += duration_secs;
    }

    pub fn level(&self) -> u8 {
        self.current_level
    }

    pub fn level_full_range(&self) -> u16 {
        self.current_level_full_range
    }

    pub fn snapshot(&self) -> AudioLevelSnapshot {
        AudioLevelSnapshot {
            level_full_range: self.current_level_full_range,
            level: self.current_level,
            total_energy: self.total_energy,
            total_duration: self.total_duration,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Largest absolute sample value, saturated to `i16::MAX`.
fn max_abs_value(samples: &[i16]) -> u16 {
    samples
        .iter()
        .map(|s| s.unsigned_abs().min(i16::MAX as u16))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BLOCK: f64 = 0.01;

    fn feed(level: &mut AudioLevel, value: i16, blocks: usize) {
        let samples = vec![value; 480];
        for _ in 0..blocks {
            level.compute_level(&samples, false, BLOCK);
        }
    }

    #[test]
    fn level_updates_on_eleventh_block() {
        let mut level = AudioLevel::new();
        feed(&mut level, 16000, 10);
        assert_eq!(level.level_full_range(), 0);
        assert_eq!(level.level(), 0);

        feed(&mut level, 16000, 1);
        assert_eq!(level.level_full_range(), 16000);
        assert_eq!(level.level(), LEVEL_PERMUTATION[16]);
    }

    #[test]
    fn full_scale_saturates() {
        let mut level = AudioLevel::new();
        feed(&mut level, i16::MIN, 11);
        assert_eq!(level.level_full_range(), 32767);
        assert_eq!(level.level(), 9);
    }

    #[test]
    fn quiet_audio_reaches_first_bar() {
        let mut level = AudioLevel::new();
        feed(&mut level, 300, 11);
        assert_eq!(level.level(), 1);

        let mut silent = AudioLevel::new();
        feed(&mut silent, 200, 11);
        assert_eq!(silent.level(), 0);
    }

    #[test]
    fn muted_blocks_count_as_silence() {
        let mut level = AudioLevel::new();
        let samples = vec![20000i16; 480];
        for _ in 0..11 {
            level.compute_level(&samples, true, BLOCK);
        }
        assert_eq!(level.level_full_range(), 0);
    }

    #[test]
    fn energy_and_duration_accumulate() {
        let mut level = AudioLevel::new();
        feed(&mut level, i16::MAX, 12);

        let snapshot = level.snapshot();
        assert_relative_eq!(snapshot.total_duration, 0.12, epsilon = 1e-9);
        // Only the 11th and 12th blocks carry the published full-scale level.
        assert_relative_eq!(snapshot.total_energy, 0.02, epsilon = 1e-9);

        level.clear();
        assert_eq!(level.snapshot(), AudioLevelSnapshot::default());
    }
}
