// Conversion configuration.
//
// All tunable parameters live in `ScoreConfig`: the root pitches the
// mappers offset from, the three velocity levels, the fixed tempo, and
// the drum note map. The mappers and timeline builders read from the
// config instead of using magic numbers, and the struct is immutable
// once built: construct it at startup (defaults or JSON file), apply
// any overrides, validate, then pass it by reference everywhere.
//
// `validate()` is the explicit answer to pitch-range handling: the core
// never clamps or wraps a computed pitch, so a root that could push any
// reachable pitch outside 0..=127 is rejected up front.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interval in semitones between the harmony root and the melody root.
pub const MELODY_ROOT_INTERVAL: u8 = 33;

/// Ticks per quarter note in the event timeline.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Ticks per eighth note (half a quarter note).
pub const TICKS_PER_EIGHTH: u32 = TICKS_PER_QUARTER as u32 / 2;

/// Largest upward offset any symbol can add to the melody root
/// (`?` maps to +40). Lowest is −5: `,` in harmony, minus one for the
/// chord's under-voice.
const MAX_UPWARD_OFFSET: i32 = 40;
const MAX_DOWNWARD_OFFSET: i32 = 5;

/// Immutable conversion parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Root pitch for harmony and bass (MIDI note number).
    pub root_note: u8,
    /// Velocity for accented notes: uppercase melody, letter chords, drums.
    pub high_velocity: u8,
    /// Velocity for ordinary melody notes (lowercase letters).
    pub normal_velocity: u8,
    /// Velocity for punctuation notes.
    pub low_velocity: u8,
    /// Fixed tempo in quarter notes per minute.
    pub tempo_bpm: u16,
    /// Lowest note of the General MIDI percussion map.
    pub drum_note_lowest: u8,
    /// Drum pitch offset selected by a 0 bit.
    pub drum_zero_offset: u8,
    /// Drum pitch offset selected by any other bit.
    pub drum_one_offset: u8,
    /// Instrument name written into each voice track's preamble.
    pub instrument: String,
    /// General MIDI program number for the voice tracks.
    pub program: u8,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            root_note: 42,
            high_velocity: 127,
            normal_velocity: 100,
            low_velocity: 60,
            tempo_bpm: 120,
            drum_note_lowest: 35,
            drum_zero_offset: 1,
            drum_one_offset: 3,
            instrument: "Acoustic Grand Piano".to_string(),
            program: 1,
        }
    }
}

impl ScoreConfig {
    /// The melody voice's root pitch, a fixed interval above the
    /// harmony root.
    pub fn melody_root(&self) -> u8 {
        self.root_note + MELODY_ROOT_INTERVAL
    }

    /// Load a config from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config: ScoreConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every pitch reachable from this config stays within
    /// the MIDI range 0..=127, and that velocities, program, and tempo
    /// are representable. Returns a description of the first violation.
    pub fn validate(&self) -> Result<(), String> {
        let root = self.root_note as i32;
        let melody_root = root + MELODY_ROOT_INTERVAL as i32;

        if root - MAX_DOWNWARD_OFFSET < 0 {
            return Err(format!(
                "root_note {} too low: ',' reaches pitch {}",
                self.root_note,
                root - MAX_DOWNWARD_OFFSET
            ));
        }
        if melody_root + MAX_UPWARD_OFFSET > 127 {
            return Err(format!(
                "root_note {} too high: '?' reaches melody pitch {}",
                self.root_note,
                melody_root + MAX_UPWARD_OFFSET
            ));
        }
        let drum_top =
            self.drum_note_lowest as i32 + self.drum_zero_offset.max(self.drum_one_offset) as i32;
        if drum_top > 127 {
            return Err(format!("drum pitches reach {drum_top}, above 127"));
        }
        for (name, v) in [
            ("high_velocity", self.high_velocity),
            ("normal_velocity", self.normal_velocity),
            ("low_velocity", self.low_velocity),
            ("program", self.program),
        ] {
            if v > 127 {
                return Err(format!("{name} is {v}, above 127"));
            }
        }
        if self.tempo_bpm == 0 {
            return Err("tempo_bpm must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScoreConfig::default();
        assert_eq!(config.root_note, 42);
        assert_eq!(config.melody_root(), 75);
        assert_eq!(config.tempo_bpm, 120);
        assert_eq!(config.drum_note_lowest, 35);
        config.validate().expect("defaults must validate");
    }

    #[test]
    fn test_validate_root_bounds() {
        // Valid range for the root: 5..=54. ',' reaches root - 5 on the
        // chord under-voice; '?' reaches melody_root + 40.
        let mut config = ScoreConfig {
            root_note: 5,
            ..ScoreConfig::default()
        };
        assert!(config.validate().is_ok());
        config.root_note = 54;
        assert!(config.validate().is_ok());
        config.root_note = 4;
        assert!(config.validate().is_err());
        config.root_note = 55;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_velocity_and_tempo() {
        let config = ScoreConfig {
            normal_velocity: 128,
            ..ScoreConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ScoreConfig {
            tempo_bpm: 0,
            ..ScoreConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = ScoreConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ScoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.root_note, config.root_note);
        assert_eq!(back.instrument, config.instrument);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        // serde(default) lets a config file override only what it cares about.
        let config: ScoreConfig = serde_json::from_str(r#"{"root_note": 48}"#).unwrap();
        assert_eq!(config.root_note, 48);
        assert_eq!(config.tempo_bpm, 120);
        assert_eq!(config.high_velocity, 127);
    }
}
