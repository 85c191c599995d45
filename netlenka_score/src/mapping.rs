// Voice mappers: classified symbols to pitches and velocities.
//
// Two independent pure mappings built on the classifier. The melody
// mapper produces a single pitch above the melody root; the harmony
// mapper produces a two-note chord above the harmony root, where the
// size of the stacked third encodes letter case: minor third for
// lowercase, major third for uppercase. Punctuation sits on its fixed
// offset with a semitone under-voice.
//
// Unrecognized symbols map to all zeros: a silent slot that still
// occupies one time step in the timeline.

use crate::config::ScoreConfig;
use crate::symbol::SymbolClass;

/// A single melody note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MelodyNote {
    pub pitch: u8,
    pub velocity: u8,
}

/// A two-note harmony chord. `lower` is also the bass voice's pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarmonyChord {
    pub lower: u8,
    pub upper: u8,
    pub velocity: u8,
}

/// Map a symbol to its melody note.
pub fn melody_note(symbol: SymbolClass, config: &ScoreConfig) -> MelodyNote {
    let root = config.melody_root() as i16;
    match symbol {
        SymbolClass::Lowercase { index } => MelodyNote {
            pitch: (root + index as i16) as u8,
            velocity: config.normal_velocity,
        },
        SymbolClass::Uppercase { index } => MelodyNote {
            pitch: (root + index as i16) as u8,
            velocity: config.high_velocity,
        },
        SymbolClass::Punctuation { offset } => MelodyNote {
            pitch: (root + offset as i16) as u8,
            velocity: config.low_velocity,
        },
        SymbolClass::Unrecognized => MelodyNote {
            pitch: 0,
            velocity: 0,
        },
    }
}

/// Map a symbol to its harmony chord.
pub fn harmony_chord(symbol: SymbolClass, config: &ScoreConfig) -> HarmonyChord {
    let root = config.root_note as i16;
    match symbol {
        SymbolClass::Lowercase { index } => {
            let lower = root + index as i16;
            HarmonyChord {
                lower: lower as u8,
                // Minor third on lowercase letters.
                upper: (lower + 3) as u8,
                velocity: config.high_velocity,
            }
        }
        SymbolClass::Uppercase { index } => {
            let lower = root + index as i16;
            HarmonyChord {
                lower: lower as u8,
                // Major third on uppercase letters.
                upper: (lower + 4) as u8,
                velocity: config.high_velocity,
            }
        }
        SymbolClass::Punctuation { offset } => {
            let lower = root + offset as i16;
            HarmonyChord {
                lower: lower as u8,
                // Semitone below for punctuation.
                upper: (lower - 1) as u8,
                velocity: config.low_velocity,
            }
        }
        SymbolClass::Unrecognized => HarmonyChord {
            lower: 0,
            upper: 0,
            velocity: 0,
        },
    }
}
