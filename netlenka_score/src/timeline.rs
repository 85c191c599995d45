// Track timeline construction: symbols to delta-timed note events.
//
// Each voice is one sequential pass over its input stream. Every event
// carries a delta (ticks since the previous event on the same track,
// never absolute time), so events that sound together differ only in
// that the later ones carry delta 0. The harmony voice is where this
// matters most: each chord step is on(lower, 0), on(upper, 0),
// off(lower, quarter), off(upper, 0), so both notes start together and
// stop together, and the step advances time exactly once.
//
// The four voices share no state and can be built in any order; the
// `Piece` struct composes them and fixes the persisted track order.

use crate::config::{ScoreConfig, TICKS_PER_EIGHTH, TICKS_PER_QUARTER};
use crate::mapping::{harmony_chord, melody_note};
use crate::symbol::classify;

/// The four output voices, in persisted track order (after the meta track).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Voice {
    Drums = 0,
    Melody = 1,
    Harmony = 2,
    Bass = 3,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Drums, Voice::Melody, Voice::Harmony, Voice::Bass];

    pub fn index(self) -> usize {
        self as usize
    }

    /// MIDI channel the voice's note events are sent on. Drum hits go
    /// out on channel 10; the pitched voices share channel 0.
    pub fn channel(self) -> u8 {
        match self {
            Voice::Drums => 10,
            _ => 0,
        }
    }
}

/// Whether an event starts or ends a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEventKind {
    On,
    Off,
}

/// One timed note event.
///
/// `delta` is in ticks since the previous event on the same track. The
/// note-off carries the same velocity as its note-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub delta: u32,
    pub kind: NoteEventKind,
    pub channel: u8,
    pub pitch: u8,
    pub velocity: u8,
}

/// The complete ordered event list for one voice.
#[derive(Debug, Clone)]
pub struct VoiceTimeline {
    pub voice: Voice,
    pub events: Vec<NoteEvent>,
}

impl VoiceTimeline {
    fn new(voice: Voice) -> Self {
        VoiceTimeline {
            voice,
            events: Vec::new(),
        }
    }

    fn push(&mut self, kind: NoteEventKind, delta: u32, pitch: u8, velocity: u8) {
        self.events.push(NoteEvent {
            delta,
            kind,
            channel: self.voice.channel(),
            pitch,
            velocity,
        });
    }

    /// Number of note-on events: one per input symbol for melody and
    /// drums, two per symbol for harmony.
    pub fn note_on_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == NoteEventKind::On)
            .count()
    }

    /// Total track length in ticks (the sum of all deltas).
    pub fn total_ticks(&self) -> u32 {
        self.events.iter().map(|e| e.delta).sum()
    }

    /// Track length in seconds at the given tempo.
    pub fn duration_seconds(&self, tempo_bpm: u16) -> f64 {
        let quarters = self.total_ticks() as f64 / TICKS_PER_QUARTER as f64;
        quarters * 60.0 / tempo_bpm as f64
    }
}

/// Build the drum timeline from a bit stream: one eighth-note step per
/// bit, a 0 bit on the low drum and any other bit on the high drum.
pub fn drum_timeline(bits: &[bool], config: &ScoreConfig) -> VoiceTimeline {
    let mut timeline = VoiceTimeline::new(Voice::Drums);
    for &bit in bits {
        let offset = if bit {
            config.drum_one_offset
        } else {
            config.drum_zero_offset
        };
        let pitch = config.drum_note_lowest + offset;
        timeline.push(NoteEventKind::On, 0, pitch, config.high_velocity);
        timeline.push(NoteEventKind::Off, TICKS_PER_EIGHTH, pitch, config.high_velocity);
    }
    timeline
}

/// Build the melody timeline: one eighth-note step per character.
pub fn melody_timeline(text: &str, config: &ScoreConfig) -> VoiceTimeline {
    let mut timeline = VoiceTimeline::new(Voice::Melody);
    for c in text.chars() {
        let note = melody_note(classify(c), config);
        timeline.push(NoteEventKind::On, 0, note.pitch, note.velocity);
        timeline.push(NoteEventKind::Off, TICKS_PER_EIGHTH, note.pitch, note.velocity);
    }
    timeline
}

/// Build the harmony timeline: one quarter-note chord step per character.
///
/// Both chord notes start at the step boundary and stop a quarter note
/// later; only the lower note's off event advances time.
pub fn harmony_timeline(text: &str, config: &ScoreConfig) -> VoiceTimeline {
    let mut timeline = VoiceTimeline::new(Voice::Harmony);
    for c in text.chars() {
        let chord = harmony_chord(classify(c), config);
        timeline.push(NoteEventKind::On, 0, chord.lower, chord.velocity);
        timeline.push(NoteEventKind::On, 0, chord.upper, chord.velocity);
        timeline.push(
            NoteEventKind::Off,
            TICKS_PER_QUARTER as u32,
            chord.lower,
            chord.velocity,
        );
        timeline.push(NoteEventKind::Off, 0, chord.upper, chord.velocity);
    }
    timeline
}

/// Build the bass timeline from the harmony input: the chord's lower
/// voice only, one quarter-note step per character.
pub fn bass_timeline(text: &str, config: &ScoreConfig) -> VoiceTimeline {
    let mut timeline = VoiceTimeline::new(Voice::Bass);
    for c in text.chars() {
        let chord = harmony_chord(classify(c), config);
        timeline.push(NoteEventKind::On, 0, chord.lower, chord.velocity);
        timeline.push(
            NoteEventKind::Off,
            TICKS_PER_QUARTER as u32,
            chord.lower,
            chord.velocity,
        );
    }
    timeline
}

/// All four voice timelines for one piece, in track order.
#[derive(Debug, Clone)]
pub struct Piece {
    pub drums: VoiceTimeline,
    pub melody: VoiceTimeline,
    pub harmony: VoiceTimeline,
    pub bass: VoiceTimeline,
}

impl Piece {
    /// Build all four timelines from the three input parts. Harmony and
    /// bass read the same text; bass keeps only the chord's lower voice.
    pub fn from_parts(
        drum_bits: &[bool],
        melody_text: &str,
        harmony_text: &str,
        config: &ScoreConfig,
    ) -> Self {
        Piece {
            drums: drum_timeline(drum_bits, config),
            melody: melody_timeline(melody_text, config),
            harmony: harmony_timeline(harmony_text, config),
            bass: bass_timeline(harmony_text, config),
        }
    }

    /// The timelines in persisted track order.
    pub fn timelines(&self) -> [&VoiceTimeline; 4] {
        [&self.drums, &self.melody, &self.harmony, &self.bass]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deltas(timeline: &VoiceTimeline) -> Vec<u32> {
        timeline.events.iter().map(|e| e.delta).collect()
    }

    #[test]
    fn test_drum_bits_alternate_pitches() {
        let config = ScoreConfig::default();
        let timeline = drum_timeline(&[false, true, false, true], &config);

        assert_eq!(timeline.events.len(), 8);
        assert_eq!(timeline.note_on_count(), 4);

        let low = config.drum_note_lowest + config.drum_zero_offset;
        let high = config.drum_note_lowest + config.drum_one_offset;
        let on_pitches: Vec<u8> = timeline
            .events
            .iter()
            .filter(|e| e.kind == NoteEventKind::On)
            .map(|e| e.pitch)
            .collect();
        assert_eq!(on_pitches, vec![low, high, low, high]);

        // On at the step boundary, off an eighth note later, back to back.
        assert_eq!(
            deltas(&timeline),
            vec![0, 240, 0, 240, 0, 240, 0, 240],
        );
        assert_eq!(timeline.total_ticks(), 4 * TICKS_PER_EIGHTH);
        for event in &timeline.events {
            assert_eq!(event.channel, 10);
        }
    }

    #[test]
    fn test_melody_one_step_per_char() {
        let config = ScoreConfig::default();
        let timeline = melody_timeline("abc", &config);
        assert_eq!(timeline.note_on_count(), 3);
        assert_eq!(timeline.total_ticks(), 3 * TICKS_PER_EIGHTH);
        assert_eq!(timeline.events[0].pitch, config.melody_root() + 1);
        assert_eq!(timeline.events[0].velocity, config.normal_velocity);
    }

    #[test]
    fn test_harmony_delta_chaining() {
        let config = ScoreConfig::default();
        let timeline = harmony_timeline("aA", &config);

        // Per step: on(lower, 0), on(upper, 0), off(lower, Q), off(upper, 0).
        let q = TICKS_PER_QUARTER as u32;
        assert_eq!(deltas(&timeline), vec![0, 0, q, 0, 0, 0, q, 0]);

        let root = config.root_note;
        let pitches: Vec<u8> = timeline.events.iter().map(|e| e.pitch).collect();
        assert_eq!(
            pitches,
            vec![
                root + 1,
                root + 1 + 3, // minor third on 'a'
                root + 1,
                root + 1 + 3,
                root + 1,
                root + 1 + 4, // major third on 'A'
                root + 1,
                root + 1 + 4,
            ]
        );

        // Every on is later matched by exactly one off for that pitch.
        assert_eq!(timeline.note_on_count() * 2, timeline.events.len());
    }

    #[test]
    fn test_bass_is_harmony_lower_voice() {
        let config = ScoreConfig::default();
        let text = "aZ,x!";
        let harmony = harmony_timeline(text, &config);
        let bass = bass_timeline(text, &config);

        let harmony_lower: Vec<u8> = harmony
            .events
            .iter()
            .filter(|e| e.kind == NoteEventKind::On)
            .step_by(2)
            .map(|e| e.pitch)
            .collect();
        let bass_pitches: Vec<u8> = bass
            .events
            .iter()
            .filter(|e| e.kind == NoteEventKind::On)
            .map(|e| e.pitch)
            .collect();
        assert_eq!(bass_pitches, harmony_lower);

        // Same step length, so the two tracks stay in lockstep.
        assert_eq!(bass.total_ticks(), harmony.total_ticks());
    }

    #[test]
    fn test_unrecognized_keeps_step_alignment() {
        let config = ScoreConfig::default();
        let timeline = melody_timeline("a1b", &config);

        // The digit still gets a full silent step.
        assert_eq!(timeline.note_on_count(), 3);
        assert_eq!(timeline.total_ticks(), 3 * TICKS_PER_EIGHTH);
        let silent = &timeline.events[2];
        assert_eq!((silent.pitch, silent.velocity), (0, 0));
        assert_eq!(silent.kind, NoteEventKind::On);
    }

    #[test]
    fn test_empty_inputs_produce_empty_timelines() {
        let config = ScoreConfig::default();
        assert!(drum_timeline(&[], &config).events.is_empty());
        assert!(melody_timeline("", &config).events.is_empty());
        assert!(harmony_timeline("", &config).events.is_empty());
        assert!(bass_timeline("", &config).events.is_empty());
    }

    #[test]
    fn test_piece_track_order() {
        let config = ScoreConfig::default();
        let piece = Piece::from_parts(&[true], "a", "b", &config);
        let order: Vec<Voice> = piece.timelines().iter().map(|t| t.voice).collect();
        assert_eq!(order, Voice::ALL.to_vec());
    }

    #[test]
    fn test_duration_seconds() {
        let config = ScoreConfig::default();
        // 8 eighth-note steps = 4 quarter notes = 2 seconds at 120 BPM.
        let timeline = melody_timeline("abcdefgh", &config);
        let seconds = timeline.duration_seconds(config.tempo_bpm);
        assert!((seconds - 2.0).abs() < 1e-9);
    }
}
