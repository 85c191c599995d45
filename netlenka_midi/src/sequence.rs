// Sequence assembly: voice timelines to a Standard MIDI File.
//
// Builds an SMF Format 1 (multi-track) file with the `midly` crate:
// track 0 carries the tempo and sequence name, then the four voice
// tracks follow in fixed order (drums, melody, harmony, bass). Each
// voice track opens with a name, an instrument name, a volume
// controller, and a program change before its note events. The note
// deltas come straight from the timelines; no timing decisions are
// made here.
//
// The file is serialized fully in memory and written with a single
// `std::fs::write`, so an encoding failure can never leave a truncated
// file behind.

use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use netlenka_score::config::{ScoreConfig, TICKS_PER_QUARTER};
use netlenka_score::timeline::{NoteEventKind, Piece, VoiceTimeline};
use std::path::Path;

/// Sequence name written into the meta track.
const SEQUENCE_NAME: &str = "GeneratedEvents";

/// MIDI controller number for channel volume.
const CC_VOLUME: u8 = 7;

/// Track names in voice order.
const TRACK_NAMES: [&str; 4] = ["DRUMS", "Melody", "Harmony", "Bass"];

/// Assemble a piece and write it to a file.
pub fn write_midi(
    piece: &Piece,
    config: &ScoreConfig,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let smf = assemble(piece, config);
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Assemble a piece into an in-memory SMF. The returned file borrows
/// the instrument name from the config.
pub fn assemble<'a>(piece: &Piece, config: &'a ScoreConfig) -> Smf<'a> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    smf.tracks.push(meta_track(config));
    for (timeline, name) in piece.timelines().into_iter().zip(TRACK_NAMES) {
        smf.tracks.push(voice_track(timeline, name, config));
    }

    smf
}

/// Track 0: fixed tempo and the sequence name.
fn meta_track(config: &ScoreConfig) -> Track<'static> {
    let mut track: Track<'static> = Vec::new();
    let tempo_microseconds = 60_000_000 / config.tempo_bpm as u32;
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(SEQUENCE_NAME.as_bytes())),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    track
}

/// One voice track: preamble events, then the timeline's note events.
fn voice_track<'a>(
    timeline: &VoiceTimeline,
    name: &'static str,
    config: &'a ScoreConfig,
) -> Track<'a> {
    let mut track: Track<'a> = Vec::new();

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::InstrumentName(config.instrument.as_bytes())),
    });
    // Preamble events stay on channel 0 for every track; only the note
    // events carry the voice channel.
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::Controller {
                controller: u7::new(CC_VOLUME),
                value: u7::new(127),
            },
        },
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::ProgramChange {
                program: u7::new(config.program),
            },
        },
    });

    for event in &timeline.events {
        let message = match event.kind {
            NoteEventKind::On => MidiMessage::NoteOn {
                key: u7::new(event.pitch),
                vel: u7::new(event.velocity),
            },
            NoteEventKind::Off => MidiMessage::NoteOff {
                key: u7::new(event.pitch),
                vel: u7::new(event.velocity),
            },
        };
        track.push(TrackEvent {
            delta: u28::new(event.delta),
            kind: TrackEventKind::Midi {
                channel: u4::new(event.channel),
                message,
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    track
}
