// netlenka score core.
//
// Pure symbol-to-music mapping for the netlenka text-to-MIDI converter.
// Raw text flows one way through this crate: characters are classified
// (symbol.rs), mapped to pitches and velocities (mapping.rs), and laid
// out as delta-timed note events on four independent voice timelines
// (timeline.rs). Tunable parameters (root pitches, velocity levels,
// tempo, the drum note map) live in an immutable `ScoreConfig`
// (config.rs) built once at startup and passed by reference.
//
// This crate performs no I/O and knows nothing about the MIDI file
// format. Serialization of the timelines into a Standard MIDI File is
// the `netlenka_midi` crate's job.

pub mod config;
pub mod mapping;
pub mod symbol;
pub mod timeline;
