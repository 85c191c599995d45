// netlenka MIDI boundary crate.
//
// Everything that touches the outside world lives here: reading the
// three input parts from disk (input.rs) and turning the pure voice
// timelines from `netlenka_score` into a Standard MIDI File via the
// `midly` crate (sequence.rs). The core never sees a byte of the SMF
// format; this crate never makes a musical decision.

pub mod input;
pub mod sequence;
