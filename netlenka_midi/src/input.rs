// Input part loading.
//
// The melody and harmony parts are ordinary text, one event per
// character. The drum part is read as raw bytes and expanded MSB-first
// into bits, one drum step per bit, so a single input byte drives
// eight steps. Read failures surface as `io::Error` with the offending
// path in the message, since the caller aborts before building any
// track.

use std::io;
use std::path::Path;

/// Read a text part (melody or harmony input).
pub fn read_text_part(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| io::Error::new(e.kind(), format!("cannot read {}: {e}", path.display())))
}

/// Read the drum part: raw bytes expanded into one bit per drum step.
pub fn read_drum_part(path: &Path) -> io::Result<Vec<bool>> {
    let bytes = std::fs::read(path)
        .map_err(|e| io::Error::new(e.kind(), format!("cannot read {}: {e}", path.display())))?;
    Ok(expand_bits(&bytes))
}

/// Expand bytes MSB-first into bits.
pub fn expand_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 != 0);
        }
    }
    bits
}
