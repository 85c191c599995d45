// netlenka converter — CLI entry point.
//
// Reads three input parts (drums, melody, harmony) and writes a
// five-track Standard MIDI File: meta/tempo, drums, melody, harmony,
// bass. The whole run is a one-shot batch transform: any failure
// aborts before a partial file can be produced.
//
// Usage:
//   convert [output.mid] [--drums PATH] [--melody PATH] [--harmony PATH]
//     [--config PATH] [--root N] [--tempo BPM]

use netlenka_midi::input::{read_drum_part, read_text_part};
use netlenka_midi::sequence::write_midi;
use netlenka_score::config::ScoreConfig;
use netlenka_score::timeline::Piece;
use std::path::PathBuf;

struct Args {
    output: PathBuf,
    drums: PathBuf,
    melody: PathBuf,
    harmony: PathBuf,
    config: Option<PathBuf>,
    root: Option<u8>,
    tempo: Option<u16>,
}

fn main() {
    let args = parse_args();

    println!("[1/4] Loading configuration...");
    let mut config = match &args.config {
        Some(path) => match ScoreConfig::load(path) {
            Ok(config) => {
                println!("  Loaded {}", path.display());
                config
            }
            Err(e) => {
                eprintln!("Failed to load config {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => ScoreConfig::default(),
    };
    if let Some(root) = args.root {
        config.root_note = root;
    }
    if let Some(tempo) = args.tempo {
        config.tempo_bpm = tempo;
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }
    println!(
        "  Root: {} (melody root {}), tempo {} BPM",
        config.root_note,
        config.melody_root(),
        config.tempo_bpm
    );

    println!("[2/4] Reading input parts...");
    let drum_bits = read_drum_part(&args.drums).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let melody_text = read_text_part(&args.melody).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let harmony_text = read_text_part(&args.harmony).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    println!(
        "  {} drum steps, {} melody chars, {} harmony chars",
        drum_bits.len(),
        melody_text.chars().count(),
        harmony_text.chars().count()
    );

    println!("[3/4] Building voice timelines...");
    let piece = Piece::from_parts(&drum_bits, &melody_text, &harmony_text, &config);
    for timeline in piece.timelines() {
        println!(
            "  {:>7?}: {} notes, {} ticks ({:.1}s)",
            timeline.voice,
            timeline.note_on_count(),
            timeline.total_ticks(),
            timeline.duration_seconds(config.tempo_bpm)
        );
    }

    println!("[4/4] Writing MIDI to {}...", args.output.display());
    match write_midi(&piece, &config, &args.output) {
        Ok(()) => println!("  Done."),
        Err(e) => {
            eprintln!("Error writing {}: {e}", args.output.display());
            std::process::exit(1);
        }
    }

    println!();
    println!(
        "Play with: timidity {} (or any MIDI player)",
        args.output.display()
    );
}

/// Parse command-line arguments. Uses simple `std::env::args()`
/// matching — no clap dependency.
fn parse_args() -> Args {
    let mut parsed = Args {
        output: PathBuf::from("netlenka.mid"),
        drums: PathBuf::from("drum_part.txt"),
        melody: PathBuf::from("melody_part.txt"),
        harmony: PathBuf::from("harmony_part.txt"),
        config: None,
        root: None,
        tempo: None,
    };
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--drums" => {
                i += 1;
                parsed.drums = path_value(&args, i, "--drums");
            }
            "--melody" => {
                i += 1;
                parsed.melody = path_value(&args, i, "--melody");
            }
            "--harmony" => {
                i += 1;
                parsed.harmony = path_value(&args, i, "--harmony");
            }
            "--config" => {
                i += 1;
                parsed.config = Some(path_value(&args, i, "--config"));
            }
            "--root" => {
                i += 1;
                parsed.root = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--root requires a MIDI note number");
                    std::process::exit(1);
                }));
            }
            "--tempo" => {
                i += 1;
                parsed.tempo = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(
                    || {
                        eprintln!("--tempo requires a BPM value");
                        std::process::exit(1);
                    },
                ));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if !other.starts_with("--") => {
                parsed.output = PathBuf::from(other);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    parsed
}

fn path_value(args: &[String], i: usize, flag: &str) -> PathBuf {
    args.get(i).map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("{flag} requires a path");
        std::process::exit(1);
    })
}

fn print_usage() {
    println!("Usage: convert [output.mid] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --drums <PATH>     Drum part file, raw bits (default: drum_part.txt)");
    println!("  --melody <PATH>    Melody part text (default: melody_part.txt)");
    println!("  --harmony <PATH>   Harmony part text (default: harmony_part.txt)");
    println!("  --config <PATH>    JSON ScoreConfig overriding the defaults");
    println!("  --root <N>         Harmony root pitch override (5..=54)");
    println!("  --tempo <BPM>      Tempo override (default: 120)");
}
