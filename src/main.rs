//! Canvas Align CLI
//!
//! Usage:
//!   canvas-align [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Snap settings file (TOML, `[snap]` table)
//!   -t, --trace          Print one line per gesture frame to stderr
//!       --compact        Emit single-line JSON
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use canvas_align::{run_with_config, SnapConfig};

#[derive(Parser)]
#[command(name = "canvas-align")]
#[command(about = "Replay widget drags and constraint edits, printing the resulting layout")]
struct Cli {
    /// Gesture script (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Snap settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print each gesture frame to stderr
    #[arg(short, long)]
    trace: bool,

    /// Emit single-line JSON instead of pretty-printed output
    #[arg(long)]
    compact: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match SnapConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SnapConfig::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let outcome = match run_with_config(&source, config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    if cli.trace {
        for frame in &outcome.frames {
            let widget = frame.widget.as_ref().map(|w| w.as_str()).unwrap_or("-");
            let guides: Vec<String> = frame
                .guides
                .iter()
                .map(|g| format!("{:?}@{}", g.axis, g.position))
                .collect();
            eprintln!(
                "[{}] {} {} guides=[{}] moved={}",
                frame.step,
                frame.action,
                widget,
                guides.join(", "),
                frame.moved.len()
            );
        }
    }

    let json = if cli.compact {
        serde_json::to_string(&outcome)
    } else {
        serde_json::to_string_pretty(&outcome)
    };
    match json {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
