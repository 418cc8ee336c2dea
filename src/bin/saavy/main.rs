//! saavy - Terminal music-theory explorer and gate sequencer
//!
//! Run with: cargo run -- --bpm 96 --root D --mode dorian

mod app;
mod output;
mod ui;

use std::{fs::File, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use env_logger::{Builder, Env, Target};
use log::info;

use app::{App, Settings};
use saavy_theory::{
    sequencing::{
        input::{coerce_bpm, coerce_count, coerce_offset, coerce_resolution, coerce_seed},
        Gate,
    },
    theory::{tables::CHROMATIC, Mode, Scale},
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Starting tempo in beats per minute
    #[clap(long, default_value = "120", allow_negative_numbers = true)]
    bpm: String,

    /// Ticks in one sequencer loop
    #[clap(long, default_value = "32")]
    resolution: String,

    /// Scale root, e.g. "C" or "F#"
    #[clap(long, default_value = "C")]
    root: String,

    /// Scale mode, e.g. "Ionian", "dorian", "minor"
    #[clap(long, default_value = "Ionian")]
    mode: String,

    /// Master gate: open ticks per window
    #[clap(long, default_value = "2")]
    master_on: String,

    /// Master gate: window length in ticks
    #[clap(long, default_value = "4")]
    master_total: String,

    /// Master gate: rotation in ticks
    #[clap(long, default_value = "0", allow_negative_numbers = true)]
    master_offset: String,

    /// Groove melody seed
    #[clap(long, default_value = "12345", allow_negative_numbers = true)]
    seed: String,

    /// Log destination; the terminal belongs to the UI
    #[clap(long, default_value = "saavy.log")]
    log_file: PathBuf,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .wrap_err_with(|| format!("failed to create log file {}", args.log_file.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(log_file)))
        .init();

    let settings = settings(&args)?;
    info!(
        "starting at {} BPM, resolution {}, {}",
        settings.bpm,
        settings.resolution,
        settings.scale.describe()
    );

    let mut terminal = ratatui::init();
    let result = App::new(settings).run(&mut terminal);
    ratatui::restore();
    result
}

fn settings(args: &Args) -> color_eyre::Result<Settings> {
    let root = CHROMATIC
        .iter()
        .position(|name| name.eq_ignore_ascii_case(args.root.trim()))
        .ok_or_else(|| eyre!("unknown root note {:?}", args.root))?;
    let mode = Mode::from_name(&args.mode).ok_or_else(|| eyre!("unknown mode {:?}", args.mode))?;

    Ok(Settings {
        bpm: coerce_bpm(&args.bpm) as f64,
        resolution: coerce_resolution(&args.resolution),
        scale: Scale::new(root as u8, mode),
        master: Gate::new(
            coerce_count(&args.master_on),
            coerce_count(&args.master_total),
            coerce_offset(&args.master_offset),
        ),
        seed: coerce_seed(&args.seed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(flags: &[&str]) -> Settings {
        let args = Args::parse_from(std::iter::once("saavy").chain(flags.iter().copied()));
        settings(&args).unwrap()
    }

    #[test]
    fn defaults_match_a_fresh_session() {
        let settings = parse(&[]);
        assert_eq!(settings.bpm, 120.0);
        assert_eq!(settings.resolution, 32);
        assert_eq!(settings.master, Gate::new(2, 4, 0));
        assert_eq!(settings.seed, 12345);
    }

    #[test]
    fn bad_numbers_are_coerced() {
        let settings = parse(&[
            "--bpm", "10000000",
            "--resolution", "4000000000",
            "--master-on", "0",
            "--master-total", "x",
            "--master-offset", "-3",
            "--seed=-7abc",
        ]);
        assert_eq!(settings.bpm, 999.0);
        assert_eq!(settings.resolution, 1024);
        assert_eq!(settings.master, Gate::new(1, 1, 0));
        assert_eq!(settings.seed, -7);
    }

    #[test]
    fn unknown_root_is_an_error() {
        let args = Args::parse_from(["saavy", "--root", "H"]);
        assert!(settings(&args).is_err());
    }
}
