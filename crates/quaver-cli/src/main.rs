//! quaver: command-line front end for the music-theory engine

mod cli;
mod config;

use std::io::Read;

use anyhow::{bail, Context};
use cli::{Command, Invocation};
use config::AppConfig;
use quaver_core::{
    analyze_pitches, decode_sequence, display_name_to_pitch, encode_sequence, encode_slice,
    identify_pitches, quantize_in_key, Genre, Key, NoteSequence, Pitch, ProgressionGenerator,
    ScaleMode,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let invocation = cli::parse_args(std::env::args().skip(1))?;

    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.logging.level)?;
    if let Some(e) = config_error {
        tracing::warn!("Ignoring config {}: {}", config::config_path().display(), e);
    }

    let output = run(&invocation, &config)?;
    println!("{}", output);
    Ok(())
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env()
            .add_directive(format!("quaver={}", level).parse()?)
            .add_directive(format!("quaver_core={}", level).parse()?))
        .init();
    Ok(())
}

fn run(inv: &Invocation, config: &AppConfig) -> anyhow::Result<String> {
    match inv.command {
        Command::Help => Ok(cli::USAGE.to_string()),
        Command::Generate => generate(inv, config),
        Command::Identify => identify(inv),
        Command::Quantize => {
            let seq = read_sequence(inv)?;
            let scale: ScaleMode = inv.option("scale").unwrap_or(config.quantize.scale.as_str()).parse()?;
            let tonic = inv.parsed::<Key>("tonic")?.unwrap_or_default();
            tracing::info!("Quantizing {} notes to {} {}", seq.notes.len(), tonic, scale.name());
            Ok(quantize_in_key(&seq, &scale.template(), tonic.pitch_class()).to_json()?)
        }
        Command::Encode => {
            let seq = read_sequence(inv)?;
            Ok(match inv.option("duration") {
                Some(duration) => seq
                    .vertical_slices()
                    .iter()
                    .map(|(_, slice)| encode_slice(slice, duration))
                    .collect::<Vec<_>>()
                    .join(", "),
                None => encode_sequence(&seq),
            })
        }
        Command::Decode => {
            if inv.args.is_empty() {
                bail!("decode needs at least one token");
            }
            let steps_per_quarter = inv
                .parsed::<u32>("steps-per-quarter")?
                .unwrap_or(config.notation.steps_per_quarter);
            let seq = decode_sequence(&inv.args.join(", "), steps_per_quarter)?;
            Ok(seq.to_json()?)
        }
    }
}

fn generate(inv: &Invocation, config: &AppConfig) -> anyhow::Result<String> {
    let key = Key::from_name(inv.option("key").unwrap_or(config.generate.key.as_str()))?;
    let genre = Genre::from_name_or_default(inv.option("genre").unwrap_or(config.generate.genre.as_str()));
    let length = inv.parsed::<usize>("length")?.unwrap_or(config.generate.length);
    if length == 0 {
        bail!("--length must be at least 1");
    }

    let mut generator = match inv.parsed::<u64>("seed")?.or(config.generate.seed) {
        Some(seed) => ProgressionGenerator::with_seed(seed),
        None => ProgressionGenerator::new(),
    };
    let seq = generator.generate(key, genre, length);
    tracing::info!("Generated {} {} progression in {}", length, genre, key);

    match inv.option("format").unwrap_or("json") {
        "json" => Ok(seq.to_json()?),
        "notation" => Ok(encode_sequence(&seq)),
        "labels" => Ok(labels(&seq, &config.notation.duration)),
        other => bail!("unknown format '{}'", other),
    }
}

/// One line per slice: step, chord label, quality name, notation token
fn labels(seq: &NoteSequence, duration: &str) -> String {
    seq.vertical_slices()
        .iter()
        .map(|(step, slice)| {
            let pitches: Vec<Pitch> = slice.iter().map(|n| n.pitch).collect();
            let (label, quality) = match analyze_pitches(&pitches) {
                Some(m) => (m.label(), m.quality.map_or("-", |q| q.name())),
                None => (String::new(), "-"),
            };
            format!("{}\t{}\t{}\t{}", step, label, quality, encode_slice(slice, duration))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn identify(inv: &Invocation) -> anyhow::Result<String> {
    if inv.args.is_empty() {
        bail!("identify needs at least one pitch");
    }
    let pitches = inv
        .args
        .iter()
        .map(|arg| match arg.parse::<Pitch>() {
            Ok(p) => Ok(p),
            Err(_) => display_name_to_pitch(arg),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(identify_pitches(&pitches))
}

fn read_sequence(inv: &Invocation) -> anyhow::Result<NoteSequence> {
    let json = match inv.args.first() {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Error reading file '{}'", path))?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s).context("Error reading stdin")?;
            s
        }
    };
    Ok(NoteSequence::from_json(&json)?)
}
