mod logging;

use std::{fs, io, path::PathBuf};

use ariadne::{
    generate_batch,
    settings::{Settings, SettingsError},
    Algorithm, MazeError, MazeGenerator as _, SerializableMaze, SerializeError,
};
use clap::{Parser, ValueEnum};
use rand::{thread_rng, Rng as _};
use thiserror::Error;

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Maze(#[from] MazeError),
    #[error("{0}")]
    Serialize(#[from] SerializeError),
    #[error("{0}")]
    Settings(#[from] SettingsError),
    #[error("Can't read maze file: {0}")]
    Io(#[from] io::Error),
    #[error("Logger already set: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("No preset named `{0}`")]
    UnknownPreset(String),
    #[error("No maze size given and no preset to fall back to")]
    MissingSize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Ron,
}

/// Generates perfect mazes and prints them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of columns
    #[arg(requires = "height", allow_negative_numbers = true)]
    width: Option<i32>,

    /// Number of rows
    #[arg(allow_negative_numbers = true)]
    height: Option<i32>,

    /// Generation algorithm, taken from settings when missing
    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Seed for deterministic output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Size preset from settings, used when no size is given
    #[arg(short, long, conflicts_with = "width")]
    preset: Option<String>,

    /// Number of mazes to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Render a maze saved in RON format instead of generating one
    #[arg(short, long, conflicts_with_all = ["width", "preset"])]
    input: Option<PathBuf>,

    /// Settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// More output on stderr, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    logging::init(logging::level_from_verbosity(args.verbose))?;

    if let Some(path) = &args.input {
        let maze = SerializableMaze::from_ron(&fs::read_to_string(path)?)?.into_maze()?;
        print!("{}", maze);
        return Ok(());
    }

    let settings = match args.settings.clone().or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => Settings::builtin()?,
    };

    let (width, height, title) = match (args.width, args.height, &args.preset) {
        (Some(width), Some(height), _) => (width, height, format!("{}x{}", width, height)),
        (_, _, Some(name)) => {
            let preset = settings
                .find_preset(name)
                .ok_or_else(|| Error::UnknownPreset(name.clone()))?;
            (preset.width, preset.height, preset.title)
        }
        _ => {
            let preset = settings.default_preset().ok_or(Error::MissingSize)?;
            (preset.width, preset.height, preset.title)
        }
    };

    let algorithm = args
        .algorithm
        .unwrap_or_else(|| settings.get_default_maze_gen_algo());
    let seed = args
        .seed
        .or(settings.get_seed())
        .unwrap_or_else(|| thread_rng().gen());
    log::info!("Seed: {}", seed);

    let mazes = if args.count == 1 {
        vec![algorithm.generator().generate_seeded(width, height, seed)?]
    } else {
        generate_batch(algorithm.generator(), width, height, args.count, seed)?
    };

    for (i, maze) in mazes.iter().enumerate() {
        if i > 0 {
            println!();
        }

        match args.format {
            Format::Text => print!("{}", maze),
            Format::Ron => println!("{}", SerializableMaze::new(maze, title.clone()).to_ron()?),
        }
    }

    Ok(())
}
