use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use truss2d::report::{render_json, render_text};
use truss2d::{
    analyze, preset, SolverOptions, Structure, UnitSystem, ValidationPolicy, PRESETS,
};

/// Planar truss solver.
#[derive(Debug, Parser)]
#[command(name = "truss2d", version, about)]
struct Cli {
    /// Increase logging (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a structure described in a JSON file.
    Solve {
        /// JSON file with `nodes`, `elements` and `loads`.
        model: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
        /// Skip invalid elements and loads instead of failing.
        #[arg(long)]
        lenient: bool,
        /// JSON file with solver options.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Unit system used to label the text report.
        #[arg(long)]
        units: Option<UnitSystem>,
    },
    /// Solve one of the built-in structures.
    Preset {
        /// Preset key, see `truss2d presets`.
        name: String,
        /// Unit system the preset is built in.
        #[arg(long, default_value = "si-kn-m")]
        units: UnitSystem,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the built-in structures.
    Presets,
}

#[derive(Debug, clap::Args)]
struct OutputArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Solve {
            model,
            output,
            lenient,
            config,
            units,
        } => {
            let structure = Structure::from_json(&fs::read_to_string(&model)?)?;
            let mut options = match config {
                Some(path) => SolverOptions::from_json(&fs::read_to_string(path)?)?,
                None => SolverOptions::default(),
            };
            if lenient {
                options.validation = ValidationPolicy::Lenient;
            }
            log::info!("solving {}", model.display());
            run(&structure, &options, output.format, units)
        }
        Command::Preset {
            name,
            units,
            output,
        } => {
            let Some(preset) = preset(&name) else {
                return Err(format!("unknown preset '{name}', see `truss2d presets`").into());
            };
            log::info!("solving preset {} in {units}", preset.name);
            run(
                &preset.structure(units),
                &SolverOptions::default(),
                output.format,
                Some(units),
            )
        }
        Command::Presets => {
            for preset in &PRESETS {
                println!("{:<12} {:<16} {}", preset.key, preset.name, preset.description);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Solve and print; the exit code reflects whether results were produced.
fn run(
    structure: &Structure,
    options: &SolverOptions,
    format: Format,
    units: Option<UnitSystem>,
) -> Result<ExitCode, Box<dyn Error>> {
    let result = analyze(structure, options);
    match format {
        Format::Text => print!("{}", render_text(&result, units)),
        Format::Json => println!("{}", render_json(&result)?),
    }
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
