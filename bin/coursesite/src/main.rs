//! Course Site CLI
//!
//! Maintains a course record file and exports it as a static course homepage.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use coursesite::cmd::edit::EditArgs;

/// Command-line interface for coursesite.
#[derive(Parser)]
#[command(
    name = "coursesite",
    version,
    about = "Build a static course homepage from a course record"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "coursesite.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Create a new course record (.json, .toml or .yaml)
    New {
        /// Path of the record file to create
        record: PathBuf,
        /// Overwrite an existing record
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Change fields of a course record
    Edit {
        /// Path of the record file
        record: PathBuf,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Print a summary of a course record
    Show {
        /// Path of the record file
        record: PathBuf,
    },
    /// Print the lecture sessions of a course record
    Schedule {
        /// Path of the record file
        record: PathBuf,
    },
    /// Validate configuration and a course record
    Check {
        /// Path of the record file
        record: PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Export the enabled pages as a static site
    Export {
        /// Path of the record file
        record: PathBuf,
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    coursesite::init_tracing(cli.verbose);

    match cli.command {
        Commands::New {
            record,
            force,
            fields,
        } => {
            coursesite::cmd::new::run(&record, fields, force)?;
        }
        Commands::Edit { record, fields } => {
            coursesite::cmd::edit::run(&record, fields)?;
        }
        Commands::Show { record } => {
            coursesite::cmd::show::run(&record)?;
        }
        Commands::Schedule { record } => {
            coursesite::cmd::schedule::run(&cli.config, &record)?;
        }
        Commands::Check { record, strict } => {
            coursesite::cmd::check::run(&cli.config, &record, strict)?;
        }
        Commands::Export { record, output } => {
            coursesite::cmd::export::run(&cli.config, &record, output.as_deref())?;
        }
    }

    Ok(())
}
