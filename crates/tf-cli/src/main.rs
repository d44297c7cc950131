//! CLI frontend for the Totemfall adventure.

mod commands;
mod console;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tf_mechanics::ClassKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "totemfall",
    about = "Totemfall: a turn-based text adventure",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine internals to stderr at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an adventure in the terminal
    Play {
        /// RNG seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Battles to win (overrides the config file)
        #[arg(short, long)]
        wins: Option<u32>,

        /// Skip class selection and play this class
        #[arg(long, value_enum)]
        class: Option<ClassArg>,

        /// TOML file with adventure settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the run journal here (.json, .md, or plain text)
        #[arg(short, long)]
        journal: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClassArg {
    Swordsman,
    Archer,
    Wizard,
}

impl From<ClassArg> for ClassKind {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Swordsman => ClassKind::Melee,
            ClassArg::Archer => ClassKind::Ranged,
            ClassArg::Wizard => ClassKind::Caster,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            seed,
            wins,
            class,
            config,
            journal,
        } => commands::play::run(&commands::play::PlayOptions {
            seed,
            wins,
            class: class.map(ClassKind::from),
            config,
            journal,
        }),
    };

    match result {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}
