use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;

use tf_adventure::{AdventureConfig, AdventureSession, Journal, Narration, NarrationSink, Outcome};
use tf_mechanics::ClassKind;

use crate::console::{ConsoleDecisions, ConsoleNarration};

/// Command-line overrides for a run.
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub wins: Option<u32>,
    pub class: Option<ClassKind>,
    pub config: Option<PathBuf>,
    pub journal: Option<PathBuf>,
}

pub fn run(options: &PlayOptions) -> Result<Outcome, String> {
    let config = load_config(options)?;

    println!(
        "  {} {}",
        "Totemfall".bold(),
        format!(
            "(seed={}, win after {} battles)",
            config.seed, config.victories_to_win
        )
        .dimmed()
    );
    println!();

    let stdin = io::stdin();
    let mut decisions = ConsoleDecisions::new(stdin.lock(), io::stdout());
    let mut narration = ConsoleNarration::new(io::stdout());

    let class = match options.class {
        Some(class) => {
            narration.notify(Narration::ClassChosen(class));
            class
        }
        None => AdventureSession::choose_class(&mut decisions, &mut narration)
            .map_err(|e| e.to_string())?,
    };

    let mut session = AdventureSession::new(class, config).map_err(|e| e.to_string())?;
    let outcome = session.run(&mut decisions, &mut narration);

    // Written even when the run ended in an error.
    if let Some(path) = &options.journal {
        write_journal(session.journal(), path)?;
    }
    let outcome = outcome.map_err(|e| e.to_string())?;

    println!();
    println!(
        "  {} after {} victories",
        match outcome {
            Outcome::Victory => outcome.to_string().green().bold(),
            Outcome::Defeat => outcome.to_string().red().bold(),
        },
        session.victories()
    );
    Ok(outcome)
}

fn load_config(options: &PlayOptions) -> Result<AdventureConfig, String> {
    let mut config = match &options.config {
        Some(path) => AdventureConfig::from_path(path)
            .map_err(|e| format!("failed to load {}: {e}", path.display()))?,
        None => AdventureConfig::default(),
    };
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if let Some(wins) = options.wins {
        config = config.with_victories_to_win(wins);
    }
    Ok(config)
}

fn write_journal(journal: &Journal, path: &Path) -> Result<(), String> {
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => journal.export_json().map_err(|e| e.to_string())?,
        Some("md" | "markdown") => journal.export_markdown(),
        _ => journal.export_text(),
    };
    fs::write(path, content).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    tracing::info!(
        target: "tf_cli::play",
        path = %path.display(),
        entries = journal.len(),
        "journal written"
    );
    Ok(())
}
