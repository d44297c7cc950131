//! Terminal implementations of the decision and narration boundaries.

use std::io::{BufRead, Write};

use colored::{ColoredString, Colorize};
use comfy_table::{ContentArrangement, Table};

use tf_adventure::{
    AdventureError, AdventureResult, DecisionProvider, Narration, NarrationSink, Prompt,
};
use tf_mechanics::Item;

/// Reads numbered answers from a line-oriented reader.
///
/// Anything that is not one of the offered numbers is rejected and the
/// question asked again. End of input is [`AdventureError::InputClosed`].
pub struct ConsoleDecisions<R, W> {
    input: R,
    output: W,
    line: Vec<u8>,
}

impl<R: BufRead, W: Write> ConsoleDecisions<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: Vec::new(),
        }
    }

    fn render(&mut self, prompt: &Prompt) -> AdventureResult<()> {
        writeln!(self.output)?;
        if let Some(status) = prompt.status() {
            writeln!(self.output, "  {}", status.to_string().dimmed())?;
        }
        if !prompt.inventory().is_empty() {
            writeln!(self.output, "{}", inventory_table(prompt.inventory()))?;
        }
        writeln!(self.output, "  {}", prompt.heading().bold())?;
        for (i, option) in prompt.options().iter().enumerate() {
            writeln!(self.output, "    {}. {option}", i + 1)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> DecisionProvider for ConsoleDecisions<R, W> {
    fn choose(&mut self, prompt: &Prompt) -> AdventureResult<usize> {
        self.render(prompt)?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            self.line.clear();
            if self.input.read_until(b'\n', &mut self.line)? == 0 {
                return Err(AdventureError::InputClosed);
            }

            let text = String::from_utf8_lossy(&self.line);
            let answer = text.trim().parse::<usize>().ok();
            match answer.map(|n| prompt.check(n)) {
                Some(Ok(choice)) => return Ok(choice),
                _ => {
                    tracing::debug!(
                        target: "tf_cli::console",
                        input = text.trim(),
                        "rejected answer"
                    );
                    writeln!(
                        self.output,
                        "  {}",
                        format!(
                            "Please enter a number between 1 and {}.",
                            prompt.options().len()
                        )
                        .yellow()
                    )?;
                }
            }
        }
    }
}

fn inventory_table(items: &[Item]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Item", "Rating"]);
    for (i, item) in items.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            item.kind.to_string(),
            item.rating.to_string(),
        ]);
    }
    table
}

/// Prints narration as colored lines.
pub struct ConsoleNarration<W> {
    output: W,
}

impl<W: Write> ConsoleNarration<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W: Write> NarrationSink for ConsoleNarration<W> {
    fn notify(&mut self, message: Narration) {
        if let Err(e) = writeln!(self.output, "  {}", colorize(&message)) {
            tracing::warn!(target: "tf_cli::console", error = %e, "narration not written");
        }
    }
}

fn colorize(message: &Narration) -> ColoredString {
    let text = message.to_string();
    match message {
        Narration::Victory | Narration::MonsterSlain { .. } => text.green().bold(),
        Narration::Defeat | Narration::MutualDestruction => text.red().bold(),
        Narration::MonsterEncountered { .. } => text.yellow().bold(),
        Narration::PlayerWounded { .. } => text.red(),
        Narration::Healed { .. } | Narration::ItemTaken(_) => text.green(),
        Narration::Dodged | Narration::GameSaved | Narration::GameLoaded { .. } => text.cyan(),
        Narration::MonsterWounded { .. } | Narration::WeaponEquipped(_) => text.blue(),
        Narration::ItemLeft(_) | Narration::Retreated => text.dimmed(),
        Narration::ClassChosen(_) | Narration::ItemFound(_) => text.normal(),
    }
}
