//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;
use crate::error::AdventureResult;

/// A chronological log of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Totemfall Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::SessionStarted { class, seed, .. } => {
                    out.push_str(&format!("## The {class} sets out\n\n"));
                    out.push_str(&format!("Seed: `{seed}`\n\n"));
                }
                JournalEntry::Healed { amount, health, .. } => {
                    out.push_str(&format!("- Healed **+{amount}** (health {health})\n"));
                }
                JournalEntry::ItemTaken { item, .. } => {
                    out.push_str(&format!("- Took **{item}**\n"));
                }
                JournalEntry::ItemLeft { item, .. } => {
                    out.push_str(&format!("- Left {item}\n"));
                }
                JournalEntry::GameSaved { snapshot, .. } => {
                    out.push_str(&format!("- *Game saved* {snapshot}\n"));
                }
                JournalEntry::BattleWon {
                    monster, victories, ..
                } => {
                    out.push_str(&format!(
                        "- **Victory** over a {monster} monster ({victories} total)\n"
                    ));
                }
                JournalEntry::BattleLost {
                    monster, mutual, ..
                } => {
                    let how = if *mutual { " (mutual destruction)" } else { "" };
                    out.push_str(&format!("- **Defeat** by a {monster} monster{how}\n"));
                }
                JournalEntry::BattleFled { monster, .. } => {
                    out.push_str(&format!("- Fled from a {monster} monster\n"));
                }
                JournalEntry::GameLoaded { snapshot, .. } => {
                    out.push_str(&format!("- *Game loaded* {snapshot}\n"));
                }
                JournalEntry::SessionEnded {
                    outcome, victories, ..
                } => {
                    out.push_str(&format!(
                        "\n**{outcome}** after {victories} victories\n"
                    ));
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Totemfall Journal\n=================\n\n");
        for entry in &self.entries {
            let stamp = entry_time(entry).format("%H:%M:%S");
            match entry {
                JournalEntry::SessionStarted { class, seed, .. } => {
                    out.push_str(&format!("[{stamp}] Started as {class} (seed {seed})\n"));
                }
                JournalEntry::Healed { amount, health, .. } => {
                    out.push_str(&format!("[{stamp}] Healed +{amount}, health {health}\n"));
                }
                JournalEntry::ItemTaken { item, .. } => {
                    out.push_str(&format!("[{stamp}] Took {item}\n"));
                }
                JournalEntry::ItemLeft { item, .. } => {
                    out.push_str(&format!("[{stamp}] Left {item}\n"));
                }
                JournalEntry::GameSaved { snapshot, .. } => {
                    out.push_str(&format!("[{stamp}] Game saved {snapshot}\n"));
                }
                JournalEntry::BattleWon {
                    monster, victories, ..
                } => {
                    out.push_str(&format!(
                        "[{stamp}] Defeated a {monster} monster ({victories} total)\n"
                    ));
                }
                JournalEntry::BattleLost {
                    monster, mutual, ..
                } => {
                    let how = if *mutual { ", taking it down too" } else { "" };
                    out.push_str(&format!("[{stamp}] Fell to a {monster} monster{how}\n"));
                }
                JournalEntry::BattleFled { monster, .. } => {
                    out.push_str(&format!("[{stamp}] Fled from a {monster} monster\n"));
                }
                JournalEntry::GameLoaded { snapshot, .. } => {
                    out.push_str(&format!("[{stamp}] Game loaded {snapshot}\n"));
                }
                JournalEntry::SessionEnded {
                    outcome, victories, ..
                } => {
                    out.push_str(&format!(
                        "[{stamp}] {outcome} after {victories} victories\n"
                    ));
                }
            }
        }
        out
    }

    /// Export the journal as pretty-printed JSON.
    pub fn export_json(&self) -> AdventureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn entry_time(entry: &JournalEntry) -> chrono::DateTime<chrono::Utc> {
    match entry {
        JournalEntry::SessionStarted { timestamp, .. }
        | JournalEntry::Healed { timestamp, .. }
        | JournalEntry::ItemTaken { timestamp, .. }
        | JournalEntry::ItemLeft { timestamp, .. }
        | JournalEntry::GameSaved { timestamp, .. }
        | JournalEntry::BattleWon { timestamp, .. }
        | JournalEntry::BattleLost { timestamp, .. }
        | JournalEntry::BattleFled { timestamp, .. }
        | JournalEntry::GameLoaded { timestamp, .. }
        | JournalEntry::SessionEnded { timestamp, .. } => *timestamp,
    }
}
