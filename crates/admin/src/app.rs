use std::path::Path;

use anyhow::Context;
use tradeline_events::{Command, OfferCommand};
use tradeline_timeline::{JsonFileSource, TimelineStore, TimelineView};

use crate::config::AdminConfig;

/// Outcome of replaying a batch of commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
    pub added_offer_ids: Vec<String>,
}

/// Decode a JSON array of offer commands.
pub fn parse_commands(text: &str) -> anyhow::Result<Vec<OfferCommand>> {
    serde_json::from_str(text).context("commands must be a JSON array of offer commands")
}

pub fn load_commands(path: &Path) -> anyhow::Result<Vec<OfferCommand>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read commands file {}", path.display()))?;
    parse_commands(&text).with_context(|| format!("in {}", path.display()))
}

/// Apply `commands` in order. A rejected command is logged and skipped; the
/// ones after it still run.
pub fn replay(store: &mut TimelineStore, commands: &[OfferCommand]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for (index, command) in commands.iter().enumerate() {
        match store.execute(command) {
            Ok(added) => {
                summary.applied += 1;
                if let Some(offer) = added {
                    summary.added_offer_ids.push(offer.event_id.into_string());
                }
            }
            Err(err) => {
                summary.rejected += 1;
                tracing::warn!(
                    index,
                    target_event_id = %command.target_event_id(),
                    error = %err,
                    "offer command rejected"
                );
            }
        }
    }

    summary
}

/// Load the configured fixture, replay the configured commands and return
/// the resulting view.
pub fn run(config: &AdminConfig) -> anyhow::Result<TimelineView> {
    let mut store = TimelineStore::load(&JsonFileSource::new(&config.fixture))
        .with_context(|| format!("failed to load timeline from {}", config.fixture.display()))?;

    if let Some(path) = &config.commands {
        let commands = load_commands(path)?;
        let summary = replay(&mut store, &commands);
        tracing::info!(
            applied = summary.applied,
            rejected = summary.rejected,
            added = ?summary.added_offer_ids,
            "replayed offer commands"
        );
    }

    Ok(store.view())
}
