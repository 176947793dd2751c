use std::path::Path;

use anyhow::{Context, Result};
use omniprof_core::event::OwnerId;
use omniprof_core::interchange::{self, ImportSummary};
use omniprof_core::store::EventStore;
use owo_colors::OwoColorize;

pub fn run<S: EventStore>(store: &mut S, file: &Path, owner: &OwnerId) -> Result<()> {
    let summary = import_file(store, file, owner)?;

    if summary.imported() == 0 {
        println!("{}", "  No events found in file".yellow());
        return Ok(());
    }

    for event in &summary.events {
        println!(
            "  {} {} {}",
            "+".green(),
            event.title,
            format!(
                "{} → {} ({})",
                event.start_date.format("%Y-%m-%d %H:%M"),
                event.end_date.format("%H:%M"),
                event.kind
            )
            .dimmed()
        );
    }
    println!();
    println!(
        "{}",
        format!(
            "  Imported {} event(s), {} linked to a class",
            summary.imported(),
            summary.linked_to_class
        )
        .green()
    );

    Ok(())
}

/// Read an uploaded file and import it. Invalid UTF-8 is replaced, a BOM is dropped.
fn import_file<S: EventStore>(store: &mut S, file: &Path, owner: &OwnerId) -> Result<ImportSummary> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    let content = text.trim_start_matches('\u{feff}');

    interchange::import_ics(store, content, owner)
        .with_context(|| format!("Failed to import {}", file.display()))
}
