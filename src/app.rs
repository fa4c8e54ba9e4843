use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::core::errors::Result;
use crate::models::entry::{DirectoryEntry, EntryMetadata};
use crate::render::render_line;
use crate::services::fs::listing::{scan, sort_entries, stat_entry};

/// One reconciled configuration instead of the historical near-identical
/// program variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Long-format columns (permissions, links, owner, group, size, mtime).
    pub detailed: bool,
    /// Include entries whose names start with `.`.
    pub include_hidden: bool,
    /// Print the `total <blocks>` header before the listing.
    pub show_total: bool,
}

/// List one directory: scan, sort, then stat and render each entry.
/// Only the directory open failure is fatal.
pub fn run(dir: &Path, options: ListOptions, out: &mut dyn Write) -> Result<()> {
    let mut entries = scan(dir, options.include_hidden)?;
    sort_entries(&mut entries);
    write_listing(&entries, options, out)
}

/// Stat-and-render phase. Metadata is gathered here, once per entry, so
/// a stat failure drops that entry alone: it is logged and the listing
/// continues with the rest.
pub fn write_listing(
    entries: &[DirectoryEntry],
    options: ListOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let mut statted: Vec<(&DirectoryEntry, EntryMetadata)> = Vec::with_capacity(entries.len());
    for entry in entries {
        match stat_entry(entry) {
            Ok(meta) => statted.push((entry, meta)),
            Err(err) => warn!("{err}"),
        }
    }

    if options.show_total {
        let total: u64 = statted.iter().map(|(_, meta)| meta.blocks).sum();
        writeln!(out, "total {total}")?;
    }

    for (entry, meta) in &statted {
        writeln!(out, "{}", render_line(entry, meta, options.detailed))?;
    }
    Ok(())
}
