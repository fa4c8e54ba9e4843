use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::core::errors::{Error, Result};
use crate::models::entry::{DirectoryEntry, EntryKind, EntryMetadata};

/// Read directory entries: collect names and joined paths only (cheap);
/// metadata is gathered later, per entry, in the render phase.
pub fn scan(dir: &Path, include_hidden: bool) -> Result<Vec<DirectoryEntry>> {
    let open_err = |source| Error::DirectoryOpen {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(open_err)? {
        let entry = entry.map_err(open_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !include_hidden && name.starts_with('.') {
            continue;
        }
        entries.push(DirectoryEntry {
            name,
            path: entry.path(),
        });
    }
    Ok(entries)
}

/// Byte-wise lexicographic order by name; no locale collation.
pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
}

/// Non-following stat, so a symlink yields `EntryKind::Symlink` rather
/// than its target's kind.
pub fn stat_entry(entry: &DirectoryEntry) -> Result<EntryMetadata> {
    let md = fs::symlink_metadata(&entry.path).map_err(|source| Error::Stat {
        path: entry.path.clone(),
        source,
    })?;

    let file_type = md.file_type();
    let kind = if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };

    let link_target = if kind == EntryKind::Symlink {
        resolve_symlink_target(&entry.path)
    } else {
        None
    };

    Ok(EntryMetadata {
        kind,
        mode: md.mode(),
        nlink: md.nlink(),
        uid: md.uid(),
        gid: md.gid(),
        size: md.len(),
        blocks: md.blocks(),
        mtime: md.modified().unwrap_or(UNIX_EPOCH),
        link_target,
    })
}

/// Read a symlink's target and check it resolves; relative targets are
/// resolved against the link's parent directory. Dangling or unreadable
/// links yield `None` and the entry renders without an arrow suffix.
pub fn resolve_symlink_target(path: &Path) -> Option<String> {
    let target = fs::read_link(path).ok()?;
    let resolved = if target.is_absolute() {
        target.clone()
    } else {
        path.parent()?.join(&target)
    };
    fs::symlink_metadata(resolved).ok()?;
    Some(target.to_string_lossy().into_owned())
}
