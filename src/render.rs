use std::fmt::Write;
use std::time::SystemTime;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use uzers::{get_group_by_gid, get_user_by_uid};

use crate::models::entry::{DirectoryEntry, EntryKind, EntryMetadata};

pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_BLUE: &str = "\x1b[34m";
pub const COLOR_GREEN: &str = "\x1b[32m";
pub const COLOR_CYAN: &str = "\x1b[36m";

/// Fixed-width `ls -l` style timestamp, e.g. `Sep 02 14:05`.
const MTIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:zero] [hour padding:zero]:[minute padding:zero]"
);

/// Produce one output line for an entry. The detailed prefix holds the
/// permission string, link count, owner, group, size and mtime columns;
/// the name is color-tagged by kind and symlinks carry an arrow suffix
/// when their target resolves.
pub fn render_line(entry: &DirectoryEntry, meta: &EntryMetadata, detailed: bool) -> String {
    let mut line = String::new();
    if detailed {
        let _ = write!(
            line,
            "{} {:>4} {:<10} {:<10} {:>8} {} ",
            permission_string(meta),
            meta.nlink,
            owner_name(meta.uid),
            group_name(meta.gid),
            meta.size,
            format_mtime(meta.mtime),
        );
    }

    match color_for(meta) {
        Some(color) => {
            line.push_str(color);
            line.push_str(&entry.name);
            line.push_str(COLOR_RESET);
        }
        None => line.push_str(&entry.name),
    }

    if let Some(target) = &meta.link_target {
        line.push_str(" -> ");
        line.push_str(target);
    }
    line
}

/// 10-character mode column: type char, then rwx bits for owner, group
/// and other, `-` for unset bits.
pub fn permission_string(meta: &EntryMetadata) -> String {
    const SYMBOLS: [&str; 8] = ["---", "--x", "-w-", "-wx", "r--", "r-x", "rw-", "rwx"];

    let type_char = match meta.kind {
        EntryKind::Dir => 'd',
        EntryKind::Symlink => 'l',
        EntryKind::File | EntryKind::Other => '-',
    };
    let mode = meta.mode;
    format!(
        "{}{}{}{}",
        type_char,
        SYMBOLS[((mode >> 6) & 0o7) as usize],
        SYMBOLS[((mode >> 3) & 0o7) as usize],
        SYMBOLS[(mode & 0o7) as usize],
    )
}

/// Directories win over everything, symlinks stay cyan whether or not
/// they are executable, and green is reserved for owner-executable
/// regular files.
pub fn color_for(meta: &EntryMetadata) -> Option<&'static str> {
    match meta.kind {
        EntryKind::Dir => Some(COLOR_BLUE),
        EntryKind::Symlink => Some(COLOR_CYAN),
        EntryKind::File if meta.is_owner_executable() => Some(COLOR_GREEN),
        _ => None,
    }
}

fn owner_name(uid: u32) -> String {
    get_user_by_uid(uid)
        .map(|user| user.name().to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| uid.to_string())
}

fn group_name(gid: u32) -> String {
    get_group_by_gid(gid)
        .map(|group| group.name().to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| gid.to_string())
}

fn format_mtime(mtime: SystemTime) -> String {
    let ts = OffsetDateTime::from(mtime);
    let local = UtcOffset::current_local_offset()
        .map(|offset| ts.to_offset(offset))
        .unwrap_or(ts);
    local
        .format(MTIME_FORMAT)
        .unwrap_or_else(|_| "Jan 01 00:00".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::UNIX_EPOCH;

    // Uid/gid far outside any real user database, so name resolution
    // falls back to the numeric form deterministically.
    const UNRESOLVABLE_ID: u32 = 3_000_000_000;

    fn meta(kind: EntryKind, mode: u32) -> EntryMetadata {
        EntryMetadata {
            kind,
            mode,
            nlink: 1,
            uid: UNRESOLVABLE_ID,
            gid: UNRESOLVABLE_ID,
            size: 42,
            blocks: 8,
            mtime: UNIX_EPOCH,
            link_target: None,
        }
    }

    fn entry(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn permission_strings() {
        assert_eq!(permission_string(&meta(EntryKind::File, 0o644)), "-rw-r--r--");
        assert_eq!(permission_string(&meta(EntryKind::Dir, 0o755)), "drwxr-xr-x");
        assert_eq!(permission_string(&meta(EntryKind::Symlink, 0o777)), "lrwxrwxrwx");
        assert_eq!(permission_string(&meta(EntryKind::File, 0o000)), "----------");
    }

    #[test]
    fn color_priority() {
        assert_eq!(color_for(&meta(EntryKind::Dir, 0o000)), Some(COLOR_BLUE));
        assert_eq!(color_for(&meta(EntryKind::Symlink, 0o755)), Some(COLOR_CYAN));
        assert_eq!(color_for(&meta(EntryKind::File, 0o755)), Some(COLOR_GREEN));
        assert_eq!(color_for(&meta(EntryKind::File, 0o644)), None);
        assert_eq!(color_for(&meta(EntryKind::Other, 0o777)), None);
    }

    #[test]
    fn plain_line_is_just_the_name() {
        let line = render_line(&entry("a.txt"), &meta(EntryKind::File, 0o644), false);
        assert_eq!(line, "a.txt");
    }

    #[test]
    fn directory_line_is_blue() {
        let line = render_line(&entry("bin"), &meta(EntryKind::Dir, 0o755), false);
        assert_eq!(line, "\x1b[34mbin\x1b[0m");
    }

    #[test]
    fn symlink_line_carries_arrow_after_reset() {
        let mut m = meta(EntryKind::Symlink, 0o777);
        m.link_target = Some("target.txt".to_string());
        let line = render_line(&entry("ln"), &m, false);
        assert_eq!(line, "\x1b[36mln\x1b[0m -> target.txt");
    }

    #[test]
    fn detailed_line_columns() {
        let line = render_line(&entry("a.txt"), &meta(EntryKind::File, 0o644), true);
        let fields: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(fields[0], "-rw-r--r--");
        assert_eq!(fields[1], "1");
        assert_eq!(fields[2], UNRESOLVABLE_ID.to_string());
        assert_eq!(fields[3], UNRESOLVABLE_ID.to_string());
        assert_eq!(fields[4], "42");
        assert_eq!(fields.last(), Some(&"a.txt"));
    }

    #[test]
    fn mtime_column_is_fixed_width() {
        assert_eq!(format_mtime(UNIX_EPOCH).len(), "Jan 01 00:00".len());
    }
}
