use std::path::PathBuf;
use std::time::SystemTime;

/// One name found inside the scanned directory, with its joined path.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

/// Metadata gathered with a non-following stat, so symlinks report
/// themselves rather than their targets.
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub kind: EntryKind,
    /// Raw Unix mode bits (type bits included).
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    /// On-disk allocation in 512-byte units.
    pub blocks: u64,
    pub mtime: SystemTime,
    /// Set only for symlinks whose target resolves.
    pub link_target: Option<String>,
}

impl EntryMetadata {
    pub fn is_owner_executable(&self) -> bool {
        self.mode & 0o100 != 0
    }
}
