/// File mode recorded for a tree entry.
///
/// Trees serialize modes in octal without a leading zero for files
/// (`100644`) and as `40000` for subtrees. Only the four modes the
/// resolver can meet in a snapshot are supported; anything else marks the
/// tree as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Regular,
    Executable,
    Symlink,
    Directory,
}

impl EntryMode {
    pub fn from_octal_str(mode: &str) -> anyhow::Result<Self> {
        match mode {
            "100644" => Ok(EntryMode::Regular),
            "100755" => Ok(EntryMode::Executable),
            "120000" => Ok(EntryMode::Symlink),
            "40000" | "040000" => Ok(EntryMode::Directory),
            other => Err(anyhow::anyhow!("unsupported tree entry mode {other:?}")),
        }
    }

    /// Whether this entry names a nested tree the path resolver may
    /// descend into.
    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }
}
