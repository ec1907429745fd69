use std::io::BufRead;

/// The three object kinds the resolver can encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }

    /// Consume the `<kind> <size>\0` header from a decompressed object and
    /// return the advertised kind and payload size.
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<(ObjectKind, usize)> {
        let mut kind_bytes = Vec::new();
        reader.read_until(b' ', &mut kind_bytes)?;
        if kind_bytes.pop() != Some(b' ') {
            anyhow::bail!("truncated object header");
        }
        let kind = ObjectKind::try_from(std::str::from_utf8(&kind_bytes)?)?;

        let mut size_bytes = Vec::new();
        reader.read_until(b'\0', &mut size_bytes)?;
        if size_bytes.pop() != Some(b'\0') {
            anyhow::bail!("object header is missing its NUL terminator");
        }
        let size = std::str::from_utf8(&size_bytes)?
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("invalid object size in header"))?;

        Ok((kind, size))
    }
}

impl TryFrom<&str> for ObjectKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            "commit" => Ok(ObjectKind::Commit),
            other => Err(anyhow::anyhow!("unknown object kind {other:?}")),
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
