//! Git commit object
//!
//! A commit is a point in history: the tree id of the complete repository
//! snapshot at that point, zero or more parent ids (zero for a root
//! commit, two or more for merges), author/committer signatures and a
//! message. The resolver only ever decodes commits; it never creates them.
//!
//! ## Format
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <message>
//! ```

use crate::artifacts::objects::id::ObjectId;
use anyhow::Context;
use std::io::{BufRead, Read};

/// Author or committer identity with its timestamp.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Signature {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Signature {
    pub fn new(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Signature {
            name,
            email,
            timestamp,
        }
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Signature {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // "name <email> timestamp timezone"; split from the right so names
        // may contain spaces
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            anyhow::bail!("invalid signature {value:?}");
        }

        let timestamp =
            chrono::DateTime::parse_from_str(&format!("{} {}", parts[1], parts[0]), "%s %z")
                .with_context(|| format!("invalid timestamp in signature {value:?}"))?;

        let identity = parts[2];
        let email_start = identity
            .find('<')
            .with_context(|| format!("signature {value:?} is missing '<'"))?;
        let email_end = identity
            .find('>')
            .with_context(|| format!("signature {value:?} is missing '>'"))?;
        if email_end < email_start {
            anyhow::bail!("invalid signature {value:?}");
        }

        Ok(Signature {
            name: identity[..email_start].trim_end().to_string(),
            email: identity[email_start + 1..email_end].to_string(),
            timestamp,
        })
    }
}

/// An immutable view of one commit, as read from the object database.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Signature,
    committer: Signature,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        author: Signature,
        committer: Signature,
        message: String,
    ) -> Self {
        Commit {
            parents,
            tree_oid,
            author,
            committer,
            message,
        }
    }

    /// Decode a commit payload, header already consumed.
    pub fn decode(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader.bytes().collect::<Result<Vec<u8>, _>>()?;
        let content = String::from_utf8(content).context("commit payload is not UTF-8")?;
        let mut lines = content.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .context("commit is missing its tree line")?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        let mut parents = Vec::new();
        let mut line = lines.next().context("commit is missing its author line")?;
        while let Some(parent) = line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent.to_string())?);
            line = lines.next().context("commit is missing its author line")?;
        }

        let author = line
            .strip_prefix("author ")
            .context("commit is missing its author line")?;
        let author = Signature::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .context("commit is missing its committer line")?;
        let committer = Signature::try_from(committer)?;

        // skip the blank separator before the message
        lines.next();
        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Commit {
            parents,
            tree_oid,
            author,
            committer,
            message,
        })
    }

    /// Parent ids in recorded order: first parent first.
    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn author(&self) -> &Signature {
        &self.author
    }

    pub fn committer(&self) -> &Signature {
        &self.committer
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, for one-line display.
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }
}
