//! Git object identifier (SHA-1 hash)
//!
//! Object ids are 40-character hexadecimal strings derived from an object's
//! own bytes. Equality is byte-for-byte; two ids are the same object.
//!
//! Loose objects live at `.git/objects/<first-2-chars>/<remaining-38-chars>`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from its hexadecimal form.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            anyhow::bail!("invalid object id length {} for {:?}", id.len(), id);
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("object id {:?} contains non-hex characters", id);
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an id from a raw 20-byte SHA-1 digest.
    pub fn from_digest(digest: &[u8]) -> Self {
        let mut hex = String::with_capacity(OBJECT_ID_LENGTH);
        for byte in digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(hex)
    }

    /// Read an id in its binary 20-byte form, as stored in tree entries.
    pub fn read_binary_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut digest = [0u8; OBJECT_ID_LENGTH / 2];
        reader.read_exact(&mut digest)?;
        Ok(Self::from_digest(&digest))
    }

    /// Write the id in its binary 20-byte form.
    pub fn write_binary_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)
                .map_err(|_| anyhow::anyhow!("invalid hex pair in object id {}", self.0))?;
            writer.write_all(&[byte])?;
        }
        Ok(())
    }

    /// Relative path of the loose object file for this id, split as
    /// `XX/YYYY...` on the first two characters.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Abbreviated form: the first 7 characters, as used in hyperlinks.
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
