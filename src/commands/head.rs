use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the resolved branch tip and, when not detached, the branch
    /// name a formatter would substitute for dirty files.
    pub fn show_head(&self) -> anyhow::Result<()> {
        let info = self.head_info()?;

        writeln!(self.writer(), "{}", info.oid)?;
        match info.branch {
            Some(branch) => writeln!(self.writer(), "branch {}", branch)?,
            None => writeln!(self.writer(), "detached")?,
        }

        Ok(())
    }
}
