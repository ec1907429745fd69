use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print whether `path` differs from the content recorded at HEAD.
    pub fn show_dirty(&self, path: &Path) -> anyhow::Result<()> {
        if self.is_dirty(path)? {
            writeln!(self.writer(), "dirty")?;
        } else {
            writeln!(self.writer(), "clean")?;
        }

        Ok(())
    }
}
