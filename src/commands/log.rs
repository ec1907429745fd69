use crate::areas::repository::Repository;
use crate::artifacts::log::{LogEntry, LogQuery};
use crate::artifacts::objects::id::ObjectId;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Commit to start from; HEAD when not given.
    pub start: Option<String>,
    /// Restrict the walk to commits where this path's content changed.
    pub path: Option<PathBuf>,
    /// Maximum number of entries to print.
    pub max_count: Option<usize>,
    /// Print one line per entry instead of the full format.
    pub oneline: bool,
}

impl Repository {
    pub fn show_log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        let start = match &opts.start {
            Some(raw) => ObjectId::try_parse(raw.clone())?,
            None => self.resolve_head()?,
        };

        let query = LogQuery {
            start,
            path: opts.path.clone(),
            max_count: opts.max_count,
        };

        for entry in self.log(query)? {
            let entry = entry?;
            self.display_entry(&entry, opts)?;
        }

        Ok(())
    }

    fn display_entry(&self, entry: &LogEntry, opts: &LogOptions) -> anyhow::Result<()> {
        if opts.oneline {
            writeln!(
                self.writer(),
                "{} {}",
                entry.short_oid(),
                entry.commit().short_message()
            )?;
            return Ok(());
        }

        writeln!(self.writer(), "commit {}", entry.oid())?;
        writeln!(self.writer(), "tree {}", entry.tree_oid())?;
        writeln!(
            self.writer(),
            "Author: {}",
            entry.commit().author().display_name()
        )?;
        writeln!(
            self.writer(),
            "Date:   {}",
            entry.commit().author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for line in entry.commit().message().lines() {
            writeln!(self.writer(), "    {}", line)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
