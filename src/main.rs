use anyhow::Result;
use clap::{Parser, Subcommand};
use srclink::areas::repository::Repository;
use srclink::commands::log::LogOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "srclink",
    version = "0.1.0",
    about = "Read-only git history resolver for documentation source links",
    long_about = "srclink resolves the pieces of repository history a documentation \
    generator needs to link symbols back to source: the current branch tip, the \
    commits where a file's content last changed, and whether the working copy \
    has drifted from HEAD."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "head",
        about = "Print the resolved branch tip and current branch name"
    )]
    Head,
    #[command(
        name = "log",
        about = "Walk commit history, optionally filtered to one path's content changes"
    )]
    Log {
        #[arg(index = 1, help = "Commit id to start from (defaults to HEAD)")]
        start: Option<String>,
        #[arg(long, help = "Only show commits where this path's content changed")]
        path: Option<PathBuf>,
        #[arg(
            short = 'n',
            long = "max-count",
            help = "Limit the number of entries printed"
        )]
        max_count: Option<usize>,
        #[arg(long, help = "Print one line per entry")]
        oneline: bool,
    },
    #[command(
        name = "dirty",
        about = "Check whether a tracked file differs from the HEAD snapshot"
    )]
    Dirty {
        #[arg(index = 1, help = "Path of the file, relative to the repository root")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pwd = std::env::current_dir()?;
    let repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Head => repository.show_head()?,
        Commands::Log {
            start,
            path,
            max_count,
            oneline,
        } => repository.show_log(&LogOptions {
            start: start.clone(),
            path: path.clone(),
            max_count: *max_count,
            oneline: *oneline,
        })?,
        Commands::Dirty { path } => repository.show_dirty(path)?,
    }

    Ok(())
}
