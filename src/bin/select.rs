//! blog-select - list every post in the blog store

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use blogdb::cli::{OutputFormat, StoreArgs};
use blogdb::{AccessMode, Database};

/// List the posts in the blog store
#[derive(Parser)]
#[command(name = "blog-select")]
#[command(version)]
#[command(about = "List the posts in the blog store", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.store.resolve()?;
    blogdb::logging::init(&config.logging.level);
    debug!("Using store {:?}", config.store.path);

    let db = Database::open(&config.store, AccessMode::ReadOnly)?;

    match write_posts(&db, cli.format) {
        // Reader went away (e.g. `| head`): stop quietly
        Err(err) if is_broken_pipe(&err) => debug!("Output closed early"),
        result => result?,
    }

    db.close()?;

    Ok(())
}

fn write_posts(db: &Database, format: OutputFormat) -> Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());

    match format {
        OutputFormat::Text => print_lines(db, &mut out)?,
        OutputFormat::Json => print_json(db, &mut out)?,
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}

/// Whether any cause in the chain is a write to a closed pipe
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        let kind = cause
            .downcast_ref::<io::Error>()
            .map(io::Error::kind)
            .or_else(|| {
                cause
                    .downcast_ref::<serde_json::Error>()
                    .and_then(serde_json::Error::io_error_kind)
            });
        kind == Some(io::ErrorKind::BrokenPipe)
    })
}

/// Print `<id> | <author> | <title>` per post as rows are read
fn print_lines(db: &Database, out: &mut impl Write) -> Result<()> {
    db.for_each_post(|post| {
        writeln!(out, "{}", post)?;
        Ok(())
    })
    .with_context(|| format!("Failed to list posts from {:?}", db.path()))?;
    Ok(())
}

/// Print all posts, every column, as one JSON array
fn print_json(db: &Database, out: &mut impl Write) -> Result<()> {
    let posts = db
        .list_posts()
        .with_context(|| format!("Failed to list posts from {:?}", db.path()))?;
    serde_json::to_writer_pretty(&mut *out, &posts).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}
