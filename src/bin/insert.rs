//! blog-insert - add one post to the blog store

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use blogdb::cli::StoreArgs;
use blogdb::{AccessMode, Database, NewPost};

/// Insert a single post into the blog store
#[derive(Parser)]
#[command(name = "blog-insert")]
#[command(version)]
#[command(about = "Insert a single post into the blog store", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Post author
    #[arg(allow_hyphen_values = true)]
    author: String,

    /// Post title
    #[arg(allow_hyphen_values = true)]
    title: String,

    /// Publication date (stored as given)
    #[arg(allow_hyphen_values = true)]
    date: String,

    /// Link to the post
    #[arg(allow_hyphen_values = true)]
    link: String,

    /// Short summary
    #[arg(allow_hyphen_values = true)]
    summary: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.store.resolve()?;
    blogdb::logging::init(&config.logging.level);
    debug!("Using store {:?}", config.store.path);

    let post = NewPost::new(cli.author, cli.title, cli.date, cli.link, cli.summary);

    let db = Database::open(&config.store, AccessMode::ReadWrite)?;
    db.insert_post(post)
        .with_context(|| format!("Failed to insert post into {:?}", db.path()))?;
    db.close()?;

    Ok(())
}
