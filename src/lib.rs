//! blogdb - insert and list posts in a SQLite blog store
//!
//! Library side of the `blog-insert` and `blog-select` tools: store access,
//! configuration, logging setup and shared command-line arguments.

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;

pub use blogdb_core::{NewPost, Post};
pub use database::{AccessMode, Database};
pub use error::DatabaseError;
