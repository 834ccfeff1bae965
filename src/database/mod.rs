//! Database module for blogdb
//!
//! Handles the SQLite connection to the blog store and the `Post` queries.

mod schema;
mod queries;

pub use schema::{AccessMode, Database};
