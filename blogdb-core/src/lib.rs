//! Shared types for blogdb
//!
//! This crate contains the `Post` row types and the table layout shared
//! between the store library and the command-line tools.

use std::fmt;

use serde::Serialize;

/// Name of the table holding posts
pub const TABLE_NAME: &str = "Post";

/// Expected columns of the `Post` table, in declaration order
pub const COLUMNS: [&str; 6] = ["id", "author", "title", "date", "link", "summary"];

/// Separator used when a post is rendered as a listing line
pub const LINE_DELIMITER: &str = " | ";

/// Persisted post record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub date: String,
    pub link: String,
    pub summary: String,
}

/// Post fields supplied by the caller; the id is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub author: String,
    pub title: String,
    pub date: String,
    pub link: String,
    pub summary: String,
}

impl NewPost {
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        link: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            date: date.into(),
            link: link.into(),
            summary: summary.into(),
        }
    }

    /// Attach the store-assigned id
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            author: self.author,
            title: self.title,
            date: self.date,
            link: self.link,
            summary: self.summary,
        }
    }
}

/// Listing line: `<id> | <author> | <title>`
impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.id, LINE_DELIMITER, self.author, LINE_DELIMITER, self.title
        )
    }
}
