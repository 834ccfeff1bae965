//! Post queries

use rusqlite::{params, Row};
use tracing::{debug, info};

use blogdb_core::{NewPost, Post};

use super::Database;
use crate::error::{DatabaseError, Result};

const INSERT_POST: &str = "INSERT INTO Post VALUES (NULL, ?1, ?2, ?3, ?4, ?5)";

// No ORDER BY: rows come back in whatever order SQLite yields them
const SELECT_POSTS: &str = "SELECT id, author, title, date, link, summary FROM Post";

// NULL text columns (rows written by other tools) read as empty strings
fn row_to_post(row: &Row) -> rusqlite::Result<Post> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(Post {
        id: row.get(0)?,
        author: text(1)?,
        title: text(2)?,
        date: text(3)?,
        link: text(4)?,
        summary: text(5)?,
    })
}

impl Database {
    /// Insert one post and return it with its store-assigned id
    pub fn insert_post(&self, post: NewPost) -> Result<Post> {
        let mut stmt = self
            .conn
            .prepare(INSERT_POST)
            .map_err(DatabaseError::Prepare)?;

        stmt.execute(params![
            post.author,
            post.title,
            post.date,
            post.link,
            post.summary,
        ])
        .map_err(DatabaseError::Execute)?;

        let id = self.conn.last_insert_rowid();
        info!("Inserted post {}", id);
        Ok(post.into_post(id))
    }

    /// Stream every post to `visit`, returning how many rows were visited
    ///
    /// Stops at the first error, whether from the cursor or from `visit`.
    /// The statement and its cursor are released on return.
    pub fn for_each_post<F>(&self, mut visit: F) -> Result<usize>
    where
        F: FnMut(Post) -> Result<()>,
    {
        let mut stmt = self
            .conn
            .prepare(SELECT_POSTS)
            .map_err(DatabaseError::Prepare)?;
        let mut rows = stmt.query([]).map_err(DatabaseError::Execute)?;

        let mut count = 0;
        while let Some(row) = rows.next().map_err(DatabaseError::Iteration)? {
            let post = row_to_post(row).map_err(DatabaseError::Iteration)?;
            visit(post)?;
            count += 1;
        }

        debug!("Listed {} posts", count);
        Ok(count)
    }

    /// Collect every post
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        self.for_each_post(|post| {
            posts.push(post);
            Ok(())
        })?;
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::AccessMode;
    use crate::database::schema::tests::{provision, POST_DDL};

    fn sample() -> NewPost {
        NewPost::new("alice", "hello", "2024-01-01", "http://x", "first post")
    }

    #[test]
    fn insert_then_list_returns_the_post() {
        let dir = tempfile::tempdir().unwrap();
        let config = provision(dir.path(), POST_DDL);

        let db = Database::open(&config, AccessMode::ReadWrite).unwrap();
        let inserted = db.insert_post(sample()).unwrap();
        assert!(inserted.id >= 1);
        db.close().unwrap();

        let db = Database::open(&config, AccessMode::ReadOnly).unwrap();
        let posts = db.list_posts().unwrap();
        assert_eq!(posts, vec![inserted]);
        assert_eq!(posts[0].to_string(), format!("{} | alice | hello", posts[0].id));
    }

    #[test]
    fn sequential_inserts_get_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let config = provision(dir.path(), POST_DDL);
        let db = Database::open(&config, AccessMode::ReadWrite).unwrap();

        let ids: Vec<i64> = (0..5)
            .map(|n| {
                db.insert_post(NewPost::new(format!("author{n}"), "t", "d", "l", "s"))
                    .unwrap()
                    .id
            })
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

        let mut listed: Vec<i64> = db.list_posts().unwrap().iter().map(|p| p.id).collect();
        listed.sort_unstable();
        assert_eq!(listed, ids);
    }

    #[test]
    fn empty_table_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = provision(dir.path(), POST_DDL);
        let db = Database::open(&config, AccessMode::ReadOnly).unwrap();

        let count = db.for_each_post(|_| Ok(())).unwrap();
        assert_eq!(count, 0);
        assert!(db.list_posts().unwrap().is_empty());
    }

    #[test]
    fn values_round_trip_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let config = provision(dir.path(), POST_DDL);
        let db = Database::open(&config, AccessMode::ReadWrite).unwrap();

        let post = NewPost::new("", "a | b", "not a date", "|", "line one\nline two");
        let inserted = db.insert_post(post.clone()).unwrap();

        let listed = db.list_posts().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], post.into_post(inserted.id));
    }

    #[test]
    fn null_text_columns_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = provision(dir.path(), POST_DDL);
        let raw = rusqlite::Connection::open(&config.path).unwrap();
        raw.execute("INSERT INTO Post (author) VALUES ('bob')", []).unwrap();
        drop(raw);

        let db = Database::open(&config, AccessMode::ReadOnly).unwrap();
        let posts = db.list_posts().unwrap();
        assert_eq!(posts[0].author, "bob");
        assert_eq!(posts[0].title, "");
        assert_eq!(posts[0].summary, "");
    }

    #[test]
    fn visitor_error_stops_iteration() {
        let dir = tempfile::tempdir().unwrap();
        let config = provision(dir.path(), POST_DDL);
        let db = Database::open(&config, AccessMode::ReadWrite).unwrap();
        for _ in 0..3 {
            db.insert_post(sample()).unwrap();
        }

        let mut seen = 0;
        let err = db
            .for_each_post(|_| {
                seen += 1;
                Err(DatabaseError::Output(std::io::Error::other("closed")))
            })
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Output(_)));
        assert_eq!(seen, 1);
    }

    #[test]
    fn read_only_store_rejects_inserts() {
        let dir = tempfile::tempdir().unwrap();
        let config = provision(dir.path(), POST_DDL);
        let db = Database::open(&config, AccessMode::ReadOnly).unwrap();

        assert!(db.insert_post(sample()).is_err());
        assert!(db.list_posts().unwrap().is_empty());
    }

    #[test]
    fn non_text_id_is_an_iteration_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = provision(dir.path(), POST_DDL);
        let raw = rusqlite::Connection::open(&config.path).unwrap();
        raw.execute_batch(
            "DROP TABLE Post;
             CREATE TABLE Post (id TEXT, author TEXT, title TEXT, date TEXT, link TEXT, summary TEXT);
             INSERT INTO Post VALUES ('abc', 'a', 't', 'd', 'l', 's');",
        )
        .unwrap();
        drop(raw);

        let db = Database::open(&config, AccessMode::ReadOnly).unwrap();
        let err = db.list_posts().unwrap_err();
        assert!(matches!(err, DatabaseError::Iteration(_)));
    }
}
