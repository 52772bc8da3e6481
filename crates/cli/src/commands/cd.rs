//! cd command - Move within the virtual hierarchy
//!
//! `..` ascends one level; any other target descends into a bucket (at
//! the store root) or a folder (inside a bucket). The store has no real
//! directories, so descent resolves against a delimited listing and only
//! folder-kind entries qualify.

use std::sync::Arc;

use async_trait::async_trait;
use bsh_core::{Console, EntryKind, ObjectStore, Result, Session};

use super::Command;

pub struct Cd {
    store: Arc<dyn ObjectStore>,
    console: Arc<dyn Console>,
}

impl Cd {
    pub fn new(store: Arc<dyn ObjectStore>, console: Arc<dyn Console>) -> Self {
        Self { store, console }
    }

    /// Bucket names match exactly, case-sensitively
    async fn enter_bucket(&self, session: &mut Session, name: &str) -> Result<()> {
        let buckets = self.store.list_buckets().await?;
        match buckets.into_iter().find(|bucket| bucket.name == name) {
            Some(bucket) => session.enter_bucket(bucket),
            None => self
                .console
                .write_line(&format!("Bucket {name} does not exist")),
        }
        Ok(())
    }

    /// Folder keys match case-insensitively on the full prefixed key,
    /// including the trailing slash, so a file sharing the display name
    /// never satisfies a descent
    async fn enter_directory(&self, session: &mut Session, name: &str) -> Result<()> {
        let Some(bucket) = session.bucket() else {
            return Ok(());
        };

        let prefix = session.prefix();
        let entries = self.store.list_objects(&bucket.id, &prefix).await?;

        let full_key = format!("{prefix}{name}/");
        let found = entries.iter().find(|entry| {
            entry.kind == EntryKind::Folder && entry.key.eq_ignore_ascii_case(&full_key)
        });

        match found {
            Some(folder) => {
                let key = folder.key.clone();
                session.enter_folder(&key);
            }
            None => self
                .console
                .write_line(&format!("Directory {name} does not exist")),
        }
        Ok(())
    }
}

#[async_trait]
impl Command for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn run(&self, session: &mut Session, args: &str) -> Result<()> {
        if args == ".." {
            session.ascend();
            return Ok(());
        }

        // At the store root the target names a bucket
        if session.bucket().is_none() {
            return self.enter_bucket(session, args).await;
        }

        self.enter_directory(session, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{FakeStore, RecordingConsole};
    use bsh_core::{Bucket, RemoteEntry};
    use std::path::PathBuf;

    fn session() -> Session {
        Session::new(PathBuf::from("/tmp"))
    }

    fn command(store: FakeStore) -> (Cd, Arc<RecordingConsole>) {
        let console = Arc::new(RecordingConsole::new());
        (Cd::new(Arc::new(store), console.clone()), console)
    }

    #[tokio::test]
    async fn test_from_root_no_buckets() {
        let (cd, console) = command(FakeStore::new());
        let mut session = session();

        cd.run(&mut session, "bucket").await.unwrap();

        assert_eq!(console.lines(), vec!["Bucket bucket does not exist"]);
        assert!(session.bucket().is_none());
        assert_eq!(session.path(), "");
    }

    #[tokio::test]
    async fn test_from_root_bucket_found() {
        let (cd, _console) = command(FakeStore::with_buckets(vec![Bucket::new("id1", "bucket")]));
        let mut session = session();

        cd.run(&mut session, "bucket").await.unwrap();

        assert_eq!(session.bucket().unwrap().name, "bucket");
        assert_eq!(session.path(), "");
    }

    #[tokio::test]
    async fn test_bucket_match_is_case_sensitive() {
        let (cd, console) = command(FakeStore::with_buckets(vec![Bucket::new("id1", "Bucket")]));
        let mut session = session();

        cd.run(&mut session, "bucket").await.unwrap();

        assert_eq!(console.lines(), vec!["Bucket bucket does not exist"]);
        assert!(session.bucket().is_none());
    }

    #[tokio::test]
    async fn test_from_root_ascend_is_noop() {
        let (cd, _console) = command(FakeStore::with_buckets(vec![Bucket::new("id1", "bucket")]));
        let mut session = session();

        cd.run(&mut session, "..").await.unwrap();

        assert!(session.bucket().is_none());
        assert_eq!(session.path(), "");
    }

    #[tokio::test]
    async fn test_from_bucket_root_ascend_leaves_bucket() {
        let (cd, _console) = command(FakeStore::new());
        let mut session = session();
        session.enter_bucket(Bucket::new("id1", "bucket"));

        cd.run(&mut session, "..").await.unwrap();

        assert!(session.bucket().is_none());
        assert_eq!(session.path(), "");
    }

    #[tokio::test]
    async fn test_from_nested_directory_ascend() {
        let (cd, _console) = command(FakeStore::new());
        let mut session = session();
        session.enter_bucket(Bucket::new("id1", "bucket"));
        session.enter_folder("one/two/");

        cd.run(&mut session, "..").await.unwrap();

        assert_eq!(session.bucket().unwrap().name, "bucket");
        assert_eq!(session.path(), "one");
    }

    #[tokio::test]
    async fn test_directory_not_found() {
        let (cd, console) = command(FakeStore::new());
        let mut session = session();
        session.enter_bucket(Bucket::new("id1", "bucket"));
        session.enter_folder("one/");

        cd.run(&mut session, "two").await.unwrap();

        assert_eq!(console.lines(), vec!["Directory two does not exist"]);
        assert_eq!(session.path(), "one");
    }

    #[tokio::test]
    async fn test_file_does_not_satisfy_a_descent() {
        let store = FakeStore::with_entries(vec![RemoteEntry::file("one/two", 123, "f1")]);
        let (cd, console) = command(store);
        let mut session = session();
        session.enter_bucket(Bucket::new("id1", "bucket"));
        session.enter_folder("one/");

        cd.run(&mut session, "two").await.unwrap();

        assert_eq!(console.lines(), vec!["Directory two does not exist"]);
        assert_eq!(session.path(), "one");
    }

    #[tokio::test]
    async fn test_directory_found() {
        let store = FakeStore::with_entries(vec![RemoteEntry::folder("one/two/")]);
        let (cd, _console) = command(store);
        let mut session = session();
        session.enter_bucket(Bucket::new("id1", "bucket"));
        session.enter_folder("one/");

        cd.run(&mut session, "two").await.unwrap();

        assert_eq!(session.bucket().unwrap().name, "bucket");
        assert_eq!(session.path(), "one/two");
    }

    #[tokio::test]
    async fn test_directory_match_is_case_insensitive() {
        let store = FakeStore::with_entries(vec![RemoteEntry::folder("one/Two/")]);
        let (cd, _console) = command(store);
        let mut session = session();
        session.enter_bucket(Bucket::new("id1", "bucket"));
        session.enter_folder("one/");

        cd.run(&mut session, "two").await.unwrap();

        // The path takes the casing stored by the store
        assert_eq!(session.path(), "one/Two");
    }

    #[tokio::test]
    async fn test_descent_queries_with_trailing_slash_prefix() {
        let store = FakeStore::with_entries(vec![RemoteEntry::folder("one/two/")]);
        let console = Arc::new(RecordingConsole::new());
        let store = Arc::new(store);
        let cd = Cd::new(store.clone(), console);
        let mut session = session();
        session.enter_bucket(Bucket::new("id1", "bucket"));
        session.enter_folder("one/");

        cd.run(&mut session, "two").await.unwrap();

        assert_eq!(*store.listed_prefixes.lock().unwrap(), vec!["one/"]);
    }
}
