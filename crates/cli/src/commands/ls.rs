//! ls command - List the current position
//!
//! At the store root, one line per bucket. Inside a bucket, a two-column
//! table of files (size, name) then folders (`-`, name/), each group in
//! store order.

use std::sync::Arc;

use async_trait::async_trait;
use bsh_core::{Console, EntryKind, ObjectStore, Result, Session};

use super::Command;

pub struct Ls {
    store: Arc<dyn ObjectStore>,
    console: Arc<dyn Console>,
}

impl Ls {
    pub fn new(store: Arc<dyn ObjectStore>, console: Arc<dyn Console>) -> Self {
        Self { store, console }
    }

    async fn list_buckets(&self) -> Result<()> {
        for bucket in self.store.list_buckets().await? {
            self.console.write_line(&bucket.name);
        }
        Ok(())
    }

    async fn list_entries(&self, bucket_id: &str, prefix: &str) -> Result<()> {
        let entries = self.store.list_objects(bucket_id, prefix).await?;

        // An empty bucket root renders nothing at all; an empty
        // sub-directory still renders the header row
        if entries.is_empty() && prefix.is_empty() {
            return Ok(());
        }

        let mut rows = vec![vec!["Size".to_string(), "Name".to_string()]];

        for entry in entries.iter().filter(|e| e.kind == EntryKind::File) {
            rows.push(vec![
                humansize::format_size(entry.size, humansize::BINARY),
                entry.base_name().to_string(),
            ]);
        }

        for entry in entries.iter().filter(|e| e.kind == EntryKind::Folder) {
            rows.push(vec!["-".to_string(), format!("{}/", entry.base_name())]);
        }

        self.console.write_table(&rows);
        Ok(())
    }
}

#[async_trait]
impl Command for Ls {
    fn name(&self) -> &'static str {
        "ls"
    }

    async fn run(&self, session: &mut Session, _args: &str) -> Result<()> {
        // The store root is a special case: buckets, not objects
        let Some(bucket) = session.bucket() else {
            return self.list_buckets().await;
        };

        self.list_entries(&bucket.id, &session.prefix()).await
    }
}
