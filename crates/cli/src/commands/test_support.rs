//! In-memory store and console fakes shared by the command tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;

use bsh_core::{
    Bucket, Console, Error, ObjectBody, ObjectStore, ProgressCounter, RemoteEntry, Result,
    UploadTarget,
};

/// An upload recorded by [`FakeStore::upload_stream`]
pub(crate) struct RecordedUpload {
    pub file_name: String,
    pub content_hash: String,
    pub content_length: u64,
    pub content: Vec<u8>,
}

/// In-memory ObjectStore serving preconfigured buckets, entries and one
/// object body, recording every call the commands make
#[derive(Default)]
pub(crate) struct FakeStore {
    pub buckets: Vec<Bucket>,
    pub entries: Vec<RemoteEntry>,
    pub object_data: Vec<u8>,
    auth_failures: AtomicU32,
    pub listed_prefixes: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<(String, u64, u64)>>,
    pub uploads: Mutex<Vec<RecordedUpload>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(buckets: Vec<Bucket>) -> Self {
        Self {
            buckets,
            ..Self::default()
        }
    }

    pub fn with_entries(entries: Vec<RemoteEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn with_object(entries: Vec<RemoteEntry>, object_data: Vec<u8>) -> Self {
        Self {
            entries,
            object_data,
            ..Self::default()
        }
    }

    /// Reject the next `count` authorization attempts
    pub fn failing_authorizations(self, count: u32) -> Self {
        self.auth_failures.store(count, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn authorize(&self, _key_id: &str, _application_key: &str) -> Result<()> {
        if self.auth_failures.load(Ordering::SeqCst) > 0 {
            self.auth_failures.fetch_sub(1, Ordering::SeqCst);
            return Err(Error::Auth("invalid credentials".into()));
        }
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        Ok(self.buckets.clone())
    }

    async fn list_objects(&self, _bucket_id: &str, prefix: &str) -> Result<Vec<RemoteEntry>> {
        self.listed_prefixes.lock().unwrap().push(prefix.to_string());
        Ok(self.entries.clone())
    }

    async fn download_range(
        &self,
        file_id: &str,
        begin_at: u64,
        end_at: u64,
    ) -> Result<ObjectBody> {
        self.downloads
            .lock()
            .unwrap()
            .push((file_id.to_string(), begin_at, end_at));
        let data = self.object_data[begin_at as usize..].to_vec();
        Ok(Box::new(std::io::Cursor::new(data)))
    }

    async fn request_upload_target(&self, _bucket_id: &str) -> Result<UploadTarget> {
        Ok(UploadTarget {
            url: "https://upload.test/one-time".into(),
            token: "upload-token".into(),
        })
    }

    async fn upload_stream(
        &self,
        _target: &UploadTarget,
        mut body: ObjectBody,
        content_length: u64,
        file_name: &str,
        content_hash: &str,
    ) -> Result<()> {
        let mut content = Vec::new();
        body.read_to_end(&mut content).await?;
        self.uploads.lock().unwrap().push(RecordedUpload {
            file_name: file_name.to_string(),
            content_hash: content_hash.to_string(),
            content_length,
            content,
        });
        Ok(())
    }
}

/// Console fake recording lines and tables, with scripted prompt answers
#[derive(Default)]
pub(crate) struct RecordingConsole {
    lines: Mutex<Vec<String>>,
    tables: Mutex<Vec<Vec<Vec<String>>>>,
    confirm_answer: AtomicBool,
    answers: Mutex<VecDeque<String>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn tables(&self) -> Vec<Vec<Vec<String>>> {
        self.tables.lock().unwrap().clone()
    }

    pub fn answer_confirms_with(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn queue_answer(&self, answer: &str) {
        self.answers.lock().unwrap().push_back(answer.to_string());
    }
}

#[async_trait]
impl Console for RecordingConsole {
    fn write_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }

    fn write_table(&self, rows: &[Vec<String>]) {
        self.tables.lock().unwrap().push(rows.to_vec());
    }

    fn confirm(&self, _prompt: &str) -> bool {
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn ask(&self, _prompt: &str) -> String {
        self.answers.lock().unwrap().pop_front().unwrap_or_default()
    }

    async fn transfer_progress(
        &self,
        _label: &str,
        total: u64,
        position: ProgressCounter,
        stop: CancellationToken,
    ) {
        loop {
            if stop.is_cancelled() || position.get() >= total {
                break;
            }
            tokio::select! {
                _ = stop.cancelled() => break,
                _ = tokio::time::sleep(Duration::from_millis(1)) => {}
            }
        }
    }
}
