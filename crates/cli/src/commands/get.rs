//! get command - Download a file from the current position
//!
//! Downloads stream to the local working directory while a progress loop
//! samples the write position. A partial local file can be resumed: the
//! ranged fetch then begins at its current length and the remainder is
//! appended. An interrupt cancels cooperatively, leaving the partial file
//! behind for a later resume.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use bsh_core::{
    Console, CountingWriter, EntryKind, ObjectBody, ObjectStore, ProgressCounter, Result, Session,
};

use super::Command;
use super::transfer::{InterruptGuard, transfer_tokens};

pub struct Get {
    store: Arc<dyn ObjectStore>,
    console: Arc<dyn Console>,
}

impl Get {
    pub fn new(store: Arc<dyn ObjectStore>, console: Arc<dyn Console>) -> Self {
        Self { store, console }
    }
}

#[async_trait]
impl Command for Get {
    fn name(&self) -> &'static str {
        "get"
    }

    async fn run(&self, session: &mut Session, args: &str) -> Result<()> {
        let Some(bucket) = session.bucket() else {
            self.console
                .write_line("You must be in a bucket to download files");
            return Ok(());
        };

        let prefix = session.prefix();
        let entries = self.store.list_objects(&bucket.id, &prefix).await?;

        let full_key = format!("{prefix}{args}");
        let Some(file) = entries.iter().find(|entry| {
            entry.kind == EntryKind::File && entry.key.eq_ignore_ascii_case(&full_key)
        }) else {
            self.console.write_line(&format!("File {args} not found"));
            return Ok(());
        };

        let file_name = file.base_name().to_string();
        let local_path = session.local_dir().join(&file_name);

        let mut resume_offset = 0u64;
        if local_path.exists()
            && self
                .console
                .confirm("File already exists. Do you want to resume?")
        {
            resume_offset = tokio::fs::metadata(&local_path).await?.len();
        }

        let body = match self
            .store
            .download_range(&file.id, resume_offset, file.size)
            .await
        {
            Ok(body) => body,
            Err(err) => {
                self.console
                    .write_line(&format!("Error downloading file: {err}"));
                return Ok(());
            }
        };

        // A resumed download appends to the partial file; a fresh one
        // starts the file over
        let local_file = if resume_offset > 0 {
            tokio::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&local_path)
                .await?
        } else {
            tokio::fs::File::create(&local_path).await?
        };

        let position = ProgressCounter::starting_at(resume_offset);
        let writer = CountingWriter::new(local_file, position.clone());
        let (cancel, stop) = transfer_tokens();

        let copy = tokio::spawn(copy_to_file(
            body,
            writer,
            cancel.clone(),
            stop.clone(),
        ));

        let _interrupt = InterruptGuard::new(&cancel);
        self.console
            .transfer_progress(&file_name, file.size, position, stop)
            .await;

        let outcome = copy.await;
        if cancel.is_cancelled() {
            self.console.write_line("Download cancelled.");
        } else {
            match outcome {
                Ok(Ok(())) => self.console.write_line("Download complete"),
                Ok(Err(err)) => self
                    .console
                    .write_line(&format!("Error downloading file: {err}")),
                Err(err) => self
                    .console
                    .write_line(&format!("Error downloading file: {err}")),
            }
        }

        Ok(())
    }
}

/// Copy the response body into the local file until it ends or the
/// transfer is cancelled, then release the progress loop
async fn copy_to_file(
    mut body: ObjectBody,
    mut writer: CountingWriter<tokio::fs::File>,
    cancel: CancellationToken,
    stop: CancellationToken,
) -> std::io::Result<()> {
    let result = tokio::select! {
        result = tokio::io::copy(&mut body, &mut writer) => result.map(|_| ()),
        // Cooperative stop: the partial file stays behind for a resume
        _ = cancel.cancelled() => Ok(()),
    };
    let flushed = writer.shutdown().await;
    stop.cancel();
    result.and(flushed)
}
