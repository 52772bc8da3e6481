//! put command - Upload a local file to the current position
//!
//! The file is hashed in full before the transfer so the digest can
//! accompany the upload as an integrity header, then the handle is
//! rewound and streamed through a counting reader that feeds the
//! progress loop. The extra read buys cancel-ability and progress
//! visibility during the network phase.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use sha1::{Digest, Sha1};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use bsh_core::{
    Console, CountingReader, ObjectBody, ObjectStore, ProgressCounter, Result, Session,
};

use super::Command;
use super::transfer::{InterruptGuard, transfer_tokens};

pub struct Put {
    store: Arc<dyn ObjectStore>,
    console: Arc<dyn Console>,
}

impl Put {
    pub fn new(store: Arc<dyn ObjectStore>, console: Arc<dyn Console>) -> Self {
        Self { store, console }
    }
}

#[async_trait]
impl Command for Put {
    fn name(&self) -> &'static str {
        "put"
    }

    async fn run(&self, session: &mut Session, args: &str) -> Result<()> {
        let Some(bucket) = session.bucket() else {
            self.console
                .write_line("You must be in a bucket to download files");
            return Ok(());
        };

        let local_path = Path::new(args);
        if !local_path.is_file() {
            self.console.write_line(&format!("File {args} not found"));
            return Ok(());
        }

        let total = tokio::fs::metadata(local_path).await?.len();
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.to_string());

        // Hash pass over the whole file first, then rewind the same
        // handle for the transfer
        let mut file = tokio::fs::File::open(local_path).await?;
        let content_hash = sha1_digest(&mut file).await?;
        file.rewind().await?;

        let remote_key = format!("{}{}", session.prefix(), file_name);

        let target = self.store.request_upload_target(&bucket.id).await?;

        let position = ProgressCounter::new();
        let body: ObjectBody = Box::new(CountingReader::new(file, position.clone()));
        let (cancel, stop) = transfer_tokens();

        let upload = tokio::spawn({
            let store = self.store.clone();
            let cancel = cancel.clone();
            let stop = stop.clone();
            let content_hash = content_hash.clone();
            async move {
                let result = tokio::select! {
                    result = store.upload_stream(&target, body, total, &remote_key, &content_hash) => result,
                    _ = cancel.cancelled() => Ok(()),
                };
                stop.cancel();
                result
            }
        });

        let _interrupt = InterruptGuard::new(&cancel);
        self.console
            .transfer_progress(&file_name, total, position, stop)
            .await;

        let outcome = upload.await;
        if cancel.is_cancelled() {
            self.console.write_line("Upload cancelled.");
        } else {
            match outcome {
                Ok(Ok(())) => self.console.write_line("Upload complete"),
                Ok(Err(err)) => self
                    .console
                    .write_line(&format!("Error uploading file: {err}")),
                Err(err) => self
                    .console
                    .write_line(&format!("Error uploading file: {err}")),
            }
        }

        Ok(())
    }
}

/// Lowercase hex SHA-1 of the remaining file content
async fn sha1_digest(file: &mut tokio::fs::File) -> std::io::Result<String> {
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}
