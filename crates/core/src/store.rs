//! ObjectStore trait definition
//!
//! This trait defines the interface the shell requires from the remote
//! store. It decouples the commands from the HTTP adapter so they can be
//! tested against an in-memory implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Bucket, ObjectBody, RemoteEntry, UploadTarget};

/// Interface to the remote object store
///
/// Implemented by the B2 adapter and by in-memory fakes in tests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Authorize the session. Fails with [`crate::Error::Auth`] when the
    /// credentials are rejected; a no-op once authorized.
    async fn authorize(&self, key_id: &str, application_key: &str) -> Result<()>;

    /// List all buckets in the account, in store order
    async fn list_buckets(&self) -> Result<Vec<Bucket>>;

    /// List objects under `prefix` with delimiter `/`
    ///
    /// The delimiter makes the store synthesize a folder entry for the
    /// first path segment beyond the prefix. `prefix` is either empty or
    /// ends with `/`.
    async fn list_objects(&self, bucket_id: &str, prefix: &str) -> Result<Vec<RemoteEntry>>;

    /// Open a ranged download starting at `begin_at`
    ///
    /// `end_at` is the known total length of the object. A `begin_at` of 0
    /// requests the full object with no range restriction.
    async fn download_range(
        &self,
        file_id: &str,
        begin_at: u64,
        end_at: u64,
    ) -> Result<ObjectBody>;

    /// Acquire a one-time upload endpoint for a bucket
    async fn request_upload_target(&self, bucket_id: &str) -> Result<UploadTarget>;

    /// Stream `body` to a previously acquired upload endpoint
    ///
    /// `content_hash` is the lowercase hex digest of the full body, sent as
    /// the integrity header alongside the upload.
    async fn upload_stream(
        &self,
        target: &UploadTarget,
        body: ObjectBody,
        content_length: u64,
        file_name: &str,
        content_hash: &str,
    ) -> Result<()>;
}
