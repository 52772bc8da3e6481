//! Shared types for buckets and store entries
//!
//! The store has no native directories; a delimited listing synthesizes
//! folder entries alongside real file entries. The two are distinguished by
//! a tagged `EntryKind`, never by the shape of the key: a file and a folder
//! may share a display name at the same level.

use serde::{Deserialize, Serialize};

/// A bucket descriptor returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Store-assigned bucket id
    pub id: String,
    /// Bucket name, unique per account
    pub name: String,
}

impl Bucket {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Whether a listing entry is a real file or a synthesized folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    File,
    Folder,
}

/// A single entry from a delimited object listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Full store-relative key; folder entries carry a trailing `/`
    pub key: String,

    /// File or synthesized folder
    pub kind: EntryKind,

    /// Byte length; zero for folder entries
    pub size: u64,

    /// Opaque store object id; empty for folder entries
    pub id: String,
}

impl RemoteEntry {
    /// Create an entry for a file
    pub fn file(key: impl Into<String>, size: u64, id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: EntryKind::File,
            size,
            id: id.into(),
        }
    }

    /// Create an entry for a synthesized folder
    pub fn folder(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: EntryKind::Folder,
            size: 0,
            id: String::new(),
        }
    }

    /// Last path segment of the key, without any trailing slash
    pub fn base_name(&self) -> &str {
        let trimmed = self.key.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }
}

/// One-time upload endpoint and its authorization token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub url: String,
    pub token: String,
}

/// Streaming body for a transfer, owned by the transfer for its duration
pub type ObjectBody = Box<dyn tokio::io::AsyncRead + Send + Unpin>;
