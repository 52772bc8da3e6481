//! Wire types for the B2 v2 REST API

use bsh_core::{Bucket, RemoteEntry};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorizeResponse {
    pub account_id: String,
    pub authorization_token: String,
    pub api_url: String,
    pub download_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListBucketsResponse {
    pub buckets: Vec<BucketInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BucketInfo {
    pub bucket_id: String,
    pub bucket_name: String,
}

impl From<BucketInfo> for Bucket {
    fn from(info: BucketInfo) -> Self {
        Bucket::new(info.bucket_id, info.bucket_name)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListFileNamesResponse {
    pub files: Vec<FileInfo>,
}

/// A single entry from `b2_list_file_names`
///
/// `action` distinguishes finished files (`upload`) from folder entries
/// synthesized by the delimiter (`folder`); other markers denote
/// unfinished large files. `fileId` is absent for folder entries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileInfo {
    pub file_name: String,
    #[serde(default)]
    pub content_length: u64,
    #[serde(default)]
    pub file_id: Option<String>,
    pub action: String,
}

impl FileInfo {
    /// Map to a listing entry; `None` for unfinished large files
    pub fn into_entry(self) -> Option<RemoteEntry> {
        match self.action.as_str() {
            "upload" => Some(RemoteEntry::file(
                self.file_name,
                self.content_length,
                self.file_id.unwrap_or_default(),
            )),
            "folder" => Some(RemoteEntry::folder(self.file_name)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadUrlResponse {
    pub upload_url: String,
    pub authorization_token: String,
}

/// Error body returned by the API on non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub message: String,
}
