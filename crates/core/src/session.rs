//! Session navigation state
//!
//! The shell's position in the virtual hierarchy: an optional current
//! bucket and a relative path within it. All transitions go through the
//! methods here, which maintain the invariant that the path is empty
//! whenever no bucket is selected.

use std::path::{Path, PathBuf};

use crate::types::Bucket;

/// The current position in the virtual hierarchy
///
/// Created once per shell session and mutated only by `cd`.
#[derive(Debug, Clone)]
pub struct Session {
    current_bucket: Option<Bucket>,
    /// Relative to the current bucket; no leading or trailing slash,
    /// empty at bucket root
    current_path: String,
    local_dir: PathBuf,
}

impl Session {
    /// Start a session at the store root
    pub fn new(local_dir: PathBuf) -> Self {
        Self {
            current_bucket: None,
            current_path: String::new(),
            local_dir,
        }
    }

    pub fn bucket(&self) -> Option<&Bucket> {
        self.current_bucket.as_ref()
    }

    pub fn path(&self) -> &str {
        &self.current_path
    }

    /// Local working directory for `lls`, `lpwd` and download targets
    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    /// Listing prefix for the current position: `path/`, or empty at
    /// bucket root
    pub fn prefix(&self) -> String {
        if self.current_path.is_empty() {
            String::new()
        } else {
            format!("{}/", self.current_path)
        }
    }

    /// Position as shown in the prompt: empty at the store root, the
    /// bucket name at bucket root, `bucket/path` below
    pub fn location(&self) -> String {
        let mut location = String::new();
        if let Some(bucket) = &self.current_bucket {
            location.push_str(&bucket.name);
        }
        if !self.current_path.is_empty() {
            location.push('/');
            location.push_str(&self.current_path);
        }
        location
    }

    /// Descend from the store root into a bucket
    pub fn enter_bucket(&mut self, bucket: Bucket) {
        self.current_bucket = Some(bucket);
        self.current_path.clear();
    }

    /// Descend into a folder, identified by its full key
    ///
    /// The path takes the key's stored casing, trailing slash stripped.
    pub fn enter_folder(&mut self, folder_key: &str) {
        self.current_path = folder_key.trim_end_matches('/').to_string();
    }

    /// Ascend one level: drop the last path segment, leave the bucket at
    /// bucket root, no-op at the store root
    pub fn ascend(&mut self) {
        if self.current_bucket.is_none() {
            return;
        }

        if self.current_path.is_empty() {
            self.current_bucket = None;
        } else {
            self.current_path = match self.current_path.rsplit_once('/') {
                Some((parent, _)) => parent.to_string(),
                None => String::new(),
            };
        }
    }
}
