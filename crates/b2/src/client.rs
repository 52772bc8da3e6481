//! B2 client implementation
//!
//! Wraps reqwest and implements the ObjectStore trait from bsh-core
//! against the native B2 v2 REST API.

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, RANGE};
use tokio::sync::RwLock;
use tokio_util::io::{ReaderStream, StreamReader};

use bsh_core::{Bucket, Error, ObjectBody, ObjectStore, RemoteEntry, Result, UploadTarget};

use crate::types::{
    ApiError, AuthorizeResponse, ListBucketsResponse, ListFileNamesResponse, UploadUrlResponse,
};

/// Endpoint used to authorize an account; every other endpoint comes from
/// the authorization response
pub const DEFAULT_API_BASE: &str = "https://api.backblazeb2.com";

#[derive(Debug, Clone)]
struct AuthState {
    account_id: String,
    token: String,
    api_url: String,
    download_url: String,
}

/// B2 API client
pub struct B2Client {
    http: reqwest::Client,
    base_url: String,
    auth: RwLock<Option<AuthState>>,
}

impl B2Client {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Create a client authorizing against a non-default endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            auth: RwLock::new(None),
        }
    }

    async fn auth(&self) -> Result<AuthState> {
        self.auth
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::General("not authorized".into()))
    }

    /// Best-effort failure reason: the API error message when the body
    /// carries one, the HTTP reason phrase otherwise
    async fn failure_reason(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ApiError>().await {
            Ok(err) if !err.message.is_empty() => err.message,
            _ => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        }
    }

    async fn api_error(response: reqwest::Response) -> Error {
        let status = response.status();
        let reason = Self::failure_reason(response).await;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(reason),
            StatusCode::NOT_FOUND => Error::NotFound(reason),
            _ => Error::Network(reason),
        }
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let auth = self.auth().await?;
        let url = format!("{}/b2api/v2/{endpoint}", auth.api_url);
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &auth.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }
}

impl Default for B2Client {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for B2Client {
    async fn authorize(&self, key_id: &str, application_key: &str) -> Result<()> {
        if self.auth.read().await.is_some() {
            return Ok(());
        }

        let url = format!("{}/b2api/v2/b2_authorize_account", self.base_url);
        let response = self
            .http
            .get(&url)
            .basic_auth(key_id, Some(application_key))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let body: AuthorizeResponse = response
            .json()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        tracing::debug!(api_url = %body.api_url, "authorized");

        *self.auth.write().await = Some(AuthState {
            account_id: body.account_id,
            token: body.authorization_token,
            api_url: body.api_url,
            download_url: body.download_url,
        });

        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let auth = self.auth().await?;
        let response: ListBucketsResponse = self
            .post_json(
                "b2_list_buckets",
                serde_json::json!({ "accountId": auth.account_id }),
            )
            .await?;

        Ok(response.buckets.into_iter().map(Into::into).collect())
    }

    async fn list_objects(&self, bucket_id: &str, prefix: &str) -> Result<Vec<RemoteEntry>> {
        tracing::debug!(bucket_id, prefix, "listing objects");

        let response: ListFileNamesResponse = self
            .post_json(
                "b2_list_file_names",
                serde_json::json!({
                    "bucketId": bucket_id,
                    "prefix": prefix,
                    "delimiter": "/",
                    "maxFileCount": 1000,
                }),
            )
            .await?;

        Ok(response
            .files
            .into_iter()
            .filter_map(|file| file.into_entry())
            .collect())
    }

    async fn download_range(
        &self,
        file_id: &str,
        begin_at: u64,
        end_at: u64,
    ) -> Result<ObjectBody> {
        let auth = self.auth().await?;
        tracing::debug!(file_id, begin_at, end_at, "starting download");

        let url = format!("{}/b2api/v2/b2_download_file_by_id", auth.download_url);
        let mut request = self
            .http
            .get(&url)
            .query(&[("fileId", file_id)])
            .header(AUTHORIZATION, &auth.token);

        if begin_at > 0 {
            request = request.header(RANGE, format!("bytes={begin_at}-"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Transfer(Self::failure_reason(response).await));
        }

        let stream = response
            .bytes_stream()
            .map_err(std::io::Error::other);
        Ok(Box::new(StreamReader::new(Box::pin(stream))))
    }

    async fn request_upload_target(&self, bucket_id: &str) -> Result<UploadTarget> {
        let response: UploadUrlResponse = self
            .post_json(
                "b2_get_upload_url",
                serde_json::json!({ "bucketId": bucket_id }),
            )
            .await?;

        Ok(UploadTarget {
            url: response.upload_url,
            token: response.authorization_token,
        })
    }

    async fn upload_stream(
        &self,
        target: &UploadTarget,
        body: ObjectBody,
        content_length: u64,
        file_name: &str,
        content_hash: &str,
    ) -> Result<()> {
        tracing::debug!(file_name, content_length, "starting upload");

        let response = self
            .http
            .post(&target.url)
            .header(AUTHORIZATION, &target.token)
            .header("X-Bz-File-Name", encode_file_name(file_name))
            .header("X-Bz-Content-Sha1", content_hash.to_lowercase())
            .header(CONTENT_TYPE, "b2/x-auto")
            .header(CONTENT_LENGTH, content_length)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(body)))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Transfer(Self::failure_reason(response).await));
        }

        Ok(())
    }
}

/// Percent-encode each path segment of a file name, keeping `/` as the
/// separator, as the upload header requires
fn encode_file_name(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
