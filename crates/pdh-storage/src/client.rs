//! Object storage API client (Supabase-compatible `/storage/v1`).

use std::time::Duration;

use pdh_config::StorageConfig;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::upload::PhotoUpload;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Size cap applied to the bucket itself.
pub const BUCKET_FILE_SIZE_LIMIT: u64 = 5 * 1024 * 1024;

pub const BUCKET_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

#[derive(Debug, Deserialize)]
struct BucketEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateBucket<'a> {
    id: &'a str,
    name: &'a str,
    public: bool,
    file_size_limit: u64,
    allowed_mime_types: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Whether [`StorageClient::ensure_bucket`] had to create the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    Existing,
    Created,
}

#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl StorageClient {
    /// # Errors
    ///
    /// [`StorageError::NotConfigured`] without a URL and service key.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if !config.is_configured() {
            return Err(StorageError::NotConfigured);
        }
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
            bucket: config.bucket.clone(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(path)
        )
    }

    /// URL under which a stored object is publicly readable.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(path)
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }

    /// Store a validated photo and return its public URL.
    ///
    /// # Errors
    ///
    /// [`StorageError::Provider`] when the storage API refuses the object.
    pub async fn upload_photo(
        &self,
        user_id: &str,
        upload: PhotoUpload,
    ) -> Result<String, StorageError> {
        let path = upload.object_path(user_id, chrono::Utc::now().timestamp());
        tracing::info!(bucket = %self.bucket, %path, size = upload.bytes.len(), "uploading persona photo");
        let resp = self
            .authorized(self.http.post(self.object_url(&path)))
            .header(reqwest::header::CONTENT_TYPE, upload.content_type)
            .body(upload.bytes)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(self.public_url(&path))
    }

    /// Create the bucket as public with an image-only allow-list if it does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// [`StorageError::Provider`] when listing or creating buckets fails.
    pub async fn ensure_bucket(&self) -> Result<BucketStatus, StorageError> {
        let url = format!("{}/storage/v1/bucket", self.base_url);
        let resp = self.authorized(self.http.get(&url)).send().await?;
        let buckets: Vec<BucketEntry> = check_response(resp).await?.json().await?;
        if bucket_listed(&buckets, &self.bucket) {
            tracing::info!(bucket = %self.bucket, "bucket already exists");
            return Ok(BucketStatus::Existing);
        }

        let body = CreateBucket {
            id: &self.bucket,
            name: &self.bucket,
            public: true,
            file_size_limit: BUCKET_FILE_SIZE_LIMIT,
            allowed_mime_types: &BUCKET_MIME_TYPES,
        };
        let resp = self.authorized(self.http.post(&url)).json(&body).send().await?;
        check_response(resp).await?;
        tracing::info!(bucket = %self.bucket, "bucket created");
        Ok(BucketStatus::Created)
    }
}

fn bucket_listed(buckets: &[BucketEntry], bucket: &str) -> bool {
    buckets
        .iter()
        .any(|b| b.name.as_deref() == Some(bucket) || b.id.as_deref() == Some(bucket))
}

async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<StorageErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or(body);
    Err(StorageError::Provider {
        status: status.as_u16(),
        message,
    })
}
