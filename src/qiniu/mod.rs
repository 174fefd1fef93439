//! HTTP clients for the Qiniu object-management and upload APIs.

pub mod auth;
pub mod bucket_manager;
pub mod upload_manager;

use crate::config::QiniuConfig;
use crate::core::adapter::QiniuAdapter;
use crate::utils::error::{AdapterError, Result};
use crate::utils::validation::Validate;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub use auth::Auth;
pub use bucket_manager::HttpBucketManager;
pub use upload_manager::HttpUploadManager;

/// Status the management API uses for "no such file or directory".
pub const STATUS_NO_SUCH_ENTRY: u16 = 612;

pub type HttpQiniuAdapter = QiniuAdapter<HttpBucketManager, HttpUploadManager>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `urlsafe_base64("<bucket>:<key>")`, the object address used in management paths.
pub fn encode_entry(bucket: &str, key: &str) -> String {
    URL_SAFE.encode(format!("{}:{}", bucket, key))
}

/// Passes successful responses through and turns the rest into errors.
pub(crate) async fn check_response(response: Response, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND || status.as_u16() == STATUS_NO_SUCH_ENTRY {
        return Err(AdapterError::NotFound {
            path: path.to_string(),
        });
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or(body)
        });

    Err(AdapterError::ServiceError {
        status: status.as_u16(),
        message,
    })
}

impl HttpQiniuAdapter {
    /// Builds an adapter whose clients share one HTTP connection pool.
    pub fn from_config(config: &QiniuConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        let auth = Auth::new(&config.access_key, &config.secret_key);
        let bucket_manager = HttpBucketManager::new(
            client.clone(),
            auth.clone(),
            &config.endpoints.rs_host,
            &config.endpoints.rsf_host,
        );
        let uploader = HttpUploadManager::new(client.clone(), &config.endpoints.up_host);

        tracing::info!(
            "Qiniu adapter ready for bucket {} (public domain {})",
            config.bucket,
            config.domain
        );

        Ok(QiniuAdapter::new(
            auth,
            &config.bucket,
            &config.domain,
            bucket_manager,
            uploader,
            client,
        )
        .with_upload_token_ttl(config.upload_token_ttl_seconds)
        .with_list_limit(config.list_limit)
        .with_remote_streams(config.allow_remote_streams))
    }
}
