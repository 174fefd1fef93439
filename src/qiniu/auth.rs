use crate::utils::error::{AdapterError, Result};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;
use std::fmt;

type HmacSha1 = Hmac<Sha1>;

#[derive(Serialize)]
struct PutPolicy<'a> {
    scope: &'a str,
    deadline: i64,
}

/// Access/secret key pair and the signatures derived from it.
#[derive(Clone)]
pub struct Auth {
    access_key: String,
    secret_key: String,
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .finish()
    }
}

impl Auth {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes()).map_err(|e| {
            AdapterError::ConfigError {
                message: format!("Unusable secret key: {}", e),
            }
        })?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// `<access_key>:<urlsafe_base64(hmac_sha1(secret_key, data))>`
    pub fn sign(&self, data: &[u8]) -> Result<String> {
        let digest = self.digest(data)?;
        Ok(format!("{}:{}", self.access_key, URL_SAFE.encode(digest)))
    }

    /// Signs the URL-safe base64 of `data` and appends that encoding.
    pub fn sign_with_data(&self, data: &[u8]) -> Result<String> {
        let encoded = URL_SAFE.encode(data);
        let signature = self.sign(encoded.as_bytes())?;
        Ok(format!("{}:{}", signature, encoded))
    }

    /// Upload token scoped to the whole bucket, valid for `ttl_seconds`.
    pub fn upload_token(&self, bucket: &str, ttl_seconds: u64) -> Result<String> {
        let deadline = i64::try_from(ttl_seconds)
            .ok()
            .and_then(|ttl| Utc::now().timestamp().checked_add(ttl))
            .ok_or_else(|| AdapterError::InvalidConfigValueError {
                field: "upload_token_ttl_seconds".to_string(),
                value: ttl_seconds.to_string(),
                reason: "Token deadline does not fit in a Unix timestamp".to_string(),
            })?;
        self.upload_token_with_deadline(bucket, deadline)
    }

    pub fn upload_token_with_deadline(&self, bucket: &str, deadline: i64) -> Result<String> {
        let policy = serde_json::to_vec(&PutPolicy {
            scope: bucket,
            deadline,
        })?;
        self.sign_with_data(&policy)
    }

    /// `Authorization` header value for a management request without a form body.
    pub fn authorization(&self, path_and_query: &str) -> Result<String> {
        let signing_str = format!("{}\n", path_and_query);
        Ok(format!("QBox {}", self.sign(signing_str.as_bytes())?))
    }
}
