pub mod toml_config;

use crate::core::adapter::{
    DEFAULT_LIST_LIMIT, DEFAULT_UPLOAD_TOKEN_TTL_SECONDS, MAX_LIST_LIMIT,
    MAX_UPLOAD_TOKEN_TTL_SECONDS,
};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_bucket_name, validate_domain, validate_non_empty_string, validate_range,
    validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

pub const DEFAULT_RS_HOST: &str = "https://rs.qiniuapi.com";
pub const DEFAULT_RSF_HOST: &str = "https://rsf.qiniuapi.com";
pub const DEFAULT_UP_HOST: &str = "https://upload.qiniup.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_rs_host")]
    pub rs_host: String,
    #[serde(default = "default_rsf_host")]
    pub rsf_host: String,
    #[serde(default = "default_up_host")]
    pub up_host: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            rs_host: default_rs_host(),
            rsf_host: default_rsf_host(),
            up_host: default_up_host(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct QiniuConfig {
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    /// 已綁定到 bucket 的公開網域，讀取走 `http://{domain}/{path}`
    pub domain: String,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default = "default_upload_token_ttl")]
    pub upload_token_ttl_seconds: u64,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    #[serde(default = "default_allow_remote_streams")]
    pub allow_remote_streams: bool,
}

fn default_rs_host() -> String {
    DEFAULT_RS_HOST.to_string()
}

fn default_rsf_host() -> String {
    DEFAULT_RSF_HOST.to_string()
}

fn default_up_host() -> String {
    DEFAULT_UP_HOST.to_string()
}

fn default_upload_token_ttl() -> u64 {
    DEFAULT_UPLOAD_TOKEN_TTL_SECONDS
}

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

fn default_allow_remote_streams() -> bool {
    true
}

impl fmt::Debug for QiniuConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QiniuConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("bucket", &self.bucket)
            .field("domain", &self.domain)
            .field("endpoints", &self.endpoints)
            .field("upload_token_ttl_seconds", &self.upload_token_ttl_seconds)
            .field("list_limit", &self.list_limit)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("allow_remote_streams", &self.allow_remote_streams)
            .finish()
    }
}

impl QiniuConfig {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        bucket: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            bucket: bucket.into(),
            domain: domain.into(),
            endpoints: EndpointConfig::default(),
            upload_token_ttl_seconds: DEFAULT_UPLOAD_TOKEN_TTL_SECONDS,
            list_limit: DEFAULT_LIST_LIMIT,
            request_timeout_seconds: None,
            allow_remote_streams: true,
        }
    }

    /// 從環境變數載入配置
    pub fn from_env() -> Result<Self> {
        let access_key = env::var("QINIU_ACCESS_KEY").ok();
        let secret_key = env::var("QINIU_SECRET_KEY").ok();
        let bucket = env::var("QINIU_BUCKET").ok();
        let domain = env::var("QINIU_DOMAIN").ok();

        let mut config = Self::new(
            validate_required_field("QINIU_ACCESS_KEY", &access_key)?.clone(),
            validate_required_field("QINIU_SECRET_KEY", &secret_key)?.clone(),
            validate_required_field("QINIU_BUCKET", &bucket)?.clone(),
            validate_required_field("QINIU_DOMAIN", &domain)?.clone(),
        );

        if let Ok(host) = env::var("QINIU_RS_HOST") {
            config.endpoints.rs_host = host;
        }
        if let Ok(host) = env::var("QINIU_RSF_HOST") {
            config.endpoints.rsf_host = host;
        }
        if let Ok(host) = env::var("QINIU_UP_HOST") {
            config.endpoints.up_host = host;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for QiniuConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("access_key", &self.access_key)?;
        validate_non_empty_string("secret_key", &self.secret_key)?;
        validate_bucket_name("bucket", &self.bucket)?;
        validate_domain("domain", &self.domain)?;

        validate_url("endpoints.rs_host", &self.endpoints.rs_host)?;
        validate_url("endpoints.rsf_host", &self.endpoints.rsf_host)?;
        validate_url("endpoints.up_host", &self.endpoints.up_host)?;

        validate_range("list_limit", self.list_limit, 1, MAX_LIST_LIMIT)?;
        validate_range(
            "upload_token_ttl_seconds",
            self.upload_token_ttl_seconds,
            1,
            MAX_UPLOAD_TOKEN_TTL_SECONDS,
        )?;

        Ok(())
    }
}
