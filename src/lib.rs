//! Filesystem-style adapter over a single Qiniu object-storage bucket.
//!
//! ```rust,no_run
//! use qiniu_adapter::{Filesystem, HttpQiniuAdapter, QiniuConfig, WriteConfig};
//!
//! # async fn run() -> qiniu_adapter::Result<()> {
//! let config = QiniuConfig::from_env()?;
//! let adapter = HttpQiniuAdapter::from_config(&config)?;
//!
//! adapter.write("docs/readme.txt", b"hello", &WriteConfig::default()).await?;
//! let listed = adapter.list_contents("docs/", false).await?;
//! # let _ = listed;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod qiniu;
pub mod utils;

pub use crate::config::{EndpointConfig, QiniuConfig};
pub use crate::core::adapter::QiniuAdapter;
pub use crate::domain::model::{
    EntryType, FileMetadata, ReadResponse, ReadStream, Visibility, WriteConfig, WriteResponse,
};
pub use crate::domain::ports::{BucketManager, Filesystem, Uploader};
pub use crate::qiniu::{Auth, HttpBucketManager, HttpQiniuAdapter, HttpUploadManager};
pub use crate::utils::error::{AdapterError, Result};
