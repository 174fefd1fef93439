use crate::core::normalize::normalize_file_info;
use crate::core::public_read::PublicReader;
use crate::domain::model::{
    FileMetadata, ReadResponse, ReadStream, Visibility, WriteConfig, WriteResponse,
};
use crate::domain::ports::{BucketManager, Filesystem, Uploader};
use crate::qiniu::auth::Auth;
use crate::utils::error::{AdapterError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::io::{AsyncRead, AsyncReadExt};

pub const DEFAULT_UPLOAD_TOKEN_TTL_SECONDS: u64 = 3600;
pub const MAX_UPLOAD_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 3600;
/// 列表 API 單頁上限
pub const MAX_LIST_LIMIT: usize = 1000;
pub const DEFAULT_LIST_LIMIT: usize = MAX_LIST_LIMIT;

/// Filesystem adapter bound to a single Qiniu bucket.
///
/// Object management and uploads go through the injected `BucketManager` and
/// `Uploader`; reads go straight to the bucket's public domain. Directories do
/// not exist on the service, so directory operations never leave the process.
pub struct QiniuAdapter<B: BucketManager, U: Uploader> {
    bucket: String,
    auth: Auth,
    bucket_manager: B,
    uploader: U,
    reader: PublicReader,
    upload_token_ttl: u64,
    list_limit: usize,
    allow_remote_streams: bool,
}

impl<B: BucketManager, U: Uploader> QiniuAdapter<B, U> {
    /// `client` serves the public-domain reads.
    pub fn new(
        auth: Auth,
        bucket: impl Into<String>,
        domain: impl Into<String>,
        bucket_manager: B,
        uploader: U,
        client: Client,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            auth,
            bucket_manager,
            uploader,
            reader: PublicReader::new(client, domain),
            upload_token_ttl: DEFAULT_UPLOAD_TOKEN_TTL_SECONDS,
            list_limit: DEFAULT_LIST_LIMIT,
            allow_remote_streams: true,
        }
    }

    pub fn with_upload_token_ttl(mut self, seconds: u64) -> Self {
        self.upload_token_ttl = seconds;
        self
    }

    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit.clamp(1, MAX_LIST_LIMIT);
        self
    }

    pub fn with_remote_streams(mut self, allowed: bool) -> Self {
        self.allow_remote_streams = allowed;
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn domain(&self) -> &str {
        self.reader.domain()
    }

    // 每次寫入都重新簽發，不快取
    fn upload_token(&self) -> Result<String> {
        self.auth.upload_token(&self.bucket, self.upload_token_ttl)
    }

    async fn stat_path(&self, path: &str) -> Result<FileMetadata> {
        let mut info = self.bucket_manager.stat(&self.bucket, path).await?;
        info.key = path.to_string();
        Ok(normalize_file_info(&info))
    }

    async fn delete_before_update(&self, path: &str) {
        match self.delete(path).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::debug!("Update of {}: nothing to delete", path);
            }
            Err(e) => {
                tracing::warn!("Update of {}: delete failed, writing anyway: {}", path, e);
            }
        }
    }
}

#[async_trait]
impl<B: BucketManager, U: Uploader> Filesystem for QiniuAdapter<B, U> {
    async fn write(
        &self,
        path: &str,
        contents: &[u8],
        config: &WriteConfig,
    ) -> Result<WriteResponse> {
        let token = self.upload_token()?;
        tracing::debug!(
            "Uploading {} ({} bytes) to bucket {}",
            path,
            contents.len(),
            self.bucket
        );

        let receipt = self.uploader.put(&token, path, contents.to_vec()).await?;

        if let Some(visibility) = config.visibility {
            tracing::debug!(
                "Visibility '{}' requested for {} is not applied",
                visibility.as_str(),
                path
            );
        }

        Ok(WriteResponse {
            path: path.to_string(),
            hash: receipt.hash,
            visibility: config.visibility,
        })
    }

    async fn write_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        config: &WriteConfig,
    ) -> Result<WriteResponse> {
        // 上傳 API 需要完整內容，先全部讀進記憶體
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).await?;
        self.write(path, &contents, config).await
    }

    async fn update(
        &self,
        path: &str,
        contents: &[u8],
        config: &WriteConfig,
    ) -> Result<WriteResponse> {
        self.delete_before_update(path).await;
        self.write(path, contents, config).await
    }

    async fn update_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        config: &WriteConfig,
    ) -> Result<WriteResponse> {
        self.delete_before_update(path).await;
        self.write_stream(path, reader, config).await
    }

    async fn rename(&self, path: &str, new_path: &str) -> Result<()> {
        tracing::debug!("Renaming {} -> {} in bucket {}", path, new_path, self.bucket);
        self.bucket_manager.rename(&self.bucket, path, new_path).await
    }

    async fn copy(&self, path: &str, new_path: &str) -> Result<()> {
        tracing::debug!("Copying {} -> {} in bucket {}", path, new_path, self.bucket);
        self.bucket_manager.copy(&self.bucket, path, &self.bucket, new_path).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!("Deleting {} from bucket {}", path, self.bucket);
        self.bucket_manager.delete(&self.bucket, path).await
    }

    async fn delete_directory(&self, dirname: &str) -> Result<()> {
        tracing::debug!("delete_directory({}) is a no-op on a flat bucket", dirname);
        Ok(())
    }

    async fn create_directory(
        &self,
        dirname: &str,
        _config: &WriteConfig,
    ) -> Result<FileMetadata> {
        Ok(FileMetadata::directory(dirname))
    }

    async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<FileMetadata> {
        tracing::debug!(
            "set_visibility({}, {}) is not supported",
            path,
            visibility.as_str()
        );
        Err(AdapterError::Unsupported {
            operation: "set_visibility",
        })
    }

    async fn get_visibility(&self, _path: &str) -> Result<Visibility> {
        Err(AdapterError::Unsupported {
            operation: "get_visibility",
        })
    }

    async fn has(&self, path: &str) -> bool {
        match self.bucket_manager.stat(&self.bucket, path).await {
            Ok(_) => true,
            Err(e) if e.is_not_found() => false,
            Err(e) => {
                tracing::warn!("Existence check for {} failed: {}", path, e);
                false
            }
        }
    }

    async fn read(&self, path: &str) -> Result<ReadResponse> {
        self.reader.read(path).await
    }

    async fn read_stream(&self, path: &str) -> Result<ReadStream> {
        if !self.allow_remote_streams {
            return Err(AdapterError::StreamUnavailable {
                path: path.to_string(),
            });
        }
        self.reader.open_stream(path).await
    }

    // 服務端列表本身是扁平的，recursive 不影響結果
    async fn list_contents(&self, directory: &str, _recursive: bool) -> Result<Vec<FileMetadata>> {
        let mut contents = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .bucket_manager
                .list_files(&self.bucket, directory, marker.as_deref(), self.list_limit)
                .await?;

            tracing::debug!(
                "Listed {} objects under '{}' (marker: {:?})",
                page.items.len(),
                directory,
                marker
            );
            contents.extend(page.items.iter().map(normalize_file_info));

            match page.marker {
                Some(next) if !next.is_empty() && marker.as_deref() != Some(next.as_str()) => {
                    marker = Some(next);
                }
                _ => break,
            }
        }

        Ok(contents)
    }

    async fn get_metadata(&self, path: &str) -> Result<FileMetadata> {
        self.stat_path(path).await
    }

    async fn get_size(&self, path: &str) -> Result<FileMetadata> {
        self.stat_path(path).await
    }

    async fn get_timestamp(&self, path: &str) -> Result<FileMetadata> {
        self.stat_path(path).await
    }

    async fn get_mimetype(&self, path: &str) -> Result<String> {
        let info = self.bucket_manager.stat(&self.bucket, path).await?;
        Ok(info.mime_type)
    }
}
