use crate::domain::model::{
    FileMetadata, ListPage, ObjectInfo, ReadResponse, ReadStream, UploadReceipt, Visibility,
    WriteConfig, WriteResponse,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Object-management side of the service.
#[async_trait]
pub trait BucketManager: Send + Sync {
    /// Returns `AdapterError::NotFound` when the object is absent.
    async fn stat(&self, bucket: &str, key: &str) -> Result<ObjectInfo>;
    async fn delete(&self, bucket: &str, key: &str) -> Result<()>;
    async fn rename(&self, bucket: &str, from: &str, to: &str) -> Result<()>;
    async fn copy(
        &self,
        from_bucket: &str,
        from_key: &str,
        to_bucket: &str,
        to_key: &str,
    ) -> Result<()>;
    async fn list_files(
        &self,
        bucket: &str,
        prefix: &str,
        marker: Option<&str>,
        limit: usize,
    ) -> Result<ListPage>;
}

/// Upload side of the service.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn put(&self, token: &str, key: &str, contents: Vec<u8>) -> Result<UploadReceipt>;
}

/// Filesystem-like contract the adapter offers to a storage consumer.
#[async_trait]
pub trait Filesystem: Send + Sync {
    async fn write(&self, path: &str, contents: &[u8], config: &WriteConfig)
        -> Result<WriteResponse>;

    async fn write_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        config: &WriteConfig,
    ) -> Result<WriteResponse>;

    async fn update(
        &self,
        path: &str,
        contents: &[u8],
        config: &WriteConfig,
    ) -> Result<WriteResponse>;

    async fn update_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
        config: &WriteConfig,
    ) -> Result<WriteResponse>;

    async fn rename(&self, path: &str, new_path: &str) -> Result<()>;
    async fn copy(&self, path: &str, new_path: &str) -> Result<()>;
    async fn delete(&self, path: &str) -> Result<()>;
    async fn delete_directory(&self, dirname: &str) -> Result<()>;
    async fn create_directory(&self, dirname: &str, config: &WriteConfig)
        -> Result<FileMetadata>;

    async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<FileMetadata>;
    async fn get_visibility(&self, path: &str) -> Result<Visibility>;

    async fn has(&self, path: &str) -> bool;
    async fn read(&self, path: &str) -> Result<ReadResponse>;
    async fn read_stream(&self, path: &str) -> Result<ReadStream>;
    async fn list_contents(&self, directory: &str, recursive: bool) -> Result<Vec<FileMetadata>>;

    async fn get_metadata(&self, path: &str) -> Result<FileMetadata>;
    async fn get_size(&self, path: &str) -> Result<FileMetadata>;
    async fn get_timestamp(&self, path: &str) -> Result<FileMetadata>;
    async fn get_mimetype(&self, path: &str) -> Result<String>;
}
