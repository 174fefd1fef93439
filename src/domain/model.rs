use crate::utils::error::Result;
use bytes::Bytes;
use reqwest::Response;
use serde::{Deserialize, Serialize};

/// Raw object record as the object-management API returns it.
///
/// `stat` responses carry no `key`; the adapter fills it in from the
/// requested path before normalizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    #[serde(default)]
    pub key: String,
    pub fsize: u64,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub mime_type: String,
    /// Upload time in 100 ns units.
    pub put_time: i64,
}

/// One page of a prefix listing. `marker` is `None` once the listing is exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub items: Vec<ObjectInfo>,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
}

/// Normalized metadata handed back to the storage consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileMetadata {
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            entry_type: EntryType::Dir,
            path: path.into(),
            timestamp: None,
            size: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// Options passed along with write-style calls. Only `visibility` is recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteConfig {
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

impl WriteConfig {
    pub fn with_visibility(visibility: Visibility) -> Self {
        Self {
            visibility: Some(visibility),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResponse {
    pub path: String,
    pub hash: String,
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResponse {
    pub path: String,
    pub contents: Bytes,
}

/// An open public read whose body has not been consumed yet.
#[derive(Debug)]
pub struct ReadStream {
    pub path: String,
    response: Response,
}

impl ReadStream {
    pub fn new(path: impl Into<String>, response: Response) -> Self {
        Self {
            path: path.into(),
            response,
        }
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Next body chunk, `None` once the body is exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        Ok(self.response.chunk().await?)
    }

    pub async fn into_bytes(self) -> Result<Bytes> {
        Ok(self.response.bytes().await?)
    }
}
