//! Reads through the bucket's public domain.
//!
//! Objects are fetched with a plain `GET http://{domain}/{path}` instead of the
//! authenticated management API, so the bucket must be publicly readable via
//! that domain.

use crate::domain::model::{ReadResponse, ReadStream};
use crate::qiniu::check_response;
use crate::utils::error::Result;
use reqwest::{Client, Response};

#[derive(Debug, Clone)]
pub struct PublicReader {
    client: Client,
    domain: String,
}

impl PublicReader {
    pub fn new(client: Client, domain: impl Into<String>) -> Self {
        Self {
            client,
            domain: domain.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn object_url(&self, path: &str) -> String {
        format!("http://{}/{}", self.domain, path)
    }

    async fn fetch(&self, path: &str) -> Result<Response> {
        let url = self.object_url(path);
        tracing::debug!("Public read: GET {}", url);

        let response = self.client.get(&url).send().await?;
        check_response(response, path).await
    }

    pub async fn read(&self, path: &str) -> Result<ReadResponse> {
        let response = self.fetch(path).await?;
        let contents = response.bytes().await?;
        tracing::debug!("Read {} bytes from {}", contents.len(), path);

        Ok(ReadResponse {
            path: path.to_string(),
            contents,
        })
    }

    pub async fn open_stream(&self, path: &str) -> Result<ReadStream> {
        let response = self.fetch(path).await?;
        Ok(ReadStream::new(path, response))
    }
}
