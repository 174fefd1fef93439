use crate::domain::model::UploadReceipt;
use crate::domain::ports::Uploader;
use crate::qiniu::check_response;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Form uploads to the `up` host. The whole payload goes out in one request.
#[derive(Debug, Clone)]
pub struct HttpUploadManager {
    client: Client,
    up_host: String,
}

impl HttpUploadManager {
    pub fn new(client: Client, up_host: &str) -> Self {
        Self {
            client,
            up_host: up_host.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Uploader for HttpUploadManager {
    async fn put(&self, token: &str, key: &str, contents: Vec<u8>) -> Result<UploadReceipt> {
        let url = format!("{}/", self.up_host);
        let size = contents.len();
        let form = Form::new()
            .text("token", token.to_string())
            .text("key", key.to_string())
            .part("file", Part::bytes(contents).file_name(key.to_string()));

        tracing::debug!("POST {} ({} bytes for {})", url, size, key);
        let response = self.client.post(&url).multipart(form).send().await?;
        let response = check_response(response, key).await?;

        Ok(response.json::<UploadReceipt>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_put_sends_multipart_form() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/")
                .body_contains("name=\"token\"")
                .body_contains("upload-token-value")
                .body_contains("name=\"key\"")
                .body_contains("docs/a.txt")
                .body_contains("file contents");
            then.status(200)
                .json_body(serde_json::json!({"hash": "FhX", "key": "docs/a.txt"}));
        });

        let uploader = HttpUploadManager::new(Client::new(), &server.base_url());
        let receipt = uploader
            .put("upload-token-value", "docs/a.txt", b"file contents".to_vec())
            .await
            .unwrap();

        mock.assert();
        assert_eq!(receipt.hash, "FhX");
        assert_eq!(receipt.key.as_deref(), Some("docs/a.txt"));
    }

    #[tokio::test]
    async fn test_put_rejected_token_is_service_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/");
            then.status(401)
                .json_body(serde_json::json!({"error": "expired token"}));
        });

        let uploader = HttpUploadManager::new(Client::new(), &server.base_url());
        let err = uploader
            .put("stale", "a.txt", b"x".to_vec())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("expired token"));
    }
}
