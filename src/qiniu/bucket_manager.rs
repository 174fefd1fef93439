use crate::domain::model::{ListPage, ObjectInfo};
use crate::domain::ports::BucketManager;
use crate::qiniu::auth::Auth;
use crate::qiniu::{check_response, encode_entry};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    marker: Option<String>,
    #[serde(default)]
    items: Vec<ObjectInfo>,
    #[serde(default)]
    common_prefixes: Vec<String>,
}

/// Object management over the `rs` (stat/delete/move/copy) and `rsf` (list) hosts.
#[derive(Debug, Clone)]
pub struct HttpBucketManager {
    client: Client,
    auth: Auth,
    rs_host: String,
    rsf_host: String,
}

impl HttpBucketManager {
    pub fn new(client: Client, auth: Auth, rs_host: &str, rsf_host: &str) -> Self {
        Self {
            client,
            auth,
            rs_host: rs_host.trim_end_matches('/').to_string(),
            rsf_host: rsf_host.trim_end_matches('/').to_string(),
        }
    }

    async fn call(
        &self,
        method: Method,
        host: &str,
        path_and_query: &str,
        subject: &str,
    ) -> Result<Response> {
        let url = format!("{}{}", host, path_and_query);
        let authorization = self.auth.authorization(path_and_query)?;

        tracing::debug!("{} {}", method, url);
        let response = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await?;

        check_response(response, subject).await
    }
}

#[async_trait]
impl BucketManager for HttpBucketManager {
    async fn stat(&self, bucket: &str, key: &str) -> Result<ObjectInfo> {
        let path = format!("/stat/{}", encode_entry(bucket, key));
        let response = self.call(Method::GET, &self.rs_host, &path, key).await?;
        Ok(response.json::<ObjectInfo>().await?)
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        let path = format!("/delete/{}", encode_entry(bucket, key));
        self.call(Method::POST, &self.rs_host, &path, key).await?;
        Ok(())
    }

    async fn rename(&self, bucket: &str, from: &str, to: &str) -> Result<()> {
        let path = format!(
            "/move/{}/{}",
            encode_entry(bucket, from),
            encode_entry(bucket, to)
        );
        self.call(Method::POST, &self.rs_host, &path, from).await?;
        Ok(())
    }

    async fn copy(
        &self,
        from_bucket: &str,
        from_key: &str,
        to_bucket: &str,
        to_key: &str,
    ) -> Result<()> {
        let path = format!(
            "/copy/{}/{}",
            encode_entry(from_bucket, from_key),
            encode_entry(to_bucket, to_key)
        );
        self.call(Method::POST, &self.rs_host, &path, from_key).await?;
        Ok(())
    }

    async fn list_files(
        &self,
        bucket: &str,
        prefix: &str,
        marker: Option<&str>,
        limit: usize,
    ) -> Result<ListPage> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("bucket", bucket)
            .append_pair("prefix", prefix)
            .append_pair("marker", marker.unwrap_or(""))
            .append_pair("limit", &limit.to_string())
            .finish();
        let path = format!("/list?{}", query);

        let response = self.call(Method::POST, &self.rsf_host, &path, prefix).await?;
        let listing = response.json::<ListResponse>().await?;

        if !listing.common_prefixes.is_empty() {
            tracing::debug!(
                "Ignoring {} common prefixes under '{}'",
                listing.common_prefixes.len(),
                prefix
            );
        }

        Ok(ListPage {
            items: listing.items,
            marker: listing.marker.filter(|m| !m.is_empty()),
        })
    }
}
