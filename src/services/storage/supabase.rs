use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::ObjectStorage;

/// Supabase storage client. Uploads land under the configured bucket and are
/// served from the public object endpoint.
pub struct SupabaseStorage {
    base_url: String,
    service_key: String,
    bucket: String,
    client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(base_url: String, service_key: String, bucket: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<String> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, path
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .context("failed to reach object storage")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("object storage upload failed ({status}): {body}");
        }

        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        ))
    }

    async fn remove(&self, paths: &[String]) -> anyhow::Result<()> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);

        let resp = self
            .client
            .delete(&url)
            .bearer_auth(&self.service_key)
            .json(&json!({ "prefixes": paths }))
            .send()
            .await
            .context("failed to reach object storage")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("object storage delete failed ({status}): {body}");
        }

        Ok(())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
