pub mod supabase;

use async_trait::async_trait;

/// Object-store contract: binary payload in, publicly addressable URL out.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str)
    -> anyhow::Result<String>;

    async fn remove(&self, paths: &[String]) -> anyhow::Result<()>;

    /// Bucket name, used to map public URLs back to storage paths.
    fn bucket(&self) -> &str;
}

/// Extract bucket-relative paths from public URLs. URLs that do not point
/// into the given bucket are skipped.
pub fn object_paths_from_urls(urls: &[String], bucket: &str) -> Vec<String> {
    let marker = format!("/storage/v1/object/public/{bucket}/");
    urls.iter()
        .filter_map(|url| url.split_once(&marker).map(|(_, path)| path.to_string()))
        .filter(|path| !path.is_empty())
        .collect()
}
