pub mod gemini;

use async_trait::async_trait;

/// Image-understanding contract: image bytes plus an instruction in, freeform
/// model text out. Parsing the text is the caller's concern.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    async fn extract(&self, image: &[u8], mime_type: &str, prompt: &str)
    -> anyhow::Result<String>;
}
