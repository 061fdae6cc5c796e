use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Upstream provider settings; only the server binary needs these.
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub storage_bucket: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let supabase_url = env::var("SUPABASE_URL").ok();
        let supabase_service_key = env::var("SUPABASE_SERVICE_KEY").ok();
        let storage_bucket =
            env::var("STORAGE_BUCKET").unwrap_or_else(|_| "car-images".to_string());
        let gemini_api_key = env::var("GEMINI_API_KEY").ok();
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        Ok(Self {
            database_url,
            host,
            port,
            supabase_url,
            supabase_service_key,
            storage_bucket,
            gemini_api_key,
            gemini_model,
        })
    }

    pub fn require_supabase(&self) -> anyhow::Result<(String, String)> {
        let url = self
            .supabase_url
            .clone()
            .context("SUPABASE_URL is not set")?;
        let key = self
            .supabase_service_key
            .clone()
            .context("SUPABASE_SERVICE_KEY is not set")?;
        Ok((url, key))
    }

    pub fn require_gemini(&self) -> anyhow::Result<String> {
        self.gemini_api_key
            .clone()
            .context("GEMINI_API_KEY is not set")
    }
}
