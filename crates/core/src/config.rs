use std::env;
use crate::error::{AppError, Result};
use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: String,
    pub model_name: String,
    pub base_url: Url,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from a variable lookup, e.g. the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let mut builder = Config::builder().with_api_key(api_key);
        if let Some(model) = lookup("GEMINI_MODEL") {
            builder = builder.with_model(model);
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            builder = builder.with_base_url(base_url);
        }
        builder.build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full model resource URL, e.g. `.../v1beta/models/gemini-2.5-flash-image`.
    pub fn model_url(&self) -> Result<Url> {
        let model_name = if self.model_name.starts_with("models/") {
            self.model_name.clone()
        } else {
            format!("models/{}", self.model_name)
        };
        self.base_url
            .join(&model_name)
            .map_err(|e| AppError::config(format!("Invalid model name '{}': {}", self.model_name, e)))
    }
}

#[derive(Default, Debug)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl ConfigBuilder {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        let gemini_api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::config("Gemini API key is required"))?;

        let model_name = self
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let raw_base = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Url::join drops the last segment unless the base ends in a slash
        let raw_base = if raw_base.ends_with('/') { raw_base } else { format!("{}/", raw_base) };
        let base_url = Url::parse(&raw_base)
            .map_err(|e| AppError::Config(format!("Invalid base URL: {}", e)))?;

        Ok(Config {
            gemini_api_key,
            model_name,
            base_url,
        })
    }
}
