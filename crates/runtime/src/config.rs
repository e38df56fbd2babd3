//! Process configuration sourced from the environment at startup.
//!
//! The credential is read once and injected into the dispatcher; nothing
//! deeper in the call tree touches the environment.

use crate::api::XaiBackend;

const DEFAULT_CHAT_MODEL: &str = "grok-4-1-fast";
const DEFAULT_IMAGE_MODEL: &str = "grok-imagine-image";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// xAI API key. `None` turns every credentialed tool call into a
    /// textual error instead of aborting the process.
    pub api_key: Option<String>,

    /// Model used for search_x / ask_grok.
    pub chat_model: String,

    /// Model used for generate_image / edit_image.
    pub image_model: String,

    /// Override for the API base URL.
    pub api_base: Option<String>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("XAI_API_KEY").ok().filter(|k| !k.is_empty()),
            chat_model: std::env::var("XAI_CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            image_model: std::env::var("XAI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            api_base: std::env::var("XAI_API_BASE").ok(),
        }
    }

    /// Build the xAI backend, or `None` when no credential is configured.
    pub fn backend(&self) -> Option<XaiBackend> {
        let key = self.api_key.clone()?;
        let mut builder = XaiBackend::builder(key)
            .chat_model(&self.chat_model)
            .image_model(&self.image_model);
        if let Some(base) = &self.api_base {
            builder = builder.base_url(base);
        }
        Some(builder.build())
    }
}
