use std::future::Future;

use super::errors::ApiError;

/// Server-side search capability attached to a chat request.
///
/// These are declarative: the upstream model decides when to use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCapability {
    Web,
    X,
}

/// A single system+user chat exchange.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub capabilities: &'a [SearchCapability],
}

/// An image generation or edit request.
///
/// `source_image` (a data URI) selects the edit endpoint; without it the
/// request goes to plain generation.
#[derive(Debug, Clone)]
pub struct ImageRequest<'a> {
    pub prompt: &'a str,
    pub aspect_ratio: Option<&'a str>,
    pub source_image: Option<&'a str>,
}

/// One generated image, addressed by URL only.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub url: String,
}

/// Trait for upstream generative-AI backends.
pub trait Backend: Send + Sync {
    /// Run a chat exchange and return the completion text verbatim.
    fn chat(&self, request: ChatRequest<'_>)
    -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Generate (or edit) a single image.
    fn sample_image(
        &self,
        request: ImageRequest<'_>,
    ) -> impl Future<Output = Result<GeneratedImage, ApiError>> + Send;

    /// Generate (or edit) a batch of `n` images.
    fn sample_image_batch(
        &self,
        request: ImageRequest<'_>,
        n: u32,
    ) -> impl Future<Output = Result<Vec<GeneratedImage>, ApiError>> + Send;
}
