//! xAI API backend.

use serde::{Deserialize, Serialize};

use super::errors::ApiError;
use super::types::{Backend, ChatRequest, GeneratedImage, ImageRequest, SearchCapability};

const XAI_API_BASE: &str = "https://api.x.ai/v1";

// ─────────────────────────────────────────────────────────────────────────────
// API Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ApiChatRequest<'a> {
    model: &'a str,
    messages: Vec<ApiChatMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ApiServerTool>,
}

#[derive(Debug, Serialize)]
struct ApiChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Declarative server-side tool, e.g. `{"type": "x_search"}`.
#[derive(Debug, Serialize)]
struct ApiServerTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
}

impl From<SearchCapability> for ApiServerTool {
    fn from(capability: SearchCapability) -> Self {
        let tool_type = match capability {
            SearchCapability::Web => "web_search",
            SearchCapability::X => "x_search",
        };
        Self { tool_type }
    }
}

#[derive(Debug, Deserialize)]
struct ApiChatResponse {
    choices: Vec<ApiChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChatChoice {
    message: ApiChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChatChoiceMessage {
    content: String,
}

#[derive(Debug, Serialize)]
struct ApiImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<&'a str>,
    n: u32,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiImageResponse {
    data: Vec<ApiImage>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    url: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend Implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for creating an xAI backend.
#[derive(Debug, Clone)]
pub struct XaiBackendBuilder {
    api_key: String,
    base_url: String,
    chat_model: String,
    image_model: String,
}

impl XaiBackendBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: XAI_API_BASE.to_string(),
            chat_model: "grok-4-1-fast".to_string(),
            image_model: "grok-imagine-image".to_string(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn build(self) -> XaiBackend {
        XaiBackend {
            client: reqwest::Client::new(),
            api_key: self.api_key,
            base_url: self.base_url,
            chat_model: self.chat_model,
            image_model: self.image_model,
        }
    }
}

/// xAI API backend (chat completions and image generation/edits).
pub struct XaiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    image_model: String,
}

impl XaiBackend {
    pub fn builder(api_key: impl Into<String>) -> XaiBackendBuilder {
        XaiBackendBuilder::new(api_key)
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize,
        Resp: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{path}", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(format!("{status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn sample(
        &self,
        request: ImageRequest<'_>,
        n: u32,
    ) -> Result<Vec<GeneratedImage>, ApiError> {
        let path = if request.source_image.is_some() {
            "images/edits"
        } else {
            "images/generations"
        };

        let body = ApiImageRequest {
            model: &self.image_model,
            prompt: request.prompt,
            image_url: request.source_image,
            aspect_ratio: request.aspect_ratio,
            n,
            response_format: "url",
        };

        let response: ApiImageResponse = self.post(path, &body).await?;
        Ok(response
            .data
            .into_iter()
            .map(|image| GeneratedImage { url: image.url })
            .collect())
    }
}

impl std::fmt::Display for XaiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "xai({}, {})", self.chat_model, self.image_model)
    }
}

impl Backend for XaiBackend {
    async fn chat(&self, request: ChatRequest<'_>) -> Result<String, ApiError> {
        let body = ApiChatRequest {
            model: &self.chat_model,
            messages: vec![
                ApiChatMessage {
                    role: "system",
                    content: request.system,
                },
                ApiChatMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            tools: request
                .capabilities
                .iter()
                .copied()
                .map(ApiServerTool::from)
                .collect(),
        };

        let response: ApiChatResponse = self.post("chat/completions", &body).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidResponse("no choices in completion".to_string()))?;

        Ok(choice.message.content)
    }

    async fn sample_image(&self, request: ImageRequest<'_>) -> Result<GeneratedImage, ApiError> {
        let images = self.sample(request, 1).await?;
        images
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidResponse("no image in response".to_string()))
    }

    async fn sample_image_batch(
        &self,
        request: ImageRequest<'_>,
        n: u32,
    ) -> Result<Vec<GeneratedImage>, ApiError> {
        self.sample(request, n).await
    }
}
