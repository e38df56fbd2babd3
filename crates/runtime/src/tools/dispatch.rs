//! Tool dispatch: argument validation, upstream calls, reply shaping.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::{Backend, ChatRequest, ImageRequest, SearchCapability};
use crate::error::{Error, Result};
use crate::image::{self, ImageSource};

const SEARCH_X_SYSTEM: &str = r#"You are a specialized search assistant. Use your search capabilities to find real-time information on X/Twitter.

You MUST respond in the following JSON format:
{
    "posts": [
        {
            "url": "https://x.com/username/status/...",
            "username": "username",
            "content": "The post content"
        }
    ],
    "summary": "A summary answering the user's question based on the search results"
}

Include relevant posts found in the search results. If no posts are found, return an empty posts array."#;

const ASK_GROK_SYSTEM: &str = r#"You are a helpful AI assistant that provides accurate and well-researched answers.

You MUST respond in the following JSON format:
{
    "sources": [
        {
            "url": "URL of the source (if available)",
            "content_summary": "Relevant excerpt or description from the source"
        }
    ],
    "summary": "A comprehensive answer to the user's question"
}

Include relevant sources that support your answer. If no specific sources are available, return an empty sources array."#;

/// The outcome of one tool invocation.
///
/// Both variants reach the host as a single text block; `Failure` marks
/// the reply as an error at the protocol layer. Validation problems,
/// missing credentials, and upstream image failures are all `Failure`
/// text, never an `Err`, so the host gets exactly one well-formed reply
/// per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolReply {
    Success(String),
    Failure(String),
}

impl ToolReply {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// The text delivered to the host, regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct SingleImageReply {
    status: &'static str,
    image: ImageUrl,
}

#[derive(Serialize)]
struct BatchImageReply {
    status: &'static str,
    images: Vec<ImageUrl>,
}

/// Routes tool invocations to the upstream backend.
///
/// `backend` is `None` when no credential was configured; every
/// credentialed call then reports a textual error without any network
/// I/O. The dispatcher keeps no state across calls.
pub struct Dispatcher<B> {
    backend: Option<B>,
    http: reqwest::Client,
}

impl<B: Backend> Dispatcher<B> {
    pub fn new(backend: Option<B>) -> Self {
        Self {
            backend,
            http: reqwest::Client::new(),
        }
    }

    /// Execute one tool call.
    ///
    /// An unknown tool name is the only hard error; everything else comes
    /// back as a [`ToolReply`].
    pub async fn dispatch(&self, name: &str, arguments: &Map<String, Value>) -> Result<ToolReply> {
        tracing::debug!(tool = name, "dispatching");
        match name {
            "search_x" => self.search_x(arguments).await,
            "ask_grok" => self.ask_grok(arguments).await,
            "generate_image" => self.generate_image(arguments).await,
            "edit_image" => self.edit_image(arguments).await,
            _ => Err(Error::ToolNotFound(name.to_string())),
        }
    }

    async fn search_x(&self, arguments: &Map<String, Value>) -> Result<ToolReply> {
        let Some(query) = text_arg(arguments, "query") else {
            return Ok(missing("query"));
        };
        let Some(backend) = self.backend.as_ref() else {
            return Ok(no_credential());
        };

        let completion = backend
            .chat(ChatRequest {
                system: SEARCH_X_SYSTEM,
                user: query,
                capabilities: &[SearchCapability::X],
            })
            .await?;
        Ok(ToolReply::Success(completion))
    }

    async fn ask_grok(&self, arguments: &Map<String, Value>) -> Result<ToolReply> {
        let Some(question) = text_arg(arguments, "question") else {
            return Ok(missing("question"));
        };
        let Some(backend) = self.backend.as_ref() else {
            return Ok(no_credential());
        };

        let completion = backend
            .chat(ChatRequest {
                system: ASK_GROK_SYSTEM,
                user: question,
                capabilities: &[SearchCapability::Web, SearchCapability::X],
            })
            .await?;
        Ok(ToolReply::Success(completion))
    }

    async fn generate_image(&self, arguments: &Map<String, Value>) -> Result<ToolReply> {
        let Some(prompt) = text_arg(arguments, "prompt") else {
            return Ok(missing("prompt"));
        };
        let Some(backend) = self.backend.as_ref() else {
            return Ok(no_credential());
        };

        let aspect_ratio = text_arg(arguments, "aspect_ratio").unwrap_or("1:1");
        let request = ImageRequest {
            prompt,
            aspect_ratio: Some(aspect_ratio),
            source_image: None,
        };
        Ok(Self::run_image(backend, request, count(arguments)).await)
    }

    async fn edit_image(&self, arguments: &Map<String, Value>) -> Result<ToolReply> {
        let Some(prompt) = text_arg(arguments, "prompt") else {
            return Ok(missing("prompt"));
        };
        let Some(backend) = self.backend.as_ref() else {
            return Ok(no_credential());
        };

        let source = ImageSource::from_arguments(
            text_arg(arguments, "image_path"),
            text_arg(arguments, "image_url"),
            text_arg(arguments, "image_base64"),
        );
        let Some(source) = source else {
            return Ok(ToolReply::failure(
                "Error: One of 'image_path', 'image_url', or 'image_base64' is required.",
            ));
        };

        let data_uri = match image::normalize(source, &self.http).await {
            Ok(uri) => uri,
            Err(e) => return Ok(ToolReply::failure(format!("Error: {e}"))),
        };

        let request = ImageRequest {
            prompt,
            aspect_ratio: None,
            source_image: Some(&data_uri),
        };
        Ok(Self::run_image(backend, request, count(arguments)).await)
    }

    /// Single vs. batch branching shared by generate and edit.
    ///
    /// Upstream failures are rendered as `Error: <message>` text here;
    /// a batch either yields all requested images or a single error.
    async fn run_image(backend: &B, request: ImageRequest<'_>, n: i64) -> ToolReply {
        match n {
            1 => match backend.sample_image(request).await {
                Ok(image) => render(&SingleImageReply {
                    status: "ok",
                    image: ImageUrl { url: image.url },
                }),
                Err(e) => ToolReply::failure(format!("Error: {e}")),
            },
            n if n > 1 => match backend.sample_image_batch(request, n as u32).await {
                Ok(images) => render(&BatchImageReply {
                    status: "ok",
                    images: images.into_iter().map(|image| ImageUrl { url: image.url }).collect(),
                }),
                Err(e) => ToolReply::failure(format!("Error: {e}")),
            },
            _ => ToolReply::failure("Error: 'n' must be between 1 and 10."),
        }
    }
}

fn text_arg<'a>(arguments: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    arguments.get(field).and_then(Value::as_str)
}

fn count(arguments: &Map<String, Value>) -> i64 {
    arguments.get("n").and_then(Value::as_i64).unwrap_or(1)
}

fn missing(field: &str) -> ToolReply {
    ToolReply::failure(format!("Error: '{field}' argument is required."))
}

fn no_credential() -> ToolReply {
    ToolReply::failure("Error: XAI_API_KEY is not set.")
}

fn render(reply: &impl Serialize) -> ToolReply {
    match serde_json::to_string(reply) {
        Ok(text) => ToolReply::Success(text),
        Err(e) => ToolReply::failure(format!("Error: {e}")),
    }
}

impl<B: Backend> mcp::ToolHandler for Dispatcher<B> {
    fn tools(&self) -> Vec<mcp::Tool> {
        super::registry::tool_descriptors()
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> mcp::Result<mcp::CallToolResult> {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        match self.dispatch(name, &arguments).await {
            Ok(ToolReply::Success(text)) => Ok(mcp::CallToolResult::text(text)),
            Ok(ToolReply::Failure(text)) => Ok(mcp::CallToolResult::error(text)),
            Err(Error::ToolNotFound(name)) => Err(mcp::Error::ToolNotFound(name)),
            Err(e) => Err(mcp::Error::Execution(e.to_string())),
        }
    }
}
