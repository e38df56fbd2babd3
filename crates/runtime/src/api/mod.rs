//! Upstream API types and backend trait.

pub mod errors;
pub mod types;
mod xai;

pub use errors::ApiError;
pub use types::{Backend, ChatRequest, GeneratedImage, ImageRequest, SearchCapability};
pub use xai::{XaiBackend, XaiBackendBuilder};
