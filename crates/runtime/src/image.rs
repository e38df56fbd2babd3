//! Image payload normalization for the edit tool.
//!
//! The edit tool accepts an image as a file path, a remote URL, or a base64
//! string. All three are reduced to a single `data:<mime>;base64,<data>` URI
//! before the upstream call, with the MIME type detected from magic bytes
//! where possible.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use thiserror::Error;

/// Ceiling on remote image fetches. Upstream API calls have no extra
/// timeout beyond the HTTP client's own defaults.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_MIME: &str = "image/jpeg";

/// Errors from resolving an image source to bytes.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
}

/// Where the image to edit comes from. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
    Base64(String),
}

impl ImageSource {
    /// Pick the image source from the tool arguments.
    ///
    /// A base64 payload wins over a path, which wins over a URL; empty
    /// strings count as absent. `None` means the caller supplied nothing
    /// usable, which is a validation failure on their side.
    pub fn from_arguments(
        path: Option<&str>,
        url: Option<&str>,
        base64_payload: Option<&str>,
    ) -> Option<Self> {
        let present = |s: Option<&str>| s.filter(|s| !s.is_empty());

        if let Some(payload) = present(base64_payload) {
            return Some(Self::Base64(payload.to_string()));
        }
        if let Some(path) = present(path) {
            return Some(Self::Path(PathBuf::from(path)));
        }
        present(url).map(|url| Self::Url(url.to_string()))
    }
}

/// An image reduced to a MIME type and base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub mime_type: String,
    pub base64_data: String,
}

impl NormalizedImage {
    pub fn into_data_uri(self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// Resolve an [`ImageSource`] to a data URI.
///
/// Fails only when a file cannot be read or a URL cannot be fetched; the
/// base64 variants never fail (an undecodable payload falls back to being
/// wrapped as JPEG rather than erroring the whole call).
pub async fn normalize(source: ImageSource, http: &reqwest::Client) -> Result<String, ImageError> {
    match source {
        ImageSource::Base64(payload) => Ok(normalize_base64(payload)),
        ImageSource::Path(path) => {
            let bytes = tokio::fs::read(&path).await.map_err(|source| {
                ImageError::Read {
                    path: path.clone(),
                    source,
                }
            })?;
            let mime_type = detect_mime_type(&bytes, path.to_str());
            Ok(NormalizedImage {
                mime_type: mime_type.to_string(),
                base64_data: BASE64.encode(&bytes),
            }
            .into_data_uri())
        }
        ImageSource::Url(url) => fetch_and_encode(url, http).await,
    }
}

fn normalize_base64(payload: String) -> String {
    // Already a data URI: trusted as well-formed, passed through verbatim.
    if payload.starts_with("data:") {
        return payload;
    }

    match BASE64.decode(payload.as_bytes()) {
        Ok(bytes) => NormalizedImage {
            mime_type: detect_mime_type(&bytes, None).to_string(),
            base64_data: payload,
        }
        .into_data_uri(),
        // Lenient fallback: wrap the undecodable payload as-is.
        Err(_) => format!("data:{DEFAULT_MIME};base64,{payload}"),
    }
}

async fn fetch_and_encode(url: String, http: &reqwest::Client) -> Result<String, ImageError> {
    let response = http
        .get(&url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| ImageError::Fetch {
            url: url.clone(),
            message: e.to_string(),
        })?;

    // The declared content-type wins when it is an image type; anything
    // else (text/html error pages and the like) falls back to the bytes.
    let header_mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| value.starts_with("image/"))
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string());

    let bytes = response.bytes().await.map_err(|e| ImageError::Fetch {
        url: url.clone(),
        message: e.to_string(),
    })?;

    let mime_type =
        header_mime.unwrap_or_else(|| detect_mime_type(&bytes, Some(&url)).to_string());

    Ok(NormalizedImage {
        mime_type,
        base64_data: BASE64.encode(&bytes),
    }
    .into_data_uri())
}

/// Detect an image MIME type from leading magic bytes.
///
/// Signature checks run in a fixed priority order; when none match, the
/// hint's file extension is consulted, and failing that the type defaults
/// to JPEG.
pub fn detect_mime_type(bytes: &[u8], hint: Option<&str>) -> &'static str {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return "image/png";
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return "image/gif";
    }
    if bytes.starts_with(b"RIFF") && bytes.len() >= 12 && &bytes[8..12] == b"WEBP" {
        return "image/webp";
    }
    if bytes.starts_with(b"BM") {
        return "image/bmp";
    }

    if let Some(mime_type) = hint.and_then(extension_hint).and_then(mime_from_extension) {
        return mime_type;
    }

    DEFAULT_MIME
}

/// Extract a file extension from a path or URL hint.
fn extension_hint(hint: &str) -> Option<&str> {
    // Strip any URL query or fragment before looking at the extension.
    let trimmed = hint.split(['?', '#']).next().unwrap_or(hint);
    Path::new(trimmed).extension()?.to_str()
}

/// Extension table. Only image types are listed, so a non-image hint
/// falls through to the default.
fn mime_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        "tiff" | "tif" => Some("image/tiff"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn detects_each_signature() {
        assert_eq!(detect_mime_type(&[0xFF, 0xD8, 0xFF, 0xE0], None), "image/jpeg");
        assert_eq!(detect_mime_type(&PNG_MAGIC, None), "image/png");
        assert_eq!(detect_mime_type(b"GIF87a...", None), "image/gif");
        assert_eq!(detect_mime_type(b"GIF89a...", None), "image/gif");
        assert_eq!(detect_mime_type(b"RIFF\x00\x00\x00\x00WEBPVP8 ", None), "image/webp");
        assert_eq!(detect_mime_type(b"BM\x00\x00", None), "image/bmp");
    }

    #[test]
    fn jpeg_takes_priority_over_later_signatures() {
        // A JPEG prefix wins even if the tail resembles another format.
        let bytes = [0xFF, 0xD8, 0xFF, b'B', b'M'];
        assert_eq!(detect_mime_type(&bytes, None), "image/jpeg");
    }

    #[test]
    fn empty_bytes_default_to_jpeg() {
        assert_eq!(detect_mime_type(&[], None), "image/jpeg");
    }

    #[test]
    fn falls_back_to_image_extension_hint() {
        assert_eq!(detect_mime_type(&[0x00], Some("photo.png")), "image/png");
        assert_eq!(detect_mime_type(&[0x00], Some("photo.PNG")), "image/png");
        assert_eq!(
            detect_mime_type(&[0x00], Some("https://example.com/pic.webp?w=100")),
            "image/webp"
        );
    }

    #[test]
    fn non_image_extension_is_ignored() {
        assert_eq!(detect_mime_type(&[0x00], Some("photo.txt")), "image/jpeg");
        assert_eq!(detect_mime_type(&[0x00], Some("no-extension")), "image/jpeg");
    }

    #[test]
    fn source_selection_prefers_base64_then_path() {
        assert_eq!(
            ImageSource::from_arguments(Some("/a.png"), Some("https://x"), Some("AAAA")),
            Some(ImageSource::Base64("AAAA".to_string()))
        );
        assert_eq!(
            ImageSource::from_arguments(Some("/a.png"), Some("https://x"), None),
            Some(ImageSource::Path(PathBuf::from("/a.png")))
        );
        assert_eq!(
            ImageSource::from_arguments(None, Some("https://x"), Some("")),
            Some(ImageSource::Url("https://x".to_string()))
        );
        assert_eq!(ImageSource::from_arguments(None, None, None), None);
        assert_eq!(ImageSource::from_arguments(Some(""), None, None), None);
    }

    #[tokio::test]
    async fn prefixed_payload_passes_through_unchanged() {
        let http = reqwest::Client::new();
        let uri = normalize(
            ImageSource::Base64("data:image/png;base64,AAAA".to_string()),
            &http,
        )
        .await
        .unwrap();
        assert_eq!(uri, "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn raw_payload_is_wrapped_with_detected_mime() {
        let http = reqwest::Client::new();
        let payload = BASE64.encode(PNG_MAGIC);
        let uri = normalize(ImageSource::Base64(payload.clone()), &http)
            .await
            .unwrap();
        assert_eq!(uri, format!("data:image/png;base64,{payload}"));
    }

    #[tokio::test]
    async fn undecodable_payload_falls_back_to_jpeg() {
        let http = reqwest::Client::new();
        let uri = normalize(ImageSource::Base64("not base64!!".to_string()), &http)
            .await
            .unwrap();
        assert_eq!(uri, "data:image/jpeg;base64,not base64!!");
    }

    #[tokio::test]
    async fn file_path_is_read_and_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.dat");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let http = reqwest::Client::new();
        let uri = normalize(ImageSource::Path(path), &http).await.unwrap();
        assert_eq!(uri, format!("data:image/png;base64,{}", BASE64.encode(PNG_MAGIC)));
    }

    #[tokio::test]
    async fn missing_file_propagates_the_read_error() {
        let http = reqwest::Client::new();
        let result = normalize(
            ImageSource::Path(PathBuf::from("/definitely/not/here.png")),
            &http,
        )
        .await;
        assert!(matches!(result, Err(ImageError::Read { .. })));
    }
}
