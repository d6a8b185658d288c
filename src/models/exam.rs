//! Request-side exam payload: the uploaded image and/or pasted text.

use base64::Engine as _;
use thiserror::Error;

/// Maximum accepted size for an uploaded exam image.
pub const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

/// An uploaded exam image with its resolved MIME type.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamImage {
    bytes: Vec<u8>,
    mime: String,
}

impl ExamImage {
    /// Build an image from upload bytes, resolving the MIME type from the
    /// multipart header, then magic bytes, then the file name.
    pub fn new(bytes: Vec<u8>, declared_mime: Option<&str>, file_name: Option<&str>) -> Self {
        let mime = declared_mime
            .filter(|m| !m.trim().is_empty() && *m != "application/octet-stream")
            .map(str::to_string)
            .or_else(|| sniff_mime(&bytes).map(str::to_string))
            .or_else(|| file_name.and_then(guess_mime_from_name))
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Self { bytes, mime }
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Render the image as a `data:` URL for the chat-completions API.
    pub fn to_data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, encoded)
    }
}

/// Detect the MIME type from magic bytes. Covers the formats phone cameras
/// and report exports actually produce.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
        Some("image/jpeg")
    } else if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        Some("image/png")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.len() >= 8 && &bytes[4..8] == b"ftyp" {
        Some("image/heic")
    } else {
        None
    }
}

fn guess_mime_from_name(name: &str) -> Option<String> {
    mime_guess::from_path(name)
        .first()
        .map(|m| m.essence_str().to_string())
}

/// The analyzable content of one request. At least one of image/text is
/// guaranteed present after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamInput {
    image: Option<ExamImage>,
    text: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
#[error("exam input needs a file or a text field")]
pub struct EmptyExamInput;

impl ExamInput {
    pub fn new(image: Option<ExamImage>, text: Option<String>) -> Result<Self, EmptyExamInput> {
        let text = text.filter(|t| !t.trim().is_empty());
        if image.is_none() && text.is_none() {
            return Err(EmptyExamInput);
        }
        Ok(Self { image, text })
    }

    pub fn image(&self) -> Option<&ExamImage> {
        self.image.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
