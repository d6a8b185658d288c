//! Extraction pass: read the exam with a vision-capable model, falling
//! through an ordered model list until one returns parsable JSON.

use crate::models::{ExamInput, ExtractionOutput};

use super::openrouter::{ChatClient, UserContent};
use super::prompts::{EXTRACTION_CAPTION, EXTRACTION_PROMPT};
use super::sanitize::clean_model_json;
use super::AnalysisError;

/// Models tried in order. The free tier goes first; paid models back it up.
pub const EXTRACTION_MODELS: &[&str] = &[
    "google/gemini-2.0-pro-exp-02-05:free",
    "google/gemini-2.5-pro",
    "google/gemini-2.5-flash",
    "google/gemini-2.0-flash-001",
];

/// Low temperature: extraction should transcribe, not improvise.
pub const EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Run the extraction pass. Each model failure (transport, upstream status,
/// empty content, unparsable JSON) is logged and the next model is tried;
/// when every model fails, the last error is returned.
pub async fn run_extraction(
    client: &dyn ChatClient,
    input: &ExamInput,
) -> Result<ExtractionOutput, AnalysisError> {
    let user = user_content(input);
    let mut last_err: Option<AnalysisError> = None;

    for model in EXTRACTION_MODELS.iter().copied() {
        tracing::info!(model, "Attempting exam extraction");
        match attempt(client, model, user.clone()).await {
            Ok(output) => {
                tracing::info!(model, "Extraction succeeded");
                return Ok(output);
            }
            Err(err) => {
                tracing::warn!(model, error = %err, "Extraction attempt failed");
                last_err = Some(err);
            }
        }
    }

    Err(last_err.unwrap_or(AnalysisError::NoModelSucceeded))
}

async fn attempt(
    client: &dyn ChatClient,
    model: &str,
    user: UserContent,
) -> Result<ExtractionOutput, AnalysisError> {
    let raw = client
        .chat(model, EXTRACTION_PROMPT, user, EXTRACTION_TEMPERATURE)
        .await?;
    parse_extraction_response(&raw)
}

/// Build the user turn: the caption, any pasted exam text, and the exam
/// image when one was uploaded.
fn user_content(input: &ExamInput) -> UserContent {
    let caption = match input.text() {
        Some(text) => format!("{EXTRACTION_CAPTION}\n\n{text}"),
        None => EXTRACTION_CAPTION.to_string(),
    };

    match input.image() {
        Some(image) => UserContent::ImageWithCaption {
            caption,
            data_url: image.to_data_url(),
        },
        None => UserContent::Text(caption),
    }
}

/// Clean and deserialize one model response.
pub fn parse_extraction_response(raw: &str) -> Result<ExtractionOutput, AnalysisError> {
    let cleaned = clean_model_json(raw);
    serde_json::from_str(&cleaned).map_err(|e| AnalysisError::JsonParsing(e.to_string()))
}
