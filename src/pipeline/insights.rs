//! Insights pass: derived indices and a patient-facing explanation,
//! computed by a reasoning model from the extracted JSON.

use crate::models::{ExtractionOutput, InsightsOutput};

use super::openrouter::{ChatClient, UserContent};
use super::prompts::{build_insights_prompt, INSIGHTS_PROMPT};
use super::sanitize::clean_model_json;
use super::AnalysisError;

/// Reasoning model for the insights pass. Pro over flash: the pass does
/// arithmetic (Katch-McArdle, lean-mass indices) where flash models drift.
pub const INSIGHTS_MODEL: &str = "google/gemini-2.5-pro";

pub const INSIGHTS_TEMPERATURE: f32 = 0.2;

/// Explanation shown when the insights pass fails.
pub const INSIGHTS_UNAVAILABLE: &str =
    "Não foi possível gerar a explicação detalhada no momento.";

impl InsightsOutput {
    /// Fallback payload when the reasoning model is unavailable.
    pub fn unavailable() -> Self {
        Self {
            insights: Vec::new(),
            structured_explanation: Vec::new(),
            explanation: Some(INSIGHTS_UNAVAILABLE.to_string()),
        }
    }
}

/// Run the insights pass. There is no model fallback here: one attempt,
/// and failures degrade to an empty insight set with a fixed message so
/// the analysis as a whole still succeeds.
pub async fn run_insights(client: &dyn ChatClient, extraction: &ExtractionOutput) -> InsightsOutput {
    match attempt(client, extraction).await {
        Ok(output) => output,
        Err(err) => {
            tracing::error!(
                error = %err,
                "Insights generation failed, returning extraction-only report"
            );
            InsightsOutput::unavailable()
        }
    }
}

async fn attempt(
    client: &dyn ChatClient,
    extraction: &ExtractionOutput,
) -> Result<InsightsOutput, AnalysisError> {
    let extracted_json = serde_json::to_string(extraction)
        .map_err(|e| AnalysisError::JsonParsing(e.to_string()))?;

    tracing::info!(model = INSIGHTS_MODEL, "Attempting insights generation");
    let raw = client
        .chat(
            INSIGHTS_MODEL,
            INSIGHTS_PROMPT,
            UserContent::Text(build_insights_prompt(&extracted_json)),
            INSIGHTS_TEMPERATURE,
        )
        .await?;

    let cleaned = clean_model_json(&raw);
    serde_json::from_str(&cleaned).map_err(|e| AnalysisError::JsonParsing(e.to_string()))
}
