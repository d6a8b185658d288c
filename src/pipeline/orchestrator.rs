//! Two-stage analysis: extraction with model fallback, then insights,
//! then a merge of both into the client-facing report.

use std::time::Instant;

use serde_json::Value;

use crate::models::{AnalysisReport, ExamInput, ExtractionOutput, InsightsOutput};

use super::extraction::run_extraction;
use super::insights::run_insights;
use super::openrouter::ChatClient;
use super::AnalysisError;

/// Analyze one exam end to end.
///
/// Extraction failure fails the analysis; insights failure does not (the
/// pass degrades internally).
pub async fn analyze_exam(
    client: &dyn ChatClient,
    input: &ExamInput,
) -> Result<AnalysisReport, AnalysisError> {
    let start = Instant::now();

    let extraction = run_extraction(client, input).await?;
    let insights = run_insights(client, &extraction).await;
    let report = merge_report(extraction, insights);

    tracing::info!(
        elapsed_ms = %start.elapsed().as_millis(),
        insights = report.structured.insights.len(),
        sections = report.structured_explanation.len(),
        history = report.structured.history.len(),
        "Exam analysis complete"
    );

    Ok(report)
}

/// Merge the two passes. Coalescing mirrors the client contract: prefer the
/// insights explanation, fall back to whatever the extraction pass
/// volunteered, then to an empty string.
pub fn merge_report(extraction: ExtractionOutput, insights: InsightsOutput) -> AnalysisReport {
    let ExtractionOutput {
        mut structured,
        raw_json,
        explanation,
    } = extraction;

    structured.insights = insights.insights;

    let explanation = insights
        .explanation
        .filter(|e| !e.is_empty())
        .or(explanation)
        .unwrap_or_default();

    AnalysisReport {
        structured,
        explanation,
        structured_explanation: insights.structured_explanation,
        raw_json: raw_json.unwrap_or_else(|| Value::Object(serde_json::Map::new())),
    }
}
