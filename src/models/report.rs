//! Wire shapes mirrored between the model's JSON output and the client.
//!
//! These are passive records: every leaf is nullable and deserialization is
//! lenient, because the upstream model decides what it can read from the
//! exam. Fields the model omits fall back to defaults; fields it nulls out
//! (the prompt instructs "use null") are treated the same way.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accept explicit `null` for list- and object-valued fields, not just a
/// missing key.
fn null_to_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(de)?;
    Ok(opt.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInfo {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<String>,
}

/// A single measurement as the model reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub status: Option<String>,
}

/// One prior exam, when the report carries an evolution table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryEntry {
    pub date: Option<String>,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub muscle_mass: Option<f64>,
    pub score: Option<f64>,
}

/// Practical recommendations, one free-text entry per pillar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    pub diet: Option<String>,
    pub exercise: Option<String>,
    pub hydration: Option<String>,
    pub sleep: Option<String>,
    pub professional: Option<String>,
    pub procedures: Option<String>,
}

/// Derived index computed by the insights pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insight {
    pub name: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// One section of the patient-facing explanation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationSection {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
}

/// The structured half of the report: patient data plus the named metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredReport {
    #[serde(deserialize_with = "null_to_default")]
    pub patient_info: PatientInfo,
    #[serde(deserialize_with = "null_to_default")]
    pub weight: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub bmi: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub body_fat: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub muscle_mass: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub body_water: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub visceral_fat: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub bone_mass: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub bmr: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub metabolic_age: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub score: Metric,
    #[serde(deserialize_with = "null_to_default")]
    pub history: Vec<HistoryEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub recommendations: Recommendations,
    /// Empty after extraction; filled in by the merge step.
    #[serde(deserialize_with = "null_to_default")]
    pub insights: Vec<Insight>,
}

/// What the extraction pass returns, before insights are merged in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionOutput {
    #[serde(deserialize_with = "null_to_default")]
    pub structured: StructuredReport,
    pub raw_json: Option<Value>,
    /// Some models volunteer a prose summary even in the extraction pass;
    /// kept as the explanation of last resort.
    pub explanation: Option<String>,
}

/// What the insights pass returns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightsOutput {
    #[serde(deserialize_with = "null_to_default")]
    pub insights: Vec<Insight>,
    #[serde(deserialize_with = "null_to_default")]
    pub structured_explanation: Vec<ExplanationSection>,
    pub explanation: Option<String>,
}

/// The merged response returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub structured: StructuredReport,
    pub explanation: String,
    pub structured_explanation: Vec<ExplanationSection>,
    pub raw_json: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_report_from_minimal_json() {
        let report: StructuredReport = serde_json::from_str("{}").unwrap();
        assert_eq!(report.patient_info.name, None);
        assert_eq!(report.weight.value, None);
        assert!(report.history.is_empty());
        assert!(report.insights.is_empty());
    }

    #[test]
    fn explicit_nulls_accepted_everywhere() {
        let json = r#"{
            "patientInfo": null,
            "weight": null,
            "bmi": {"value": null, "unit": "kg/m²", "status": null},
            "history": null,
            "recommendations": null,
            "insights": null
        }"#;
        let report: StructuredReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.bmi.unit.as_deref(), Some("kg/m²"));
        assert!(report.history.is_empty());
        assert_eq!(report.recommendations, Recommendations::default());
    }

    #[test]
    fn camel_case_field_names_on_the_wire() {
        let json = r#"{
            "patientInfo": {"name": "Ana Souza", "birthDate": "1990-04-12"},
            "bodyFat": {"value": 28.4, "unit": "%", "status": "acima"},
            "metabolicAge": {"value": 34, "unit": "anos", "status": "acima"}
        }"#;
        let report: StructuredReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.patient_info.name.as_deref(), Some("Ana Souza"));
        assert_eq!(report.patient_info.birth_date.as_deref(), Some("1990-04-12"));
        assert_eq!(report.body_fat.value, Some(28.4));
        assert_eq!(report.metabolic_age.value, Some(34.0));
    }

    #[test]
    fn history_entries_tolerate_missing_values() {
        let json = r#"{
            "history": [
                {"date": "2025-01-10", "weight": 82.0, "bodyFat": 30.1, "muscleMass": 54.2, "score": 68},
                {"date": "2025-06-02", "weight": 78.5}
            ]
        }"#;
        let report: StructuredReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.history.len(), 2);
        assert_eq!(report.history[1].body_fat, None);
    }

    #[test]
    fn extraction_output_defaults() {
        let output: ExtractionOutput = serde_json::from_str(r#"{"structured": {}}"#).unwrap();
        assert!(output.raw_json.is_none());
        assert!(output.explanation.is_none());
    }

    #[test]
    fn insights_output_from_model_json() {
        let json = r#"{
            "insights": [
                {"name": "Índice de Massa Magra", "value": "18.2 kg/m²", "description": "Relação entre massa magra e altura.", "status": "ideal"}
            ],
            "structuredExplanation": [
                {"title": "Visão Geral", "subtitle": "Bom estado geral", "content": "Seu exame indica..."}
            ],
            "explanation": "Resumo em texto corrido."
        }"#;
        let output: InsightsOutput = serde_json::from_str(json).unwrap();
        assert_eq!(output.insights.len(), 1);
        assert_eq!(output.structured_explanation.len(), 1);
        assert_eq!(output.explanation.as_deref(), Some("Resumo em texto corrido."));
    }

    #[test]
    fn analysis_report_serializes_camel_case() {
        let report = AnalysisReport {
            structured: StructuredReport::default(),
            explanation: "ok".into(),
            structured_explanation: vec![],
            raw_json: serde_json::json!({}),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("structuredExplanation").is_some());
        assert!(value.get("rawJson").is_some());
        assert!(value["structured"].get("patientInfo").is_some());
    }
}
