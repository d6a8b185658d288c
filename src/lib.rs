//! BioInsight — bioimpedance exam analysis service.
//!
//! A user uploads a bioimpedance exam photo (or pastes the report text) and
//! receives a structured breakdown plus an AI-generated explanation and
//! recommendations. Interpretation is delegated to an OpenRouter-compatible
//! chat-completions API: an extraction pass first (with model fallback),
//! then a reasoning pass for derived indices, then a merge of the two.

pub mod api;
pub mod config;
pub mod models;
pub mod pipeline;
