pub mod extraction;
pub mod insights;
pub mod openrouter;
pub mod orchestrator;
pub mod prompts;
pub mod sanitize;

pub use extraction::*;
pub use insights::*;
pub use openrouter::*;
pub use orchestrator::*;
pub use prompts::*;
pub use sanitize::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("OpenRouter is unreachable at {0}")]
    Connection(String),

    #[error("OpenRouter returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Model response carried no content")]
    EmptyResponse,

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("No extraction model produced a result")]
    NoModelSucceeded,
}
