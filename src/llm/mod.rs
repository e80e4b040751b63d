//! Remote vision-model domain — the query contract and the Gemini client.

mod gemini;

pub use gemini::GeminiClient;

use crate::capture::ImagePayload;
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response contained no candidate text")]
    EmptyResponse,
}

/// Contract for one image-plus-instruction round trip to a vision model.
///
/// Single attempt: no retry, no timeout beyond the transport default. The
/// caller logs the error detail; callers never discriminate between the
/// failure causes.
pub trait ModelClient: Send + Sync {
    fn query(
        &self,
        image: &ImagePayload,
        instruction: &str,
        model: &str,
    ) -> impl Future<Output = Result<String, QueryError>> + Send;
}
