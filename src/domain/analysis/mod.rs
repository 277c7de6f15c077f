//! Analysis domain.
//!
//! Request and result vocabulary shared by the gateway and the dashboard,
//! the provider prompt, and the deterministic fallback scorer.

mod errors;
mod fallback;
mod prompt;
mod request;
mod result;

pub use errors::ReplyError;
pub use fallback::{fallback_score, word_count, IMPROVED_PREFIX};
pub use prompt::{build_analysis_prompt, strip_code_fences, SYSTEM_PROMPT};
pub use request::{AnalysisRequest, AnalysisText, ProviderKind};
pub use result::{
    AnalysisResult, Inclusivity, InclusivityIssue, Sentiment, SentimentLabel, ToneBreakdown,
    POSITIVE_THRESHOLD,
};
