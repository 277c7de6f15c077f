//! Brand-voice analysis result.
//!
//! Both the remote providers and the local fallback scorer produce this shape.
//! All scores except `readability` are 0.0-1.0 fractions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ReplyError;
use super::prompt::strip_code_fences;
use crate::domain::foundation::{Percentage, ValidationError};

/// Threshold above which positivity reads as positive sentiment.
pub const POSITIVE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Flesch-like reading ease, typically 0-100.
    pub readability: f64,
    pub tone: ToneBreakdown,
    pub inclusivity: Inclusivity,
    /// Rewritten text; empty when no rewrite is available.
    #[serde(default)]
    pub improved_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Neutral,
}

impl SentimentLabel {
    /// Label implied by a positivity (or sentiment) score.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

impl Sentiment {
    /// Builds a sentiment whose label is derived from its score.
    pub fn from_score(score: f64) -> Self {
        Self {
            label: SentimentLabel::from_score(score),
            score,
        }
    }
}

/// Communication style triplet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneBreakdown {
    pub formality: f64,
    pub confidence: f64,
    pub positivity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inclusivity {
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<InclusivityIssue>,
}

impl Inclusivity {
    /// Score on the 0-100 display scale.
    pub fn percent(&self) -> Result<Percentage, ValidationError> {
        Percentage::from_fraction(self.score)
    }
}

/// A flagged span with a suggested, more inclusive replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusivityIssue {
    pub index: usize,
    pub text: String,
    pub suggestion: String,
}

impl AnalysisResult {
    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        unit_interval("sentiment.score", self.sentiment.score)?;
        unit_interval("tone.formality", self.tone.formality)?;
        unit_interval("tone.confidence", self.tone.confidence)?;
        unit_interval("tone.positivity", self.tone.positivity)?;
        unit_interval("inclusivity.score", self.inclusivity.score)?;
        if !self.readability.is_finite() {
            return Err(ValidationError::invalid_format(
                "readability",
                "must be a finite number",
            ));
        }
        Ok(())
    }

    /// Interprets the `data` field of a gateway reply.
    ///
    /// String payloads are fence-stripped and parsed as JSON first; any JSON
    /// value must then deserialize into the schema and pass [`validate`].
    ///
    /// [`validate`]: AnalysisResult::validate
    pub fn from_gateway_data(data: &Value) -> Result<Self, ReplyError> {
        let value = match data {
            Value::String(raw) => serde_json::from_str::<Value>(strip_code_fences(raw))
                .map_err(|e| ReplyError::parse(e.to_string()))?,
            other => other.clone(),
        };

        let result: AnalysisResult = serde_json::from_value(value)
            .map_err(|e| ReplyError::schema_mismatch(e.to_string()))?;
        result
            .validate()
            .map_err(|e| ReplyError::schema_mismatch(e.to_string()))?;

        Ok(result)
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, 0.0, 1.0, value))
    }
}
