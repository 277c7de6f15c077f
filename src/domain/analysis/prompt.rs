//! Prompt template for the analysis providers.

/// System role sent to chat-completion providers.
pub const SYSTEM_PROMPT: &str = "You are a professional brand communication analyst.";

/// Builds the fixed analysis prompt around the user's text.
///
/// The text is embedded verbatim; the transport's JSON encoding is the only
/// escaping applied.
pub fn build_analysis_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following brand communication for tone, inclusivity, and readability.

Text:
"""
{}
"""

Respond with strict JSON only, no commentary, using exactly this structure:
{{
  "sentiment": {{ "label": "POSITIVE" | "NEUTRAL", "score": 0.0-1.0 }},
  "readability": 0-100 (Flesch reading ease),
  "tone": {{ "formality": 0.0-1.0, "confidence": 0.0-1.0, "positivity": 0.0-1.0 }},
  "inclusivity": {{
    "score": 0.0-1.0,
    "issues": [{{ "index": <word position>, "text": "<flagged phrase>", "suggestion": "<inclusive alternative>" }}]
  }},
  "improvedText": "<the text rewritten in a clear, confident, inclusive brand voice>"
}}"#,
        text
    )
}

/// Removes a surrounding Markdown code fence (```json ... ``` or ``` ... ```).
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match body.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &body[4..],
        _ => body,
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}
