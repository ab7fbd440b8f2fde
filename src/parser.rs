use anyhow::{anyhow, Result};

use crate::models::ResearchResponse;

/// Validates the agent's final text against the response schema. The
/// model is only instructed to emit strict JSON, so the text is treated
/// as untrusted: the JSON payload is located first, then deserialized.
pub fn parse_research_response(raw: &str) -> Result<ResearchResponse> {
    let payload = extract_json(raw);
    serde_json::from_str(payload).map_err(|e| anyhow!("Invalid research response: {}", e))
}

/// Models routinely wrap the payload in markdown fences or surrounding
/// prose. Take the span from the first `{` to the last `}`.
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
