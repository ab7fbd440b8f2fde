use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;

/// Marker prefixed to in-band failure strings. The agent only sees
/// text, so lookup failures travel through the same channel as URLs.
pub const WIKI_ERROR_PREFIX: &str = "Wikipedia error:";

#[derive(Debug, Deserialize)]
struct PageSummary {
    content_urls: ContentUrls,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: PageUrls,
}

#[derive(Debug, Deserialize)]
struct PageUrls {
    page: String,
}

/// Resolves a topic to its canonical Wikipedia article URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiLookup;

#[derive(Debug, Serialize, Deserialize)]
pub struct WikiLookupArgs {
    pub topic: String,
}

impl Tool for WikiLookup {
    const NAME: &'static str = "wiki";

    type Error = Infallible;
    type Args = WikiLookupArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get the Wikipedia URL for a topic".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "The topic to look up"
                    }
                },
                "required": ["topic"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(lookup_url(&args.topic)
            .await
            .unwrap_or_else(|e| in_band_error(&e)))
    }
}

fn in_band_error(error: &impl std::fmt::Display) -> String {
    format!("{} {}", WIKI_ERROR_PREFIX, error)
}

async fn lookup_url(topic: &str) -> anyhow::Result<String> {
    let title = topic.trim().replace(' ', "_");
    let endpoint = format!("https://en.wikipedia.org/api/rest_v1/page/summary/{}", title);

    let response = reqwest::Client::new()
        .get(&endpoint)
        .header(reqwest::header::USER_AGENT, "research-agent-server/0.1")
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("no page found for \"{}\"", topic.trim());
    }

    let summary: PageSummary = response.json().await?;
    Ok(summary.content_urls.desktop.page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_encoded_as_marked_text() {
        let err = anyhow::anyhow!("no page found for \"Xqzzyplex\"");
        let text = in_band_error(&err);
        assert!(text.starts_with(WIKI_ERROR_PREFIX));
        assert!(text.contains("Xqzzyplex"));
    }

    #[test]
    fn summary_payload_yields_canonical_url() {
        let body = r#"{
            "title": "Quasar",
            "content_urls": {
                "desktop": {"page": "https://en.wikipedia.org/wiki/Quasar"},
                "mobile": {"page": "https://en.m.wikipedia.org/wiki/Quasar"}
            }
        }"#;
        let summary: PageSummary = serde_json::from_str(body).unwrap();
        assert_eq!(
            summary.content_urls.desktop.page,
            "https://en.wikipedia.org/wiki/Quasar"
        );
    }
}
