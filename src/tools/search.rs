use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;

#[derive(Debug)]
pub struct SearchError(String);

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Search error: {}", self.0)
    }
}

impl std::error::Error for SearchError {}

#[derive(Debug, Serialize)]
struct TavilyRequest {
    query: String,
    max_results: i32,
    search_depth: String,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<TavilyHit>,
}

#[derive(Debug, Deserialize)]
struct TavilyHit {
    title: String,
    url: String,
    content: String,
}

/// Web search backed by the Tavily API. Output is free text; the agent
/// gets whatever the backend returned, one block per hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchWeb;

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchWebArgs {
    pub query: String,
}

impl Tool for SearchWeb {
    const NAME: &'static str = "search";

    type Error = SearchError;
    type Args = SearchWebArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web for information. Input should be a search query string."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let api_key = env::var("TAVILY_API_KEY")
            .map_err(|_| SearchError("TAVILY_API_KEY not set".to_string()))?;

        let request = TavilyRequest {
            query: args.query,
            max_results: 5,
            search_depth: "basic".to_string(),
        };

        let response = reqwest::Client::new()
            .post("https://api.tavily.com/search")
            .header("api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError(format!("Request failed: {}", e)))?;

        let search_response: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError(format!("Failed to parse response: {}", e)))?;

        Ok(format_hits(&search_response.results))
    }
}

fn format_hits(hits: &[TavilyHit]) -> String {
    if hits.is_empty() {
        return "No results found for this query.".to_string();
    }
    hits.iter()
        .map(|hit| format!("{}\n{}\n{}", hit.title, hit.url, hit.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hit_list_reports_no_results() {
        assert_eq!(format_hits(&[]), "No results found for this query.");
    }

    #[test]
    fn hits_are_formatted_as_text_blocks() {
        let hits = vec![
            TavilyHit {
                title: "Quasar".to_string(),
                url: "https://en.wikipedia.org/wiki/Quasar".to_string(),
                content: "An extremely luminous active galactic nucleus.".to_string(),
            },
            TavilyHit {
                title: "Quasars explained".to_string(),
                url: "https://example.org/quasars".to_string(),
                content: "Overview article.".to_string(),
            },
        ];
        let text = format_hits(&hits);
        assert!(text.contains("https://en.wikipedia.org/wiki/Quasar"));
        assert!(text.contains("Quasars explained"));
        assert_eq!(text.matches("\n\n").count(), 1);
    }
}
