use anyhow::Result;
use rig::completion::Prompt;
use rig::prelude::*;
use rig::providers::openai;

use crate::tools::{SaveToFile, SearchWeb, WikiLookup};

const MODEL: &str = "gpt-4o-mini";

/// Upper bound on reasoning/tool-call rounds for one query.
const MAX_TOOL_TURNS: usize = 10;

const SYSTEM_PROMPT: &str = r#"You are a research assistant helping generate research summaries using available tools.

You can call tools when needed. Only reply in JSON using this format:
{"topic": "<chosen topic>", "summary": "<prose summary>", "sources": ["<full URL>", ...], "tools_used": []}

Instructions:
- Choose a relevant topic from the query.
- Use tools (search, wiki, save_text_to_file) if helpful.
- Populate all fields: topic, summary, and sources (as full URLs).
- Avoid including "tools_used" in the final output.
- Don't return plain text; return only JSON."#;

type ResearchAgent = rig::agent::Agent<openai::CompletionModel>;

fn build_agent() -> Result<ResearchAgent> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OpenAI API key not configured"))?;
    let client = openai::Client::new(&api_key);
    Ok(client
        .agent(MODEL)
        .preamble(SYSTEM_PROMPT)
        .tool(SearchWeb)
        .tool(WikiLookup)
        .tool(SaveToFile)
        .build())
}

/// Runs one query through the agent loop and returns its final text.
/// The text is not guaranteed to match the instructed JSON format;
/// validation happens in `parser`.
pub async fn run_research(query: &str) -> Result<String> {
    let agent = build_agent()?;
    agent
        .prompt(query)
        .multi_turn(MAX_TOOL_TURNS)
        .await
        .map_err(|e| anyhow::anyhow!("Prompt error: {}", e))
}
