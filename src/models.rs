use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchQuery {
    pub query: String,
}

/// Structured answer the agent is instructed to emit. `tools_used` stays
/// in the schema even though the prompt tells the model to leave it out
/// and the endpoint never surfaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub topic: String,
    pub summary: String,
    pub sources: Vec<String>,
    #[serde(default)]
    pub tools_used: Vec<String>,
}

/// Uniform envelope returned by `POST /ask`, always with HTTP 200.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AskReply {
    Success {
        success: bool,
        topic: String,
        summary: String,
        sources: Vec<String>,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl AskReply {
    pub fn success(response: ResearchResponse) -> Self {
        AskReply::Success {
            success: true,
            topic: response.topic,
            summary: response.summary,
            sources: response.sources,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        AskReply::Failure {
            success: false,
            error: error.into(),
        }
    }
}
