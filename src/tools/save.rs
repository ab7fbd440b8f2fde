use chrono::Local;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::io::AsyncWriteExt;

pub const DEFAULT_OUTPUT_FILE: &str = "research_output.txt";

#[derive(Debug)]
pub struct SaveError(String);

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Save error: {}", self.0)
    }
}

impl std::error::Error for SaveError {}

/// Appends a timestamped block of research output to a text file. The
/// only tool with an external side effect; fire-and-forget, no read
/// path back into the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveToFile;

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveToFileArgs {
    pub data: String,
    pub filename: Option<String>,
}

impl Tool for SaveToFile {
    const NAME: &'static str = "save_text_to_file";

    type Error = SaveError;
    type Args = SaveToFileArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Saves structured research data to a text file.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "data": {
                        "type": "string",
                        "description": "The text to save"
                    },
                    "filename": {
                        "type": "string",
                        "description": "Target file name, defaults to research_output.txt"
                    }
                },
                "required": ["data"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let filename = args
            .filename
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
        append_block(&filename, &args.data)
            .await
            .map_err(|e| SaveError(format!("Failed to write {}: {}", filename, e)))?;
        Ok(format!("Data successfully saved to {}", filename))
    }
}

fn format_block(data: &str, timestamp: &str) -> String {
    format!(
        "--- Research Output ---\nTimestamp: {}\n\n{}\n\n",
        timestamp, data
    )
}

/// The block is formatted in full and written with a single `write_all`
/// to an append-mode handle, so blocks from concurrent requests cannot
/// interleave mid-block.
async fn append_block(filename: &str, data: &str) -> std::io::Result<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let block = format_block(data, &timestamp);

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(filename)
        .await?;
    file.write_all(block.as_bytes()).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig::tool::Tool;

    #[test]
    fn block_has_header_timestamp_and_trailing_blank_line() {
        let block = format_block("Quasars are bright.", "2026-08-25 12:00:00");
        assert_eq!(
            block,
            "--- Research Output ---\nTimestamp: 2026-08-25 12:00:00\n\nQuasars are bright.\n\n"
        );
    }

    #[tokio::test]
    async fn append_creates_file_and_accumulates_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let path_str = path.to_str().unwrap();

        append_block(path_str, "first").await.unwrap();
        append_block(path_str, "second").await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents.matches("--- Research Output ---").count(), 2);
        assert!(contents.contains("\n\nfirst\n\n"));
        assert!(contents.contains("\n\nsecond\n\n"));
    }

    #[tokio::test]
    async fn concurrent_appends_leave_both_blocks_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let path_str = path.to_str().unwrap().to_string();

        let a = tokio::spawn({
            let path = path_str.clone();
            async move { append_block(&path, "block from request A").await }
        });
        let b = tokio::spawn({
            let path = path_str.clone();
            async move { append_block(&path, "block from request B").await }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let blocks: Vec<&str> = contents
            .split("--- Research Output ---\n")
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(blocks.len(), 2);
        for block in blocks {
            assert!(block.starts_with("Timestamp: "));
            assert!(block.contains("block from request"));
            assert!(block.ends_with("\n\n"));
        }
    }

    #[tokio::test]
    async fn tool_call_writes_named_file_and_confirms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let path_str = path.to_str().unwrap().to_string();

        let confirmation = SaveToFile
            .call(SaveToFileArgs {
                data: "saved text".to_string(),
                filename: Some(path_str.clone()),
            })
            .await
            .unwrap();

        assert_eq!(
            confirmation,
            format!("Data successfully saved to {}", path_str)
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("saved text"));
    }
}
