//! Internet search tool.
//!
//! The search backend is an external capability behind [`SearchClient`];
//! [`SearchTool`] adapts it to the [`Tool`] contract for the researcher's
//! reasoning loop. Searches have no side effects and are safe to retry.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use quillcast_types::character::CharacterConfig;
use quillcast_types::error::ToolError;

use super::Tool;

/// One ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// External search capability.
pub trait SearchClient: Send + Sync {
    /// Run a free-text query and return ranked results.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, ToolError>> + Send;
}

/// Object-safe version of [`SearchClient`] with boxed futures.
pub trait SearchClientDyn: Send + Sync {
    fn search_boxed<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, ToolError>> + Send + 'a>>;
}

impl<T: SearchClient> SearchClientDyn for T {
    fn search_boxed<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, ToolError>> + Send + 'a>> {
        Box::pin(self.search(query))
    }
}

/// Type-erased search client.
pub struct BoxSearchClient {
    inner: Box<dyn SearchClientDyn + Send + Sync>,
}

impl BoxSearchClient {
    pub fn new<T: SearchClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        self.inner.search_boxed(query).await
    }
}

/// Model-supplied input for a search call.
#[derive(Debug, Deserialize)]
struct SearchInput {
    query: String,
}

/// The `search_the_internet` tool bound to the researcher.
pub struct SearchTool {
    client: BoxSearchClient,
}

impl SearchTool {
    pub fn new(client: BoxSearchClient) -> Self {
        Self { client }
    }

    /// Render results in a compact list the model can cite from.
    fn render(results: &[SearchResult]) -> String {
        if results.is_empty() {
            return "No results found.".to_string();
        }
        results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {} -- {} ({})", i + 1, r.title, r.snippet, r.url))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search_the_internet"
    }

    fn description(&self) -> &str {
        "Search the internet for a free-text query and return ranked results."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Free-text search query" }
            },
            "required": ["query"],
            "additionalProperties": false
        })
    }

    async fn invoke(
        &self,
        input: serde_json::Value,
        _character: &CharacterConfig,
    ) -> Result<String, ToolError> {
        let input: SearchInput = serde_json::from_value(input)
            .map_err(|e| ToolError::InvalidInput(e.to_string()))?;
        let results = self.client.search(&input.query).await?;
        Ok(Self::render(&results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillcast_types::character::CharacterId;

    struct FixedResults(Vec<SearchResult>);

    impl SearchClient for FixedResults {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, ToolError> {
            Ok(self.0.clone())
        }
    }

    fn character() -> CharacterConfig {
        CharacterConfig {
            character_id: CharacterId::from("char-1"),
            character_name: "Luna".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_tool_renders_ranked_results() {
        let tool = SearchTool::new(BoxSearchClient::new(FixedResults(vec![
            SearchResult {
                title: "Cats".to_string(),
                snippet: "All about cats".to_string(),
                url: "https://example.com/cats".to_string(),
            },
        ])));

        let out = tool
            .invoke(serde_json::json!({"query": "cats"}), &character())
            .await
            .unwrap();
        assert!(out.starts_with("1. Cats"));
        assert!(out.contains("example.com/cats"));
    }

    #[tokio::test]
    async fn test_search_tool_rejects_malformed_input() {
        let tool = SearchTool::new(BoxSearchClient::new(FixedResults(vec![])));
        let err = tool
            .invoke(serde_json::json!({"q": "cats"}), &character())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_search_tool_empty_results() {
        let tool = SearchTool::new(BoxSearchClient::new(FixedResults(vec![])));
        let out = tool
            .invoke(serde_json::json!({"query": "nothing"}), &character())
            .await
            .unwrap();
        assert_eq!(out, "No results found.");
    }
}
