use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::search::TavilyClient;

use super::{parameters_for, Specialist, Tool, ToolError, ToolResult, ToolRuntime};

pub const WEB_SEARCH_TOOL: &str = "web_search";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WebSearchInput {
    /// What to search the web for
    pub query: String,
}

/// Search the web for information. Returns the search response as JSON text.
pub struct WebSearchTool {
    client: Arc<TavilyClient>,
}

impl WebSearchTool {
    pub fn new(client: Arc<TavilyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> String {
        WEB_SEARCH_TOOL.to_string()
    }

    fn description(&self) -> String {
        "Search the web for information".to_string()
    }

    fn parameters(&self) -> Value {
        parameters_for::<WebSearchInput>()
    }

    async fn run(&self, input: Value, _runtime: &ToolRuntime) -> Result<ToolResult, ToolError> {
        // Models sometimes send the bare query instead of {"query": ...}.
        let query = match input {
            Value::String(s) => s,
            other => super::parse_args::<WebSearchInput>(other)?.query,
        };
        if query.trim().is_empty() {
            return Err(ToolError::InvalidInputError("query is empty".to_string()));
        }

        let response = self.client.search(&query).await?;
        Ok(ToolResult::text(response.to_string()))
    }
}

/// A [`Specialist`] that answers with a single web search.
///
/// Returns the service's short answer when it has one, otherwise the raw
/// results as JSON text.
pub struct WebSearchSpecialist {
    client: Arc<TavilyClient>,
}

impl WebSearchSpecialist {
    pub fn new(client: Arc<TavilyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Specialist for WebSearchSpecialist {
    async fn invoke(&self, query: &str) -> Result<String, ToolError> {
        let response = self.client.search(query).await?;
        match response.get("answer").and_then(Value::as_str) {
            Some(answer) if !answer.trim().is_empty() => Ok(answer.to_string()),
            _ => Ok(response.get("results").unwrap_or(&response).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::MeetupState;
    use crate::search::TavilyConfig;

    fn tool_for(server: &mockito::Server) -> WebSearchTool {
        let client = TavilyClient::with_config(
            TavilyConfig::new("tvly-test").with_base_url(server.url()),
        )
        .unwrap();
        WebSearchTool::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_returns_response_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(200)
            .with_body(r#"{"results":[{"title":"Bowling in Shoreditch"}]}"#)
            .create_async()
            .await;

        let runtime = ToolRuntime::new(MeetupState::new(), "call_1");
        let text = tool_for(&server)
            .call(r#"{"query":"bowling near Shoreditch"}"#, &runtime)
            .await
            .unwrap()
            .into_string();

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["results"][0]["title"], "Bowling in Shoreditch");
    }

    #[tokio::test]
    async fn test_service_failure_maps_to_external_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(500)
            .create_async()
            .await;

        let runtime = ToolRuntime::new(MeetupState::new(), "call_1");
        let err = tool_for(&server)
            .call("vegan cafes in Hackney", &runtime)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_specialist_prefers_answer() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "query": "Find the top 3 suitable food spots within Hackney"
            })))
            .with_status(200)
            .with_body(r#"{"answer":"Try Mangal 2.","results":[]}"#)
            .create_async()
            .await;

        let client = TavilyClient::with_config(
            TavilyConfig::new("tvly-test").with_base_url(server.url()),
        )
        .unwrap();
        let specialist = WebSearchSpecialist::new(Arc::new(client));

        let answer = specialist
            .invoke("Find the top 3 suitable food spots within Hackney")
            .await
            .unwrap();
        assert_eq!(answer, "Try Mangal 2.");
    }

    #[tokio::test]
    async fn test_specialist_falls_back_to_results() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(200)
            .with_body(r#"{"answer":null,"results":[{"title":"Hackney City Farm"}]}"#)
            .create_async()
            .await;

        let client = TavilyClient::with_config(
            TavilyConfig::new("tvly-test").with_base_url(server.url()),
        )
        .unwrap();
        let answer = WebSearchSpecialist::new(Arc::new(client))
            .invoke("activities in Hackney")
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&answer).unwrap();
        assert_eq!(parsed[0]["title"], "Hackney City Farm");
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let server = mockito::Server::new_async().await;
        let runtime = ToolRuntime::new(MeetupState::new(), "call_1");
        let err = tool_for(&server)
            .call(r#"{"query":"  "}"#, &runtime)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInputError(_)));
    }
}
