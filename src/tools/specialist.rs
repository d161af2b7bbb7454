use async_trait::async_trait;
use serde_json::Value;

use super::{empty_parameters, Tool, ToolError, ToolResult, ToolRuntime};
use crate::SharedSpecialist;

pub const SEARCH_FOOD_TOOL: &str = "search_food";
pub const SEARCH_ACTIVITY_TOOL: &str = "search_activity";

/// A delegate that answers a free-text request, typically a sub-agent with
/// web search. Returns its final answer.
#[async_trait]
pub trait Specialist: Send + Sync {
    async fn invoke(&self, query: &str) -> Result<String, ToolError>;
}

/// Hands the saved meetup area to a specialist and relays its answer.
///
/// The area comes from the state snapshot, so `find_area` must have been
/// committed first.
pub struct SpecialistTool {
    name: String,
    description: String,
    /// What to ask for, e.g. "food spots"
    topic: String,
    specialist: SharedSpecialist,
}

impl SpecialistTool {
    pub fn new<N, D, T>(name: N, description: D, topic: T, specialist: SharedSpecialist) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            topic: topic.into(),
            specialist,
        }
    }

    pub fn food(specialist: SharedSpecialist) -> Self {
        Self::new(
            SEARCH_FOOD_TOOL,
            "Food agent finds the top 3 most suitable food spots in the desired location",
            "food spots",
            specialist,
        )
    }

    pub fn activity(specialist: SharedSpecialist) -> Self {
        Self::new(
            SEARCH_ACTIVITY_TOOL,
            "Activity agent finds the top 3 most suitable activities in the desired location",
            "activities",
            specialist,
        )
    }

    pub fn query_for(&self, area: &str) -> String {
        format!("Find the top 3 suitable {} within {}", self.topic, area)
    }
}

#[async_trait]
impl Tool for SpecialistTool {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn parameters(&self) -> Value {
        empty_parameters()
    }

    async fn run(&self, _input: Value, runtime: &ToolRuntime) -> Result<ToolResult, ToolError> {
        let area = runtime
            .state()
            .midpoint_area
            .as_deref()
            .ok_or_else(|| ToolError::MissingState("midpoint_area".to_string()))?;

        let query = self.query_for(area);
        log::info!("{} delegating: {}", self.name, query);

        let answer = self.specialist.invoke(&query).await?;
        if answer.trim().is_empty() {
            return Err(ToolError::ExecutionError(format!(
                "{} returned an empty answer",
                self.name
            )));
        }
        Ok(ToolResult::text(answer))
    }
}
