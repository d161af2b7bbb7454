use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::PlannerConfig;
use crate::error::Result as MeetupResult;
use crate::geo::{MidpointAreaResolver, PostcodesClient};
use crate::tools::{
    FindAreaTool, SpecialistTool, Tool, ToolDefinition, ToolError, ToolRuntime, ToolSet,
    UpdateStateTool, WebSearchSpecialist, WebSearchTool,
};
use crate::SharedSpecialist;

use super::{MeetupState, UpdateLog, UpdateRecord};

#[derive(Default)]
struct SessionInner {
    state: MeetupState,
    log: UpdateLog,
}

/// Owns the state of one meetup conversation and commits tool proposals.
///
/// Tools run against a snapshot; their commands are applied and logged under
/// a single lock, so a failed call never leaves a partial update behind.
#[derive(Clone)]
pub struct MeetupSession {
    tools: ToolSet,
    inner: Arc<Mutex<SessionInner>>,
}

impl MeetupSession {
    pub fn new(tools: ToolSet) -> Self {
        Self {
            tools,
            inner: Arc::new(Mutex::new(SessionInner::default())),
        }
    }

    /// Session with the coordinator's tools: `find_area`, `search_food`,
    /// `search_activity` and `update_state`.
    pub fn planner(
        postcodes: Arc<PostcodesClient>,
        food: SharedSpecialist,
        activity: SharedSpecialist,
    ) -> Self {
        let tools = ToolSet::new()
            .with_tool(Arc::new(FindAreaTool::new(
                MidpointAreaResolver::from_service(postcodes),
            )))
            .with_tool(Arc::new(SpecialistTool::food(food)))
            .with_tool(Arc::new(SpecialistTool::activity(activity)))
            .with_tool(Arc::new(UpdateStateTool::new()));
        Self::new(tools)
    }

    /// Planner session whose specialists answer with web searches. Also
    /// registers `web_search` itself. Fails when search is not configured.
    pub fn from_config(config: &PlannerConfig) -> MeetupResult<Self> {
        let search = config.search_client()?;
        let specialist: SharedSpecialist = Arc::new(WebSearchSpecialist::new(search.clone()));
        Ok(
            Self::planner(config.postcodes_client()?, specialist.clone(), specialist)
                .with_tool(Arc::new(WebSearchTool::new(search))),
        )
    }

    /// Register one more tool. Call before the session is shared.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.add(tool);
        self
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }

    pub async fn snapshot(&self) -> MeetupState {
        self.inner.lock().await.state.clone()
    }

    pub async fn history(&self) -> Vec<UpdateRecord> {
        self.inner.lock().await.log.records().to_vec()
    }

    /// Rebuild the state from the update log alone.
    pub async fn replay(&self) -> MeetupState {
        self.inner.lock().await.log.replay()
    }

    /// Run one tool call and commit whatever it proposes. Returns the tool's text.
    pub async fn invoke(
        &self,
        tool_name: &str,
        input: &str,
        tool_call_id: &str,
    ) -> Result<String, ToolError> {
        let runtime = ToolRuntime::new(self.snapshot().await, tool_call_id);

        log::info!("Invoking {} ({})", tool_name, tool_call_id);
        let result = match self.tools.call(tool_name, input, &runtime).await {
            Ok(result) => result,
            Err(e) => {
                log::warn!("{} ({}) failed: {}", tool_name, tool_call_id, e);
                return Err(e);
            }
        };

        let (text, command) = result.into_parts();
        if let Some(command) = command {
            let mut inner = self.inner.lock().await;
            inner.state.execute(&command);
            let record = inner.log.append(tool_name, tool_call_id, command);
            log::info!("Committed update #{} from {}", record.sequence, tool_name);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::agent::Command;
    use crate::error::MeetupError;
    use crate::search::TavilyConfig;
    use crate::tools::Specialist;
    use crate::geo::testing::{FixedGeocoder, RecordingAreas};

    struct Canned(&'static str);

    #[async_trait]
    impl Specialist for Canned {
        async fn invoke(&self, query: &str) -> Result<String, ToolError> {
            Ok(format!("{} for [{}]", self.0, query))
        }
    }

    fn session(areas: RecordingAreas) -> MeetupSession {
        let geocoder = Arc::new(FixedGeocoder::new(&[
            ("SW1A1AA", (51.5, -0.1)),
            ("E11HJ", (51.52, -0.12)),
        ]));
        let tools = ToolSet::new()
            .with_tool(Arc::new(FindAreaTool::new(MidpointAreaResolver::new(
                geocoder,
                Arc::new(areas),
            ))))
            .with_tool(Arc::new(SpecialistTool::food(Arc::new(Canned("curry")))))
            .with_tool(Arc::new(UpdateStateTool::new()));
        MeetupSession::new(tools)
    }

    fn find_area_input() -> String {
        json!({"person_1_postcode": "sw1a 1aa", "person_2_postcode": "e1 1hj"}).to_string()
    }

    #[tokio::test]
    async fn test_find_area_commits_update() {
        let session = session(RecordingAreas::found("City of London"));

        let text = session
            .invoke("find_area", &find_area_input(), "call_1")
            .await
            .unwrap();
        assert_eq!(text, "Saved midpoint area");

        let state = session.snapshot().await;
        assert_eq!(state.person_1_postcode.unwrap().as_str(), "SW1A1AA");
        assert_eq!(state.person_2_postcode.unwrap().as_str(), "E11HJ");
        assert_eq!(state.midpoint_area.as_deref(), Some("City of London"));
        assert_eq!(state.messages.len(), 1);

        let history = session.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].tool_call_id, "call_1");
        assert!(matches!(history[0].command, Command::UpdateState(_)));
    }

    #[tokio::test]
    async fn test_failed_call_leaves_state_untouched() {
        let session = session(RecordingAreas::failing("status 500"));

        let err = session
            .invoke("find_area", &find_area_input(), "call_1")
            .await
            .unwrap_err();

        assert!(err.geo().is_some_and(|e| e.is_resolution()));
        assert_eq!(session.snapshot().await, MeetupState::default());
        assert!(session.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_specialist_reads_committed_area() {
        let session = session(RecordingAreas::found("Islington"));

        let err = session.invoke("search_food", "{}", "call_0").await.unwrap_err();
        assert!(matches!(err, ToolError::MissingState(_)));

        session
            .invoke("find_area", &find_area_input(), "call_1")
            .await
            .unwrap();
        let answer = session.invoke("search_food", "{}", "call_2").await.unwrap();

        assert_eq!(
            answer,
            "curry for [Find the top 3 suitable food spots within Islington]"
        );
        assert_eq!(session.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_replay_matches_live_state() {
        let session = session(RecordingAreas::found("Hackney"));
        session
            .invoke("find_area", &find_area_input(), "call_1")
            .await
            .unwrap();
        let plan = json!({
            "person_1_postcode": "SW1A1AA",
            "person_2_postcode": "E11HJ",
            "midpoint_area": "Hackney",
            "food_place": "Mangal 2",
            "activity_place": "Climbing wall",
        });
        session
            .invoke("update_state", &plan.to_string(), "call_2")
            .await
            .unwrap();

        let live = session.snapshot().await;
        assert!(live.is_complete());
        assert_eq!(session.replay().await, live);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let session = session(RecordingAreas::found("Camden"));
        let err = session.invoke("book_table", "{}", "call_1").await.unwrap_err();
        assert!(matches!(err, ToolError::ToolNotFound(_)));
    }

    #[test]
    fn test_planner_tool_surface() {
        let postcodes = Arc::new(PostcodesClient::new().unwrap());
        let session = MeetupSession::planner(
            postcodes,
            Arc::new(Canned("food")),
            Arc::new(Canned("fun")),
        );
        assert_eq!(
            session.tools().names(),
            &["find_area", "search_food", "search_activity", "update_state"]
        );
    }

    #[test]
    fn test_from_config_adds_web_search() {
        let config = PlannerConfig::default().with_search(TavilyConfig::new("tvly-key"));
        let session = MeetupSession::from_config(&config).unwrap();
        assert_eq!(
            session.tools().names(),
            &["find_area", "search_food", "search_activity", "update_state", "web_search"]
        );
    }

    #[test]
    fn test_from_config_needs_search() {
        let err = MeetupSession::from_config(&PlannerConfig::default()).err().unwrap();
        assert!(matches!(err, MeetupError::ConfigurationError(_)));
    }

    #[tokio::test]
    async fn test_with_tool_is_callable() {
        let session = session(RecordingAreas::found("Camden")).with_tool(Arc::new(
            SpecialistTool::activity(Arc::new(Canned("darts"))),
        ));
        session
            .invoke("find_area", &find_area_input(), "call_1")
            .await
            .unwrap();

        let answer = session.invoke("search_activity", "{}", "call_2").await.unwrap();
        assert_eq!(
            answer,
            "darts for [Find the top 3 suitable activities within Camden]"
        );
    }
}
