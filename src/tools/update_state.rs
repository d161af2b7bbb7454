use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::agent::{Command, MeetupUpdate, ToolMessage};
use crate::geo::Postcode;

use super::{parameters_for, parse_args, Tool, ToolError, ToolResult, ToolRuntime};

pub const UPDATE_STATE_TOOL: &str = "update_state";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateStateInput {
    pub person_1_postcode: String,
    pub person_2_postcode: String,
    /// District both people will meet in
    pub midpoint_area: String,
    /// Chosen food spot
    pub food_place: String,
    /// Chosen activity
    pub activity_place: String,
}

/// Records the final plan once every value is known.
#[derive(Debug, Default)]
pub struct UpdateStateTool;

impl UpdateStateTool {
    pub fn new() -> Self {
        Self
    }
}

fn non_empty(value: String, field: &str) -> Result<String, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::InvalidInputError(format!("{} is empty", field)));
    }
    Ok(trimmed.to_string())
}

fn postcode(value: &str, field: &str) -> Result<Postcode, ToolError> {
    Postcode::parse(value).map_err(|e| ToolError::InvalidInputError(format!("{}: {}", field, e)))
}

#[async_trait]
impl Tool for UpdateStateTool {
    fn name(&self) -> String {
        UPDATE_STATE_TOOL.to_string()
    }

    fn description(&self) -> String {
        "Update the state when you know all of the values".to_string()
    }

    fn parameters(&self) -> Value {
        parameters_for::<UpdateStateInput>()
    }

    async fn run(&self, input: Value, runtime: &ToolRuntime) -> Result<ToolResult, ToolError> {
        let args: UpdateStateInput = parse_args(input)?;

        let update = MeetupUpdate::new()
            .with_postcodes(
                postcode(&args.person_1_postcode, "person_1_postcode")?,
                postcode(&args.person_2_postcode, "person_2_postcode")?,
            )
            .with_midpoint_area(non_empty(args.midpoint_area, "midpoint_area")?)
            .with_food_place(non_empty(args.food_place, "food_place")?)
            .with_activity_place(non_empty(args.activity_place, "activity_place")?);

        let text = "Successfully updated state";
        let update = update.with_message(ToolMessage::new(runtime.tool_call_id.clone(), text));

        Ok(ToolResult::with_command(text, Command::update(update)))
    }
}
