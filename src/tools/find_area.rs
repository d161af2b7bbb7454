use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::agent::{Command, MeetupUpdate, ToolMessage};
use crate::geo::MidpointAreaResolver;

use super::{parameters_for, parse_args, Tool, ToolError, ToolResult, ToolRuntime};

pub const FIND_AREA_TOOL: &str = "find_area";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FindAreaInput {
    /// Postcode of person 1, e.g. "SW1A 1AA"
    pub person_1_postcode: String,
    /// Postcode of person 2, e.g. "E1 1HJ"
    pub person_2_postcode: String,
}

/// Finds the area halfway between two people and saves it to the meetup state.
///
/// Either every field is proposed (both normalized postcodes and the district)
/// or the call fails with nothing proposed.
pub struct FindAreaTool {
    resolver: MidpointAreaResolver,
}

impl FindAreaTool {
    pub fn new(resolver: MidpointAreaResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Tool for FindAreaTool {
    fn name(&self) -> String {
        FIND_AREA_TOOL.to_string()
    }

    fn description(&self) -> String {
        "Finds the area from given postcodes".to_string()
    }

    fn parameters(&self) -> Value {
        parameters_for::<FindAreaInput>()
    }

    async fn run(&self, input: Value, runtime: &ToolRuntime) -> Result<ToolResult, ToolError> {
        let args: FindAreaInput = parse_args(input)?;

        let resolution = self
            .resolver
            .resolve_raw(&args.person_1_postcode, &args.person_2_postcode)
            .await?;

        log::info!(
            "Meetup area for {} and {} is {}",
            resolution.person_1_postcode,
            resolution.person_2_postcode,
            resolution.area.district
        );

        let text = "Saved midpoint area";
        let update = MeetupUpdate::new()
            .with_postcodes(resolution.person_1_postcode, resolution.person_2_postcode)
            .with_midpoint_area(resolution.area.district)
            .with_message(ToolMessage::new(runtime.tool_call_id.clone(), text));

        Ok(ToolResult::with_command(text, Command::update(update)))
    }
}
