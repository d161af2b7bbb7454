use crate::agent::MeetupState;

/// Runtime information handed to a tool for one call.
///
/// Holds a snapshot of the shared state taken just before the call, so tools
/// can read it but cannot write it. Changes travel back as a `Command`.
#[derive(Clone, Debug)]
pub struct ToolRuntime {
    state: MeetupState,
    /// Current tool call ID
    pub tool_call_id: String,
}

impl ToolRuntime {
    pub fn new<S: Into<String>>(state: MeetupState, tool_call_id: S) -> Self {
        Self {
            state,
            tool_call_id: tool_call_id.into(),
        }
    }

    pub fn state(&self) -> &MeetupState {
        &self.state
    }
}
