use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Command, MeetupState};

/// One committed command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Position in the log, starting at 0
    pub sequence: u64,
    pub tool_name: String,
    pub tool_call_id: String,
    pub applied_at: DateTime<Utc>,
    pub command: Command,
}

/// Append-only history of the commands applied to a [`MeetupState`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateLog {
    records: Vec<UpdateRecord>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, tool_name: &str, tool_call_id: &str, command: Command) -> &UpdateRecord {
        let record = UpdateRecord {
            sequence: self.records.len() as u64,
            tool_name: tool_name.to_string(),
            tool_call_id: tool_call_id.to_string(),
            applied_at: Utc::now(),
            command,
        };
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[UpdateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rebuild state by applying every record in order to an empty state.
    pub fn replay(&self) -> MeetupState {
        self.records
            .iter()
            .fold(MeetupState::default(), |mut state, record| {
                state.execute(&record.command);
                state
            })
    }
}
