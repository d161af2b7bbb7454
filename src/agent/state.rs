use serde::{Deserialize, Serialize};

use crate::geo::Postcode;

/// A message a tool leaves in the conversation, tagged with its call id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub tool_call_id: String,
    pub content: String,
}

impl ToolMessage {
    pub fn new<S: Into<String>, C: Into<String>>(tool_call_id: S, content: C) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}

/// Shared state of one meetup planning conversation.
///
/// Tools never mutate it; they return a [`Command`] that the session owning
/// the state applies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetupState {
    pub person_1_postcode: Option<Postcode>,
    pub person_2_postcode: Option<Postcode>,
    /// District of the area nearest the midpoint
    pub midpoint_area: Option<String>,
    pub food_place: Option<String>,
    pub activity_place: Option<String>,
    pub messages: Vec<ToolMessage>,
}

impl MeetupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an update: present fields overwrite, messages append.
    pub fn apply(&mut self, update: &MeetupUpdate) {
        fn overwrite<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }

        overwrite(&mut self.person_1_postcode, &update.person_1_postcode);
        overwrite(&mut self.person_2_postcode, &update.person_2_postcode);
        overwrite(&mut self.midpoint_area, &update.midpoint_area);
        overwrite(&mut self.food_place, &update.food_place);
        overwrite(&mut self.activity_place, &update.activity_place);
        self.messages.extend(update.messages.iter().cloned());
    }

    pub fn execute(&mut self, command: &Command) {
        match command {
            Command::UpdateState(update) => self.apply(update),
            Command::ClearState => *self = Self::default(),
        }
    }

    /// Every planning field has a value.
    pub fn is_complete(&self) -> bool {
        self.person_1_postcode.is_some()
            && self.person_2_postcode.is_some()
            && self.midpoint_area.is_some()
            && self.food_place.is_some()
            && self.activity_place.is_some()
    }
}

/// A proposed change to [`MeetupState`]. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetupUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_1_postcode: Option<Postcode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_2_postcode: Option<Postcode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midpoint_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_place: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ToolMessage>,
}

impl MeetupUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_postcodes(mut self, person_1: Postcode, person_2: Postcode) -> Self {
        self.person_1_postcode = Some(person_1);
        self.person_2_postcode = Some(person_2);
        self
    }

    pub fn with_midpoint_area<S: Into<String>>(mut self, area: S) -> Self {
        self.midpoint_area = Some(area.into());
        self
    }

    pub fn with_food_place<S: Into<String>>(mut self, place: S) -> Self {
        self.food_place = Some(place.into());
        self
    }

    pub fn with_activity_place<S: Into<String>>(mut self, place: S) -> Self {
        self.activity_place = Some(place.into());
        self
    }

    pub fn with_message(mut self, message: ToolMessage) -> Self {
        self.messages.push(message);
        self
    }
}

/// What a tool asks the state owner to do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "update", rename_all = "snake_case")]
pub enum Command {
    UpdateState(MeetupUpdate),
    ClearState,
}

impl Command {
    pub fn update(update: MeetupUpdate) -> Self {
        Self::UpdateState(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postcode(raw: &str) -> Postcode {
        Postcode::parse(raw).unwrap()
    }

    #[test]
    fn test_apply_overwrites_present_fields_only() {
        let mut state = MeetupState::new();
        state.apply(
            &MeetupUpdate::new()
                .with_postcodes(postcode("SW1A1AA"), postcode("E11HJ"))
                .with_midpoint_area("City of London"),
        );
        state.apply(&MeetupUpdate::new().with_food_place("Dishoom"));

        assert_eq!(state.person_1_postcode, Some(postcode("SW1A1AA")));
        assert_eq!(state.midpoint_area.as_deref(), Some("City of London"));
        assert_eq!(state.food_place.as_deref(), Some("Dishoom"));
        assert_eq!(state.activity_place, None);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_messages_append() {
        let mut state = MeetupState::new();
        state.apply(&MeetupUpdate::new().with_message(ToolMessage::new("call_1", "first")));
        state.apply(&MeetupUpdate::new().with_message(ToolMessage::new("call_2", "second")));

        let contents: Vec<_> = state.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_clear_state() {
        let mut state = MeetupState::new();
        state.execute(&Command::update(
            MeetupUpdate::new().with_midpoint_area("Hackney"),
        ));
        state.execute(&Command::ClearState);
        assert_eq!(state, MeetupState::default());
    }

    #[test]
    fn test_update_serialization_skips_absent_fields() {
        let update = MeetupUpdate::new().with_midpoint_area("Camden");
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"midpoint_area": "Camden"}));
    }
}
