use std::collections::HashMap;

/// Per-user dialogue position. Only one step exists: waiting for a mood message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingMood,
}

/// In-memory conversation states keyed by user id. Never persisted.
///
/// Owned by the supervisor actor, which handles events one at a time, so no locking.
#[derive(Debug, Default)]
pub struct ConversationStates {
    states: HashMap<i64, ConversationState>,
}

impl ConversationStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: i64) -> ConversationState {
        self.states.get(&user_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, user_id: i64, state: ConversationState) {
        match state {
            ConversationState::Idle => self.clear(user_id),
            _ => {
                self.states.insert(user_id, state);
            }
        }
    }

    pub fn clear(&mut self, user_id: i64) {
        self.states.remove(&user_id);
    }

    pub fn is_awaiting_mood(&self, user_id: i64) -> bool {
        self.get(user_id) == ConversationState::AwaitingMood
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_per_user() {
        let mut states = ConversationStates::new();
        assert_eq!(states.get(1), ConversationState::Idle);

        states.set(1, ConversationState::AwaitingMood);
        assert!(states.is_awaiting_mood(1));
        assert!(!states.is_awaiting_mood(2));

        states.clear(1);
        assert_eq!(states.get(1), ConversationState::Idle);
    }

    #[test]
    fn test_setting_idle_removes_entry() {
        let mut states = ConversationStates::new();
        states.set(7, ConversationState::AwaitingMood);
        states.set(7, ConversationState::Idle);
        assert!(states.states.is_empty());
    }
}
