/// Per-conversation session state and the shared session store.
///
/// The session key combines (channel, conversation, user) into a
/// stable composite so the same person in two conversations gets two
/// independent flows.
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use ekyc_channels::Activity;
use ekyc_core::FieldRecord;

/// A stable key for session lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub channel: String,
    pub conversation: String,
    pub user: String,
}

impl SessionKey {
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            channel: activity.channel_id.clone().unwrap_or_else(|| "_".into()),
            conversation: activity
                .conversation
                .as_ref()
                .and_then(|c| c.id.clone())
                .unwrap_or_else(|| "_".into()),
            user: activity
                .from
                .as_ref()
                .and_then(|f| f.id.clone())
                .unwrap_or_else(|| "_".into()),
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.channel, self.conversation, self.user)
    }
}

/// Which step of the EKYC flow a conversation is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogStep {
    #[default]
    Welcome,
    DetailsForm,
    PhonePrompt,
    AwaitDocument,
    Done,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub step: DialogStep,
    pub details: FieldRecord,
    /// Set after a rejected contact number, switching the prompt to
    /// the reprompt wording.
    pub phone_reprompt: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory session map shared across webhook requests.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a key, or a fresh session.
    pub async fn load(&self, key: &SessionKey) -> SessionState {
        self.sessions
            .read()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn save(&self, key: SessionKey, state: SessionState) {
        self.sessions.write().await.insert(key, state);
    }

    pub async fn remove(&self, key: &SessionKey) {
        self.sessions.write().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_returns_fresh_session_for_unknown_key() {
        let store = SessionStore::new();
        let key = SessionKey {
            channel: "emulator".into(),
            conversation: "c1".into(),
            user: "u1".into(),
        };
        let state = store.load(&key).await;
        assert_eq!(state.step, DialogStep::Welcome);
        assert!(state.details.is_empty());
    }

    #[tokio::test]
    async fn save_and_remove_roundtrip() {
        let store = SessionStore::new();
        let key = SessionKey {
            channel: "emulator".into(),
            conversation: "c1".into(),
            user: "u1".into(),
        };
        let mut state = SessionState::new();
        state.step = DialogStep::PhonePrompt;
        store.save(key.clone(), state).await;
        assert_eq!(store.load(&key).await.step, DialogStep::PhonePrompt);

        store.remove(&key).await;
        assert_eq!(store.load(&key).await.step, DialogStep::Welcome);
    }

    #[test]
    fn key_from_activity_falls_back_to_placeholders() {
        let key = SessionKey::from_activity(&Activity::default());
        assert_eq!(key.to_string(), "_/_/_");
    }
}
