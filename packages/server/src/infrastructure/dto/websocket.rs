//! WebSocket wire formats.
//!
//! Inbound events carry a `type` tag in kebab-case; outbound messages
//! mirror that convention. Each outbound message carries exactly one
//! snapshot field: a handler broadcasts only the fields its event is
//! allowed to touch, so a vote never re-announces the reveal flag.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Inbound client events.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join a room, optionally casting an initial vote.
    Join {
        room: String,
        name: String,
        #[serde(default)]
        vote: Option<String>,
    },
    /// Cast or change a vote.
    Vote {
        room: String,
        name: String,
        vote: String,
    },
    /// Set the room-wide reveal flag.
    Reveal { room: String, revealed: bool },
    /// Clear every vote in the room.
    ClearVotes { room: String },
}

/// Outbound message type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageType {
    #[serde(rename = "members-update")]
    MembersUpdate,
    #[serde(rename = "votes-update")]
    VotesUpdate,
    #[serde(rename = "reveal-update")]
    RevealUpdate,
    #[serde(rename = "error")]
    Error,
}

/// Room membership changed.
#[derive(Debug, Clone, Serialize)]
pub struct MembersUpdateMessage {
    pub r#type: MessageType,
    /// Sorted for deterministic output; ordering carries no meaning.
    pub members: Vec<String>,
}

/// The vote mapping changed. Only participants with a cast vote appear.
#[derive(Debug, Clone, Serialize)]
pub struct VotesUpdateMessage {
    pub r#type: MessageType,
    pub votes: HashMap<String, String>,
}

/// The reveal flag changed.
#[derive(Debug, Clone, Serialize)]
pub struct RevealUpdateMessage {
    pub r#type: MessageType,
    pub revealed: bool,
}

/// Connection-scoped error notification, sent point-to-point to the
/// originating connection only.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            r#type: MessageType::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_event_deserializes_with_optional_vote() {
        // テスト項目: join イベントは vote なしでもパースできる
        // given (前提条件):
        let json = r#"{"type":"join","room":"r1","name":"alice"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match event {
            ClientEvent::Join { room, name, vote } => {
                assert_eq!(room, "r1");
                assert_eq!(name, "alice");
                assert_eq!(vote, None);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_clear_votes_event_uses_kebab_case_tag() {
        // テスト項目: clear-votes イベントのタグは kebab-case
        // given (前提条件):
        let json = r#"{"type":"clear-votes","room":"r1"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert!(matches!(event, ClientEvent::ClearVotes { room } if room == "r1"));
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        // テスト項目: 未知のイベントタイプはエラー
        // given (前提条件):
        let json = r#"{"type":"shout","room":"r1"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_outbound_messages_serialize_with_kebab_case_tags() {
        // テスト項目: 送信メッセージのタグが仕様どおりの kebab-case になる
        // given (前提条件):
        let msg = RevealUpdateMessage {
            r#type: MessageType::RevealUpdate,
            revealed: true,
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"reveal-update","revealed":true}"#);
    }

    #[test]
    fn test_error_message_shape() {
        let json = serde_json::to_string(&ErrorMessage::new("Failed to join room")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"Failed to join room"}"#);
    }
}
