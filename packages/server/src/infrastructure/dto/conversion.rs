//! Domain model to DTO conversions.
//!
//! Each update message takes exactly one field from a snapshot; the caller
//! decides which updates an event is allowed to emit.

use crate::domain::RoomSnapshot;

use super::websocket::{
    MembersUpdateMessage, MessageType, RevealUpdateMessage, VotesUpdateMessage,
};

impl From<&RoomSnapshot> for MembersUpdateMessage {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            r#type: MessageType::MembersUpdate,
            // BTreeSet iteration order keeps the member list sorted.
            members: snapshot.members.iter().cloned().collect(),
        }
    }
}

impl From<&RoomSnapshot> for VotesUpdateMessage {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            r#type: MessageType::VotesUpdate,
            votes: snapshot.votes.clone(),
        }
    }
}

impl From<&RoomSnapshot> for RevealUpdateMessage {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            r#type: MessageType::RevealUpdate,
            revealed: snapshot.revealed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_update_is_sorted() {
        // テスト項目: members-update のメンバーリストはソート済み
        // given (前提条件):
        let mut snapshot = RoomSnapshot::default();
        snapshot.members.insert("charlie".to_string());
        snapshot.members.insert("alice".to_string());
        snapshot.members.insert("bob".to_string());

        // when (操作):
        let msg = MembersUpdateMessage::from(&snapshot);

        // then (期待する結果):
        assert_eq!(msg.members, vec!["alice", "bob", "charlie"]);
    }

    #[test]
    fn test_votes_update_carries_only_cast_votes() {
        // テスト項目: votes-update には投票済みの参加者のみ含まれる
        // given (前提条件):
        let mut snapshot = RoomSnapshot::default();
        snapshot.members.insert("alice".to_string());
        snapshot.members.insert("bob".to_string());
        snapshot
            .votes
            .insert("alice".to_string(), "8".to_string());

        // when (操作):
        let msg = VotesUpdateMessage::from(&snapshot);

        // then (期待する結果):
        assert_eq!(msg.votes.len(), 1);
        assert_eq!(msg.votes.get("alice"), Some(&"8".to_string()));
    }

    #[test]
    fn test_reveal_update_carries_flag() {
        let snapshot = RoomSnapshot {
            revealed: true,
            ..RoomSnapshot::default()
        };
        let msg = RevealUpdateMessage::from(&snapshot);
        assert!(msg.revealed);
    }
}
