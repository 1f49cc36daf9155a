//! Scenario tests driving the use case layer end to end: the in-memory
//! store and the real fan-out registry, with channel receivers standing in
//! for WebSocket connections.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use enza_server::domain::{
    Association, ConnectionId, MessagePusher, ParticipantName, RoomId, RoomRepository, Vote,
};
use enza_server::infrastructure::{
    message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
};
use enza_server::usecase::{
    CastVoteUseCase, ClearVotesUseCase, GetSnapshotUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    SetRevealUseCase,
};

struct Harness {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<WebSocketMessagePusher>,
    join: JoinRoomUseCase,
    vote: CastVoteUseCase,
    reveal: SetRevealUseCase,
    clear: ClearVotesUseCase,
    leave: LeaveRoomUseCase,
    snapshot: GetSnapshotUseCase,
}

impl Harness {
    fn new() -> Self {
        let repository: Arc<dyn RoomRepository> = Arc::new(InMemoryRoomRepository::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let message_pusher: Arc<dyn MessagePusher> = pusher.clone();
        Self {
            repository: repository.clone(),
            pusher: pusher.clone(),
            join: JoinRoomUseCase::new(repository.clone(), message_pusher.clone()),
            vote: CastVoteUseCase::new(repository.clone()),
            reveal: SetRevealUseCase::new(repository.clone()),
            clear: ClearVotesUseCase::new(repository.clone()),
            leave: LeaveRoomUseCase::new(repository.clone(), message_pusher),
            snapshot: GetSnapshotUseCase::new(repository),
        }
    }

    async fn connect(&self) -> (ConnectionId, UnboundedReceiver<String>) {
        let conn_id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_connection(conn_id, tx).await;
        (conn_id, rx)
    }
}

fn room(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

fn name(value: &str) -> ParticipantName {
    ParticipantName::new(value.to_string()).unwrap()
}

fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<String> {
    let mut messages = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        messages.push(msg);
    }
    messages
}

#[tokio::test]
async fn test_full_estimation_round() {
    // テスト項目: join → 投票 → 公開 → クリア の1ラウンドが
    //             共有状態とルーム配信の両方で一貫して流れる
    // given (前提条件): alice と bob が同じルームに join 済み
    let harness = Harness::new();
    let r = room("sprint-42");

    let (alice, mut alice_rx) = harness.connect().await;
    let (bob, mut bob_rx) = harness.connect().await;
    harness.join.execute(&alice, &r, &name("alice"), None).await.unwrap();
    harness
        .join
        .execute(&bob, &r, &name("bob"), Some(Vote::new("5".to_string())))
        .await
        .unwrap();

    // when (操作): alice が投票し、公開し、クリアする
    harness
        .vote
        .execute(&r, &name("alice"), Vote::new("8".to_string()))
        .await
        .unwrap();
    let revealed = harness.reveal.execute(&r, true).await.unwrap();
    let cleared = harness.clear.execute(&r).await.unwrap();

    // then (期待する結果): 公開時は両票が見え、クリア後は票だけが消える
    assert_eq!(revealed.votes.len(), 2);
    assert!(revealed.revealed);
    assert!(cleared.votes.is_empty());
    assert_eq!(cleared.members.len(), 2);
    assert!(cleared.revealed);

    // ルーム配信は両接続に届いている
    harness.pusher.push_to_room(&r, "update").await.unwrap();
    assert!(drain(&mut alice_rx).contains(&"update".to_string()));
    assert!(drain(&mut bob_rx).contains(&"update".to_string()));
}

#[tokio::test]
async fn test_leaver_stops_receiving_room_updates() {
    // テスト項目: leave した接続にはルーム配信が届かなくなり、
    //             残りのメンバーには届き続ける
    // given (前提条件): alice と bob が join 済み
    let harness = Harness::new();
    let r = room("r1");

    let (alice, mut alice_rx) = harness.connect().await;
    let (bob, mut bob_rx) = harness.connect().await;
    harness.join.execute(&alice, &r, &name("alice"), None).await.unwrap();
    harness
        .join
        .execute(&bob, &r, &name("bob"), Some(Vote::new("3".to_string())))
        .await
        .unwrap();
    drain(&mut alice_rx);
    drain(&mut bob_rx);

    // when (操作): bob が退室する
    let snapshot = harness
        .leave
        .execute(
            &bob,
            &Association {
                room: r.clone(),
                name: name("bob"),
            },
        )
        .await
        .unwrap();

    // then (期待する結果): bob とその票が共有状態から消えている
    assert!(!snapshot.members.contains("bob"));
    assert!(!snapshot.votes.contains_key("bob"));

    // 以後のルーム配信は alice のみに届く
    harness.pusher.push_to_room(&r, "update").await.unwrap();
    assert_eq!(drain(&mut alice_rx), vec!["update".to_string()]);
    assert!(drain(&mut bob_rx).is_empty());
}

#[tokio::test]
async fn test_last_leave_resets_room_state() {
    // テスト項目: 最後のメンバーの退室でルームが初期状態に戻り、
    //             次の join は新しいラウンドとして始まる
    // given (前提条件): alice だけが join し、投票と公開を済ませている
    let harness = Harness::new();
    let r = room("r1");

    let (alice, _alice_rx) = harness.connect().await;
    harness
        .join
        .execute(&alice, &r, &name("alice"), Some(Vote::new("13".to_string())))
        .await
        .unwrap();
    harness.reveal.execute(&r, true).await.unwrap();

    // when (操作): alice が退室し、carol が同じルームに join する
    harness
        .leave
        .execute(
            &alice,
            &Association {
                room: r.clone(),
                name: name("alice"),
            },
        )
        .await
        .unwrap();
    let (carol, _carol_rx) = harness.connect().await;
    harness.join.execute(&carol, &r, &name("carol"), None).await.unwrap();

    // then (期待する結果): 前ラウンドの票と公開フラグは持ち越されない
    let snapshot = harness.snapshot.execute(&r).await.unwrap();
    assert_eq!(snapshot.members.len(), 1);
    assert!(snapshot.members.contains("carol"));
    assert!(snapshot.votes.is_empty());
    assert!(!snapshot.revealed);

    // repository を直接読んでも同じ状態が見える
    let direct = harness.repository.snapshot(&r).await.unwrap();
    assert_eq!(direct, snapshot);
}
