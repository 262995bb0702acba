use chrono::{Duration, Utc};
use history::{
    BoundedHistoryStore, ChatHistory, GuardedAppender, Message, Role, Turn, TurnId, WindowSize,
};
use std::sync::Arc;

fn store() -> Arc<BoundedHistoryStore> {
    Arc::new(BoundedHistoryStore::new(WindowSize::Exchanges(4)))
}

fn turn_at(id: &str, offset_ms: i64) -> Turn {
    Turn::with_id(TurnId::from(id), Utc::now() + Duration::milliseconds(offset_ms), id)
}

#[tokio::test]
async fn live_turn_commits_tagged_reply() {
    let store = store();
    let turn = Turn::new("what is 2 + 2?");
    let gate = GuardedAppender::new(store.clone(), turn.clone());

    gate.append_all(vec![turn.message(), Message::assistant("4")])
        .await
        .unwrap();

    let msgs = store.messages().await;
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[0].role, Role::Human);
    assert_eq!(msgs[1].content, "4");
    assert!(msgs.iter().all(|m| m.turn.as_ref() == Some(&turn.id)));
}

#[tokio::test]
async fn stale_reply_after_full_reset_is_dropped() {
    let store = store();
    let gate = GuardedAppender::new(store.clone(), turn_at("t1", -1_000));

    store.clear(None).await.unwrap();
    gate.append(Message::assistant("late reply")).await.unwrap();

    assert!(store.messages().await.is_empty());
    assert!(!gate.is_live().await);
}

#[tokio::test]
async fn turn_submitted_after_reset_survives() {
    let store = store();
    let stale = GuardedAppender::new(store.clone(), turn_at("t1", -1_000));
    store.clear(None).await.unwrap();
    stale.append(Message::assistant("late reply")).await.unwrap();

    let reset = store.last_reset().await;
    let fresh = Turn::with_id("t2".into(), reset + Duration::milliseconds(1), "again");
    let gate = GuardedAppender::new(store.clone(), fresh);
    gate.append(Message::assistant("fresh reply")).await.unwrap();

    let msgs = store.messages().await;
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].content, "fresh reply");
    assert_eq!(msgs[0].turn, Some(TurnId::from("t2")));
}

#[tokio::test]
async fn selectively_cleared_turn_commits_nothing() {
    let store = store();
    let keep = GuardedAppender::new(store.clone(), turn_at("keep", 0));
    let drop = GuardedAppender::new(store.clone(), turn_at("drop", 0));

    store
        .clear(Some(&[TurnId::from("drop")][..]))
        .await
        .unwrap();

    drop.append_all(vec![Message::human("q"), Message::assistant("a")])
        .await
        .unwrap();
    keep.append_all(vec![Message::human("q"), Message::assistant("a")])
        .await
        .unwrap();

    let msgs = store.messages().await;
    assert_eq!(msgs.len(), 2);
    assert!(msgs.iter().all(|m| m.turn == Some(TurnId::from("keep"))));
}

#[tokio::test]
async fn gate_clear_is_a_full_reset() {
    let store = store();
    let a = GuardedAppender::new(store.clone(), turn_at("a", -10));
    let b = GuardedAppender::new(store.clone(), turn_at("b", -10));
    a.append(Message::assistant("ra")).await.unwrap();
    b.append(Message::assistant("rb")).await.unwrap();

    a.clear(Some(&[TurnId::from("a")][..])).await.unwrap();

    assert!(store.is_empty().await);
    assert!(!b.is_live().await);
}

#[tokio::test]
async fn gate_reads_through_to_store() {
    let store = store();
    let gate = GuardedAppender::new(store.clone(), turn_at("a", 0));
    gate.append(Message::assistant("hi")).await.unwrap();
    assert_eq!(gate.messages().await, store.messages().await);
}

#[tokio::test]
async fn concurrent_replies_racing_a_reset() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let store = Arc::new(BoundedHistoryStore::new(WindowSize::Unbounded));
    let before = Utc::now() - Duration::seconds(1);

    let mut handles = Vec::new();
    for i in 0..32 {
        let turn = Turn::with_id(format!("old{i}").into(), before, "q");
        let gate = GuardedAppender::new(store.clone(), turn);
        handles.push(tokio::spawn(async move {
            tokio::task::yield_now().await;
            gate.append(Message::assistant("r")).await
        }));
    }
    store.clear(None).await.unwrap();
    for h in handles {
        h.await.unwrap().unwrap();
    }

    // Whatever raced ahead of the reset was wiped by it; nothing after it
    // may land for a turn submitted before it.
    assert!(store.messages().await.is_empty());

    let reset = store.last_reset().await;
    let mut handles = Vec::new();
    for i in 0..16 {
        let turn = Turn::with_id(format!("new{i}").into(), reset + Duration::milliseconds(1), "q");
        let gate = GuardedAppender::new(store.clone(), turn);
        handles.push(tokio::spawn(async move {
            gate.append_all(vec![Message::human("q"), Message::assistant("r")])
                .await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }

    let msgs = store.messages().await;
    assert_eq!(msgs.len(), 32);
    // Exchanges commit atomically, so each turn's pair is adjacent.
    for pair in msgs.chunks(2) {
        assert_eq!(pair[0].turn, pair[1].turn);
        assert_eq!(pair[0].role, Role::Human);
        assert_eq!(pair[1].role, Role::Assistant);
    }
}
