use serde_json::Value;
use tokio::sync::mpsc;
use wabridge_server::ws::events::ServerEvent;
use wabridge_server::ws::gateway::GatewayState;

fn make_tx(capacity: usize) -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
    mpsc::channel(capacity)
}

fn event_type(raw: &str) -> String {
    let v: Value = serde_json::from_str(raw).unwrap();
    v["type"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn client_ids_are_unique() {
    let gw = GatewayState::default();
    let a = gw.next_client_id().await;
    let b = gw.next_client_id().await;
    assert_ne!(a, b);
}

#[tokio::test]
async fn broadcast_reaches_every_session() {
    let gw = GatewayState::new(8);
    let (tx1, mut rx1) = make_tx(8);
    let (tx2, mut rx2) = make_tx(8);
    let cid1 = gw.next_client_id().await;
    let cid2 = gw.next_client_id().await;
    gw.register(cid1, tx1).await;
    gw.register(cid2, tx2).await;

    let delivered = gw.broadcast_all(&ServerEvent::Pong, None).await;

    assert_eq!(delivered, 2);
    assert_eq!(event_type(&rx1.try_recv().unwrap()), "pong");
    assert_eq!(event_type(&rx2.try_recv().unwrap()), "pong");
}

#[tokio::test]
async fn broadcast_skips_excluded_session() {
    let gw = GatewayState::new(8);
    let (tx1, mut rx1) = make_tx(8);
    let (tx2, mut rx2) = make_tx(8);
    let cid1 = gw.next_client_id().await;
    let cid2 = gw.next_client_id().await;
    gw.register(cid1, tx1).await;
    gw.register(cid2, tx2).await;

    gw.broadcast_all(&ServerEvent::Pong, Some(cid1)).await;

    assert!(rx1.try_recv().is_err());
    assert!(rx2.try_recv().is_ok());
    assert_eq!(gw.client_count().await, 2);
}

#[tokio::test]
async fn full_queue_drops_only_that_session() {
    let gw = GatewayState::new(1);
    let (slow_tx, _slow_rx) = make_tx(1);
    let (fast_tx, mut fast_rx) = make_tx(8);
    let slow = gw.next_client_id().await;
    let fast = gw.next_client_id().await;
    gw.register(slow, slow_tx).await;
    gw.register(fast, fast_tx).await;

    gw.broadcast_all(&ServerEvent::Pong, None).await;
    let delivered = gw
        .broadcast_all(
            &ServerEvent::Disconnected {
                reason: "x".into(),
            },
            None,
        )
        .await;

    assert_eq!(delivered, 1);
    assert_eq!(gw.client_count().await, 1);
    assert!(gw.clients.read().await.contains_key(&fast));
    assert_eq!(event_type(&fast_rx.try_recv().unwrap()), "pong");
    assert_eq!(event_type(&fast_rx.try_recv().unwrap()), "disconnected");
}

#[tokio::test]
async fn closed_queue_is_dropped() {
    let gw = GatewayState::new(8);
    let (tx, rx) = make_tx(8);
    let cid = gw.next_client_id().await;
    gw.register(cid, tx).await;
    drop(rx);

    assert_eq!(gw.broadcast_all(&ServerEvent::Pong, None).await, 0);
    assert_eq!(gw.client_count().await, 0);
}

#[tokio::test]
async fn send_to_targets_one_session() {
    let gw = GatewayState::new(8);
    let (tx1, mut rx1) = make_tx(8);
    let (tx2, mut rx2) = make_tx(8);
    let cid1 = gw.next_client_id().await;
    let cid2 = gw.next_client_id().await;
    gw.register(cid1, tx1).await;
    gw.register(cid2, tx2).await;

    assert!(gw.send_to(cid2, &ServerEvent::Pong).await);
    assert!(!gw.send_to(999, &ServerEvent::Pong).await);

    assert!(rx1.try_recv().is_err());
    assert!(rx2.try_recv().is_ok());
}

#[tokio::test]
async fn open_chat_tracking() {
    let gw = GatewayState::new(8);
    let (tx, _rx) = make_tx(8);
    let cid = gw.next_client_id().await;
    gw.register(cid, tx).await;

    assert!(!gw.is_chat_open("c1").await);
    gw.open_chat(cid, "c1").await;
    assert!(gw.is_chat_open("c1").await);
    assert!(!gw.is_chat_open("c2").await);

    gw.open_chat(cid, "c2").await;
    assert!(!gw.is_chat_open("c1").await);

    gw.close_chat(cid).await;
    assert!(!gw.is_chat_open("c2").await);
}

#[tokio::test]
async fn unregister_forgets_open_chat() {
    let gw = GatewayState::new(8);
    let (tx, _rx) = make_tx(8);
    let cid = gw.next_client_id().await;
    gw.register(cid, tx).await;
    gw.open_chat(cid, "c1").await;

    assert!(gw.unregister(cid).await.is_some());
    assert!(gw.unregister(cid).await.is_none());
    assert!(!gw.is_chat_open("c1").await);
}
