use crate::error::AppError;
use crate::models::{Ack, Chat, LastMessage, Message};
use crate::store::Store;

use super::now;

/// Replaces both collections with a fixed set of example chats and messages.
/// Returns `(chats, messages)` counts.
pub async fn seed_demo(store: &Store) -> Result<(usize, usize), AppError> {
    let (chats, messages) = demo_data(now());

    let _guard = store.write_lock().await;
    store.messages.save_all(&messages).await?;
    store.chats.save_all(&chats).await?;

    tracing::info!("Seeded {} demo chats, {} demo messages", chats.len(), messages.len());
    Ok((chats.len(), messages.len()))
}

fn demo_data(now: i64) -> (Vec<Chat>, Vec<Message>) {
    let inbound = |id: &str, chat_id: &str, body: &str, sender: &str, ts: i64| {
        let mut m = Message::text(id.into(), chat_id, body, false, Ack::Pending, ts);
        m.sender_name = Some(sender.into());
        m
    };
    let outbound = |id: &str, chat_id: &str, body: &str, ack: Ack, ts: i64| {
        Message::text(id.into(), chat_id, body, true, ack, ts)
    };

    let messages = vec![
        outbound("msg_1", "chat_1", "Hi John!", Ack::Read, now - 7200),
        inbound("msg_2", "chat_1", "Hey, how are you?", "John Doe", now - 3600),
        inbound("msg_3", "chat_1", "Need your help with something", "John Doe", now - 3500),
        inbound("msg_4", "chat_2", "Hello team!", "Bob Johnson", now - 10800),
        outbound("msg_5", "chat_2", "Meeting at 3 PM", Ack::Delivered, now - 7200),
    ];

    let chat = |id: &str, name: &str, is_group: bool, unread: u32, last: LastMessage| Chat {
        id: id.into(),
        name: name.into(),
        is_group,
        unread_count: unread,
        timestamp: last.timestamp,
        last_message: Some(last),
        profile_pic_url: None,
    };

    let chats = vec![
        chat("chat_1", "John Doe", false, 2, messages[2].snapshot()),
        chat("chat_2", "Project Team", true, 0, messages[4].snapshot()),
        // No local history for this one.
        chat(
            "chat_3",
            "Alice Smith",
            false,
            0,
            LastMessage {
                body: "Thanks for the help!".into(),
                timestamp: now - 86400,
                from_me: false,
            },
        ),
    ];

    (chats, messages)
}
