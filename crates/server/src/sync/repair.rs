use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{Chat, Message};
use crate::store::Store;

use super::placeholder_name;

/// Rebuilds the chat cache from the message log where the two disagree.
///
/// The log is written before the chat list, so a crash in between leaves
/// messages the chat list does not reflect. A chat whose `lastMessage` is
/// behind the log gets it rebuilt; a chat missing entirely is recreated with
/// one unread per inbound message. Returns the number of chats touched.
pub async fn repair(store: &Store) -> Result<usize, AppError> {
    let _guard = store.write_lock().await;
    let messages = store.messages.load_all().await;
    if messages.is_empty() {
        return Ok(0);
    }
    let mut chats = store.chats.load_all().await;

    // chat id -> index of its newest message (later log entries win ties)
    let mut newest: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for (idx, message) in messages.iter().enumerate() {
        match newest.get(message.chat_id.as_str()) {
            Some(&prev) if messages[prev].timestamp > message.timestamp => {}
            Some(_) => {
                newest.insert(&message.chat_id, idx);
            }
            None => {
                newest.insert(&message.chat_id, idx);
                order.push(&message.chat_id);
            }
        }
    }

    let mut repaired = 0;
    for chat_id in order {
        let latest = &messages[newest[chat_id]];
        match chats.iter_mut().find(|c| c.id == chat_id) {
            Some(chat) => {
                if is_behind(chat, latest) {
                    chat.last_message = Some(latest.snapshot());
                    chat.timestamp = chat.timestamp.max(latest.timestamp);
                    repaired += 1;
                }
            }
            None => {
                chats.push(recreate(chat_id, &messages, latest));
                repaired += 1;
            }
        }
    }

    if repaired > 0 {
        store.chats.save_all(&chats).await?;
        tracing::warn!("Repaired {} chats from the message log", repaired);
    }
    Ok(repaired)
}

fn is_behind(chat: &Chat, latest: &Message) -> bool {
    match &chat.last_message {
        None => true,
        Some(last) => {
            latest.timestamp > last.timestamp
                || (latest.timestamp == last.timestamp && *last != latest.snapshot())
        }
    }
}

fn recreate(chat_id: &str, messages: &[Message], latest: &Message) -> Chat {
    let in_chat = || messages.iter().filter(|m| m.chat_id == chat_id);
    let unread = in_chat().filter(|m| !m.from_me).count();
    let name = in_chat()
        .find(|m| !m.from_me)
        .map(placeholder_name)
        .unwrap_or_else(|| placeholder_name(latest));

    Chat::from_message(latest, &name, u32::try_from(unread).unwrap_or(u32::MAX))
}
