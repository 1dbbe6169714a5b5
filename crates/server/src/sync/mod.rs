//! Reconciliation between the message log and the chat list.
//!
//! Every write path appends to the log and moves the affected chat's cached
//! `lastMessage`/`timestamp`/`unreadCount` in the same locked step, so the
//! chat list never has to be recomputed by scanning the log.

mod demo;
mod repair;

pub use demo::seed_demo;
pub use repair::repair;

use std::collections::HashSet;
use wabridge_shared::constants::{UNKNOWN_CHAT_NAME, UNKNOWN_SENDER_NAME};
use wabridge_shared::validation;

use crate::backend::Delivery;
use crate::error::AppError;
use crate::models::{generate_message_id, Ack, Chat, Message};
use crate::store::Store;

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// A message arriving from outside the bridge.
#[derive(Debug, Clone, Copy)]
pub struct Inbound<'a> {
    pub chat_id: &'a str,
    pub body: &'a str,
    pub sender_name: Option<&'a str>,
    pub from: Option<&'a str>,
}

pub async fn record_outbound(
    store: &Store,
    chat_id: &str,
    body: &str,
    delivery: Delivery,
) -> Result<Message, AppError> {
    validation::validate_send_request(chat_id, body).map_err(AppError::Validation)?;

    let timestamp = now();
    let id = delivery.id.unwrap_or_else(|| generate_message_id(timestamp));
    let message = Message::text(id, chat_id, body, true, delivery.ack, timestamp);

    let _guard = store.write_lock().await;
    let mut messages = store.messages.load_all().await;
    let mut chats = store.chats.load_all().await;

    messages.push(message.clone());
    apply_outbound(&mut chats, &message);
    persist(store, &messages, &chats).await?;

    tracing::debug!("Recorded outbound message {} in {}", message.id, chat_id);
    Ok(message)
}

/// `chat_open` suppresses the unread bump for a chat someone is looking at.
pub async fn record_inbound(
    store: &Store,
    inbound: Inbound<'_>,
    chat_open: bool,
) -> Result<Message, AppError> {
    validation::validate_send_request(inbound.chat_id, inbound.body)
        .map_err(AppError::Validation)?;

    let timestamp = now();
    let mut message = Message::text(
        generate_message_id(timestamp),
        inbound.chat_id,
        inbound.body,
        false,
        Ack::Pending,
        timestamp,
    );
    message.sender_name = Some(
        inbound
            .sender_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_SENDER_NAME)
            .to_string(),
    );
    message.from = inbound.from.map(str::to_string);

    let _guard = store.write_lock().await;
    let mut messages = store.messages.load_all().await;
    let mut chats = store.chats.load_all().await;

    messages.push(message.clone());
    apply_inbound(&mut chats, &message, chat_open);
    persist(store, &messages, &chats).await?;

    tracing::debug!("Recorded inbound message {} in {}", message.id, inbound.chat_id);
    Ok(message)
}

/// Applies a complete message reported by the backend. Already-known ids are
/// skipped and yield `None`.
pub async fn ingest(
    store: &Store,
    message: Message,
    chat_open: bool,
) -> Result<Option<Message>, AppError> {
    validation::validate_chat_id(&message.chat_id).map_err(AppError::Validation)?;

    let _guard = store.write_lock().await;
    let mut messages = store.messages.load_all().await;
    if messages.iter().any(|m| m.id == message.id) {
        return Ok(None);
    }
    let mut chats = store.chats.load_all().await;

    messages.push(message.clone());
    if message.from_me {
        apply_outbound(&mut chats, &message);
    } else {
        apply_inbound(&mut chats, &message, chat_open);
    }
    persist(store, &messages, &chats).await?;

    Ok(Some(message))
}

/// Merges fetched history into the log. History counts as already read, so
/// unread counters are left alone. Returns the number of new messages.
pub async fn import_history(
    store: &Store,
    chat_id: &str,
    fetched: Vec<Message>,
) -> Result<usize, AppError> {
    if fetched.is_empty() {
        return Ok(0);
    }

    let _guard = store.write_lock().await;
    let mut messages = store.messages.load_all().await;
    let mut known: HashSet<String> = messages.iter().map(|m| m.id.clone()).collect();

    let mut added = Vec::new();
    for mut message in fetched {
        if !known.insert(message.id.clone()) {
            continue;
        }
        if message.chat_id.is_empty() {
            message.chat_id = chat_id.to_string();
        }
        added.push(message);
    }

    if added.is_empty() {
        return Ok(0);
    }

    let mut chats = store.chats.load_all().await;
    for message in &added {
        match chats.iter_mut().find(|c| c.id == message.chat_id) {
            Some(chat) => {
                chat.advance(message);
            }
            None => chats.push(Chat::from_message(message, &placeholder_name(message), 0)),
        }
    }
    messages.extend(added.iter().cloned());
    persist(store, &messages, &chats).await?;

    Ok(added.len())
}

/// Raises a message's ack. Returns the message only when the ack moved forward.
pub async fn update_ack(store: &Store, message_id: &str, ack: Ack) -> Result<Option<Message>, AppError> {
    let _guard = store.write_lock().await;
    let mut messages = store.messages.load_all().await;

    let updated = match messages.iter_mut().find(|m| m.id == message_id) {
        Some(message) if ack > message.ack => {
            message.ack = ack;
            message.clone()
        }
        _ => return Ok(None),
    };

    store.messages.save_all(&messages).await?;
    Ok(Some(updated))
}

/// Resets a chat's unread counter. Unknown chats are a no-op and return `false`.
pub async fn mark_chat_read(store: &Store, chat_id: &str) -> Result<bool, AppError> {
    validation::validate_chat_id(chat_id).map_err(AppError::Validation)?;

    let _guard = store.write_lock().await;
    let mut chats = store.chats.load_all().await;

    let Some(chat) = chats.iter_mut().find(|c| c.id == chat_id) else {
        return Ok(false);
    };
    chat.unread_count = 0;

    store.chats.save_all(&chats).await?;
    Ok(true)
}

pub async fn list_messages(store: &Store, chat_id: &str) -> Vec<Message> {
    chat_messages(store.messages.load_all().await, chat_id)
}

pub async fn list_chats(store: &Store) -> Vec<Chat> {
    let mut chats = store.chats.load_all().await;
    sort_chats(&mut chats);
    chats
}

/// Case-insensitive substring search over message bodies, newest first.
pub async fn search(store: &Store, query: &str, limit: usize) -> Vec<Message> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<Message> = store
        .messages
        .load_all()
        .await
        .into_iter()
        .filter(|m| {
            m.body
                .as_deref()
                .is_some_and(|body| body.to_lowercase().contains(&needle))
        })
        .collect();

    hits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    hits.truncate(limit);
    hits
}

pub async fn clear_all(store: &Store) -> Result<(), AppError> {
    let _guard = store.write_lock().await;
    persist(store, &[], &[]).await
}

pub fn apply_outbound(chats: &mut Vec<Chat>, message: &Message) {
    match chats.iter_mut().find(|c| c.id == message.chat_id) {
        Some(chat) => {
            chat.advance(message);
        }
        None => chats.push(Chat::from_message(message, UNKNOWN_CHAT_NAME, 0)),
    }
}

pub fn apply_inbound(chats: &mut Vec<Chat>, message: &Message, chat_open: bool) {
    match chats.iter_mut().find(|c| c.id == message.chat_id) {
        Some(chat) => {
            chat.advance(message);
            if !chat_open {
                chat.unread_count = chat.unread_count.saturating_add(1);
            }
        }
        None => chats.push(Chat::from_message(message, &placeholder_name(message), 1)),
    }
}

/// Messages of one chat, oldest first; equal timestamps keep log order.
pub fn chat_messages(messages: Vec<Message>, chat_id: &str) -> Vec<Message> {
    let mut items: Vec<Message> = messages
        .into_iter()
        .filter(|m| m.chat_id == chat_id)
        .collect();
    items.sort_by_key(|m| m.timestamp);
    items
}

/// Newest activity first; equal timestamps keep insertion order.
pub fn sort_chats(chats: &mut [Chat]) {
    chats.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

fn placeholder_name(message: &Message) -> String {
    match message.sender_name.as_deref() {
        Some(name) if !name.trim().is_empty() && !message.from_me => name.to_string(),
        _ if message.from_me => UNKNOWN_CHAT_NAME.to_string(),
        _ => UNKNOWN_SENDER_NAME.to_string(),
    }
}

async fn persist(store: &Store, messages: &[Message], chats: &[Chat]) -> Result<(), AppError> {
    store.messages.save_all(messages).await?;
    store.chats.save_all(chats).await?;
    Ok(())
}
