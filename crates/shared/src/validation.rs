use crate::constants::*;

pub fn validate_chat_id(chat_id: &str) -> Result<(), String> {
    if chat_id.trim().is_empty() {
        return Err("chatId is required".into());
    }
    if chat_id.len() > MAX_CHAT_ID_LENGTH {
        return Err(format!(
            "chatId must be at most {} characters",
            MAX_CHAT_ID_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_message_body(body: &str) -> Result<(), String> {
    if body.is_empty() {
        return Err("message is required".into());
    }
    if body.len() > MAX_MESSAGE_LENGTH {
        return Err("Message too long".into());
    }
    Ok(())
}

/// Both fields of a send/receive request, reported the way clients expect.
pub fn validate_send_request(chat_id: &str, body: &str) -> Result<(), String> {
    if chat_id.trim().is_empty() || body.is_empty() {
        return Err("chatId and message are required".into());
    }
    validate_chat_id(chat_id)?;
    validate_message_body(body)
}

pub fn validate_search_query(query: &str) -> Result<(), String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err("query parameter is required".into());
    }
    if trimmed.len() > MAX_SEARCH_QUERY_LENGTH {
        return Err(format!(
            "query must be at most {} characters",
            MAX_SEARCH_QUERY_LENGTH
        ));
    }
    Ok(())
}
