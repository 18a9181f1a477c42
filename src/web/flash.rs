//! One-shot flash messages carried in the session.
//!
//! A message set by one request is removed from the session the first
//! time it is rendered.

use tower_sessions::Session;

const FLASH_KEY: &str = "flash";

pub const INVALID_INPUT: &str = "Invalid input !";
pub const ITEM_CREATED: &str = "Item created !";
pub const ITEM_UPDATED: &str = "Item updated !";
pub const ITEM_DELETED: &str = "Item deleted !";
pub const LOGIN_SUCCESS: &str = "Login success.";
pub const LOGIN_FAILURE: &str = "Invalid username or password.";
pub const GOODBYE: &str = "Goodbye.";
pub const SETTINGS_UPDATED: &str = "Settings updated.";

/// Queue a message for the next rendered page.
pub async fn set(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_KEY, message.to_string()).await {
        tracing::warn!("Failed to store flash message: {e}");
    }
}

/// Take the pending message, removing it from the session.
pub async fn take(session: &Session) -> Option<String> {
    session
        .remove::<String>(FLASH_KEY)
        .await
        .unwrap_or_default()
}
