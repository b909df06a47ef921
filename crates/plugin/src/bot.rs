//! Collaborator traits for the host bot runtime.
//!
//! The host provides the concrete implementations; the plugin only depends
//! on these seams. `Bot` covers directory lookups and outbound delivery,
//! `SessionSink` covers replies to (and help delegation for) the session
//! that triggered the current handler.

use {anyhow::Result, async_trait::async_trait};

/// A group, as seen by the messaging platform.
#[derive(Debug, Clone)]
pub struct GuildInfo {
    pub id: String,
    pub name: String,
}

/// A user, as seen by the messaging platform.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
}

/// A single message fetched from a location.
#[derive(Debug, Clone)]
pub struct MessageInfo {
    pub id: String,
    pub content: String,
}

/// Directory lookups and outbound delivery on the messaging platform.
#[async_trait]
pub trait Bot: Send + Sync {
    async fn get_guild(&self, guild_id: &str) -> Result<GuildInfo>;
    async fn get_user(&self, user_id: &str) -> Result<UserInfo>;

    /// Fetch a message by its location (group or user ID) and message ID.
    async fn get_message(&self, channel_id: &str, message_id: &str) -> Result<MessageInfo>;

    /// Send a message into a group.
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<()>;

    /// Send a direct message to a user.
    async fn send_private_message(&self, user_id: &str, text: &str) -> Result<()>;
}

/// Reply surface for the session a handler is running in.
#[async_trait]
pub trait SessionSink: Send + Sync {
    /// Queue a chat reply to the invoking session.
    async fn send_queued(&self, text: &str) -> Result<()>;

    /// Ask the host to run another command (used to delegate to the host's
    /// help renderer).
    async fn execute(&self, command: &str) -> Result<()>;
}

/// Where the current command was issued from.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Set when the session is inside a group.
    pub guild_id: Option<String>,
    pub user_id: String,
}

impl SessionContext {
    /// The ID the placeholder token resolves to: the active group, or else
    /// the invoking user.
    #[must_use]
    pub fn contextual_id(&self) -> &str {
        self.guild_id.as_deref().unwrap_or(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contextual_id_prefers_guild() {
        let ctx = SessionContext {
            guild_id: Some("100".into()),
            user_id: "200".into(),
        };
        assert_eq!(ctx.contextual_id(), "100");
    }

    #[test]
    fn contextual_id_falls_back_to_user() {
        let ctx = SessionContext {
            guild_id: None,
            user_id: "200".into(),
        };
        assert_eq!(ctx.contextual_id(), "200");
    }
}
