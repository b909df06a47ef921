//! Recall hook: reacts to message-deleted events and fans the recalled
//! content out to the configured destinations.

use std::sync::Arc;

use {
    anyhow::Result,
    futures::future::{BoxFuture, join_all},
    tracing::{debug, warn},
};

use antirecall_watch::WatchStore;

use crate::bot::{Bot, SessionSink};

/// A message-deleted notification from the host.
#[derive(Debug, Clone)]
pub struct MessageDeleted {
    /// Set when the deletion happened inside a group.
    pub guild_id: Option<String>,
    /// The deleting author.
    pub user_id: String,
    pub message_id: String,
}

/// Single-shot reaction to deletion events. Holds no state of its own.
pub struct RecallHook {
    store: Arc<dyn WatchStore>,
    bot: Arc<dyn Bot>,
}

impl RecallHook {
    #[must_use]
    pub fn new(store: Arc<dyn WatchStore>, bot: Arc<dyn Bot>) -> Self {
        Self { store, bot }
    }

    /// Look up the applicable watch record for the event and dispatch the
    /// recall notification.
    ///
    /// When the deleted message's location has no record but the deleting
    /// user does, the user-keyed record applies with the user ID as the
    /// effective target — a per-user watch follows the user into groups
    /// that are not separately watched.
    pub async fn on_message_deleted(
        &self,
        event: &MessageDeleted,
        sink: &dyn SessionSink,
    ) -> Result<()> {
        let target_id = event.guild_id.as_deref().unwrap_or(&event.user_id);

        let (record, effective_target) = match self.store.get(target_id).await? {
            Some(record) => (record, target_id),
            None if event.guild_id.is_some() => match self.store.get(&event.user_id).await? {
                Some(record) => (record, event.user_id.as_str()),
                None => return Ok(()),
            },
            None => return Ok(()),
        };

        if record.is_bypassed(&event.user_id) {
            debug!(
                target_id = %effective_target,
                user_id = %event.user_id,
                "deletion by bypassed user, ignoring",
            );
            return Ok(());
        }

        // The effective target doubles as the message location, including on
        // the user-keyed fallback path.
        let source_name = if event.guild_id.as_deref() == Some(effective_target) {
            self.bot.get_guild(effective_target).await?.name
        } else {
            self.bot.get_user(&event.user_id).await?.name
        };
        let deleter = self.bot.get_user(&event.user_id).await?;
        let content = self
            .bot
            .get_message(effective_target, &event.message_id)
            .await?
            .content;

        let text = format!(
            "Source: {source_name}\nSource ID: {effective_target}\nDeleted by: {} ({})\nContent: {content}",
            deleter.name, event.user_id,
        );

        if record.relay_to_source {
            sink.send_queued(&content).await?;
        }

        let text = &text;
        let mut deliveries: Vec<BoxFuture<'_, (String, Result<()>)>> = Vec::new();
        for guild_id in &record.forwarded_group_ids {
            deliveries.push(Box::pin(async move {
                (
                    format!("group {guild_id}"),
                    self.bot.send_message(guild_id, text).await,
                )
            }));
        }
        for user_id in &record.forwarded_user_ids {
            deliveries.push(Box::pin(async move {
                (
                    format!("user {user_id}"),
                    self.bot.send_private_message(user_id, text).await,
                )
            }));
        }

        // Every destination is attempted; failures are logged after all
        // deliveries complete and never cancel or fail the siblings.
        for (destination, result) in join_all(deliveries).await {
            if let Err(error) = result {
                warn!(%destination, %error, "recall delivery failed");
            }
        }
        Ok(())
    }
}
