//! Anti-recall plugin: watch chat targets (groups or users) and re-broadcast
//! any message they delete.
//!
//! Flow: operator commands maintain the watch registry; independently, the
//! host delivers message-deleted events to [`hook::RecallHook`], which looks
//! up the applicable record and fans the recalled content out to the
//! configured groups and users. The host runtime and the messaging transport
//! stay behind the traits in [`bot`].

pub mod bot;
pub mod commands;
pub mod config;
pub mod hook;
pub mod parse;

use std::sync::Arc;

use antirecall_watch::{WatchStore, store_sqlite::SqliteWatchStore};

use crate::{bot::Bot, commands::WatchCommands, config::PluginConfig, hook::RecallHook};

/// The assembled plugin: command handlers plus the recall hook, sharing one
/// registry. The host registers the command group and subscribes the hook to
/// its message-deleted event.
pub struct AntiRecall {
    pub commands: WatchCommands,
    pub hook: RecallHook,
}

impl AntiRecall {
    /// Wire the plugin over any registry store.
    #[must_use]
    pub fn with_store(store: Arc<dyn WatchStore>, bot: Arc<dyn Bot>) -> Self {
        Self {
            commands: WatchCommands::new(store.clone()),
            hook: RecallHook::new(store, bot),
        }
    }

    /// Open (and initialize) the SQLite registry named by the config and
    /// wire the plugin over it.
    pub async fn connect(config: &PluginConfig, bot: Arc<dyn Bot>) -> anyhow::Result<Self> {
        let store: Arc<dyn WatchStore> =
            Arc::new(SqliteWatchStore::connect(&config.database_url).await?);
        Ok(Self::with_store(store, bot))
    }
}
