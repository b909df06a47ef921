//! Command surface: watch / unwatch / configure / list-watched / help.
//!
//! Every sub-command takes a comma-separated target list and processes each
//! ID independently and sequentially — a bad ID gets an inline report and
//! the loop moves on. Store or sink failures propagate and abort the rest
//! of the invocation; completed iterations stay committed.

use std::sync::Arc;

use {anyhow::Result, tracing::info};

use antirecall_watch::{WatchPatch, WatchRecordCreate, WatchStore};

use crate::{
    bot::{SessionContext, SessionSink},
    parse,
};

/// Optional per-target settings shared by `watch` and `configure`.
///
/// Typed once at the boundary; the multi-value fields hold the raw
/// comma-separated argument strings and are parsed per target.
#[derive(Debug, Clone, Default)]
pub struct WatchArgs {
    pub relay_to_source: Option<bool>,
    pub forwarded_group_id: Option<String>,
    pub forwarded_user_id: Option<String>,
    pub bypassed_user_id: Option<String>,
}

/// Handlers for the watchlist command group.
pub struct WatchCommands {
    store: Arc<dyn WatchStore>,
}

impl WatchCommands {
    #[must_use]
    pub fn new(store: Arc<dyn WatchStore>) -> Self {
        Self { store }
    }

    /// Add one or more targets to the watchlist.
    pub async fn watch(
        &self,
        session: &SessionContext,
        sink: &dyn SessionSink,
        target_ids: &str,
        args: &WatchArgs,
    ) -> Result<()> {
        if target_ids.trim().is_empty() {
            sink.execute("watch -h").await?;
            return Ok(());
        }

        for raw in parse::split_targets(target_ids) {
            let id = parse::resolve_placeholder(&raw, session.contextual_id());
            if !parse::is_valid_id(&id) {
                sink.send_queued(&format!("target {id} is not a valid id"))
                    .await?;
                continue;
            }
            if self.store.get(&id).await?.is_some() {
                sink.send_queued(&format!("target {id} is already watched"))
                    .await?;
                continue;
            }

            let create = build_create(&id, args, session);
            self.store.create(create).await?;
            info!(target_id = %id, "watch target added");
            sink.send_queued(&format!("target {id} is now watched"))
                .await?;
        }
        Ok(())
    }

    /// Remove one or more targets from the watchlist.
    ///
    /// A not-found report does not stop the delete call or the success
    /// report that follows; the store's delete is idempotent, so the extra
    /// call is a harmless no-op.
    pub async fn unwatch(
        &self,
        session: &SessionContext,
        sink: &dyn SessionSink,
        target_ids: &str,
    ) -> Result<()> {
        if target_ids.trim().is_empty() {
            sink.execute("unwatch -h").await?;
            return Ok(());
        }

        for raw in parse::split_targets(target_ids) {
            let id = parse::resolve_placeholder(&raw, session.contextual_id());
            if !parse::is_valid_id(&id) {
                sink.send_queued(&format!("target {id} is not a valid id"))
                    .await?;
                continue;
            }
            if self.store.get(&id).await?.is_none() {
                sink.send_queued(&format!("target {id} is not watched"))
                    .await?;
            }
            self.store.delete(&id).await?;
            info!(target_id = %id, "watch target removed");
            sink.send_queued(&format!("target {id} removed from the watchlist"))
                .await?;
        }
        Ok(())
    }

    /// Update settings for one or more watched targets. Only the supplied
    /// fields are overwritten.
    pub async fn configure(
        &self,
        session: &SessionContext,
        sink: &dyn SessionSink,
        target_ids: &str,
        args: &WatchArgs,
    ) -> Result<()> {
        if target_ids.trim().is_empty() {
            sink.execute("configure -h").await?;
            return Ok(());
        }

        for raw in parse::split_targets(target_ids) {
            let id = parse::resolve_placeholder(&raw, session.contextual_id());
            if !parse::is_valid_id(&id) {
                sink.send_queued(&format!("target {id} is not a valid id"))
                    .await?;
                continue;
            }
            if self.store.get(&id).await?.is_none() {
                sink.send_queued(&format!("target {id} is not watched"))
                    .await?;
                continue;
            }

            let patch = build_patch(args, session);
            self.store.update(&id, &patch).await?;
            info!(target_id = %id, "watch target updated");
            sink.send_queued(&format!("target {id} updated")).await?;
        }
        Ok(())
    }

    /// Render all watched target IDs as a newline-numbered list.
    pub async fn list_watched(&self) -> Result<String> {
        let records = self.store.list().await?;
        let mut body = String::new();
        for (index, record) in records.iter().enumerate() {
            body.push_str(&format!("{}. {}\n", index + 1, record.target_id));
        }
        Ok(format!("Watched targets:\n\n{body}"))
    }

    /// Bare command: delegate to the host's help renderer.
    pub async fn help(&self, sink: &dyn SessionSink) -> Result<()> {
        sink.execute("antirecall -h").await
    }
}

fn build_create(target_id: &str, args: &WatchArgs, session: &SessionContext) -> WatchRecordCreate {
    WatchRecordCreate {
        target_id: target_id.to_string(),
        relay_to_source: args.relay_to_source.unwrap_or(false),
        forwarded_group_ids: args
            .forwarded_group_id
            .as_deref()
            .map(|raw| parse::parse_id_list(raw, session.guild_id.as_deref()))
            .unwrap_or_default(),
        forwarded_user_ids: args
            .forwarded_user_id
            .as_deref()
            .map(|raw| parse::parse_id_list(raw, Some(&session.user_id)))
            .unwrap_or_default(),
        bypassed_user_ids: args
            .bypassed_user_id
            .as_deref()
            .map(|raw| parse::parse_id_list(raw, Some(&session.user_id)))
            .unwrap_or_default(),
    }
}

fn build_patch(args: &WatchArgs, session: &SessionContext) -> WatchPatch {
    WatchPatch {
        relay_to_source: args.relay_to_source,
        forwarded_group_ids: args
            .forwarded_group_id
            .as_deref()
            .map(|raw| parse::parse_id_list(raw, session.guild_id.as_deref())),
        forwarded_user_ids: args
            .forwarded_user_id
            .as_deref()
            .map(|raw| parse::parse_id_list(raw, Some(&session.user_id))),
        bypassed_user_ids: args
            .bypassed_user_id
            .as_deref()
            .map(|raw| parse::parse_id_list(raw, Some(&session.user_id))),
    }
}
