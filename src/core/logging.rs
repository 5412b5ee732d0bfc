//! Per-event logging configuration and its process-local cache.
//!
//! Each server has one logging record: a fixed taxonomy of four categories,
//! each holding a handful of event types, each with an enabled flag and an
//! optional destination channel. The record is created all-disabled the
//! first time any event for the server is evaluated and is never deleted
//! here.
//!
//! Resolution results are cached in-process and never refreshed: once a
//! `(server, event)` key is resolved, configuration changes made elsewhere
//! stay invisible to this process until restart. `set_log` persists to the
//! store without touching the cache. This staleness is inherited behavior;
//! see the open questions in DESIGN.md before changing it.

use crate::{
    entities::{LogConfig, LoggingServer, log_config, logging_server},
    errors::Result,
};
use sea_orm::{Set, prelude::*, sea_query::Expr};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

/// The four fixed log categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    Moderation,
    Message,
    Role,
    Channel,
}

impl LogCategory {
    /// Category name as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moderation => "moderation_logs",
            Self::Message => "message_logs",
            Self::Role => "role_logs",
            Self::Channel => "channel_logs",
        }
    }

    /// Parses a stored category name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "moderation_logs" => Some(Self::Moderation),
            "message_logs" => Some(Self::Message),
            "role_logs" => Some(Self::Role),
            "channel_logs" => Some(Self::Channel),
            _ => None,
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every event type in the fixed taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogEventType {
    MemberBan,
    MemberUnban,
    MemberKick,
    MessageDelete,
    MessageEdit,
    RoleCreate,
    RoleDelete,
    RoleUpdate,
    ChannelCreate,
    ChannelDelete,
    ChannelUpdate,
}

/// All event types, used when seeding a server's default configuration.
pub const ALL_EVENT_TYPES: [LogEventType; 11] = [
    LogEventType::MemberBan,
    LogEventType::MemberUnban,
    LogEventType::MemberKick,
    LogEventType::MessageDelete,
    LogEventType::MessageEdit,
    LogEventType::RoleCreate,
    LogEventType::RoleDelete,
    LogEventType::RoleUpdate,
    LogEventType::ChannelCreate,
    LogEventType::ChannelDelete,
    LogEventType::ChannelUpdate,
];

impl LogEventType {
    /// Event type name as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MemberBan => "member_ban",
            Self::MemberUnban => "member_unban",
            Self::MemberKick => "member_kick",
            Self::MessageDelete => "message_delete",
            Self::MessageEdit => "message_edit",
            Self::RoleCreate => "role_create",
            Self::RoleDelete => "role_delete",
            Self::RoleUpdate => "role_update",
            Self::ChannelCreate => "channel_create",
            Self::ChannelDelete => "channel_delete",
            Self::ChannelUpdate => "channel_update",
        }
    }

    /// Parses a stored event type name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        ALL_EVENT_TYPES.into_iter().find(|e| e.as_str() == s)
    }

    /// The category this event type belongs to, per the fixed taxonomy.
    #[must_use]
    pub const fn category(self) -> LogCategory {
        match self {
            Self::MemberBan | Self::MemberUnban | Self::MemberKick => LogCategory::Moderation,
            Self::MessageDelete | Self::MessageEdit => LogCategory::Message,
            Self::RoleCreate | Self::RoleDelete | Self::RoleUpdate => LogCategory::Role,
            Self::ChannelCreate | Self::ChannelDelete | Self::ChannelUpdate => LogCategory::Channel,
        }
    }
}

impl fmt::Display for LogEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved logging slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSlot {
    /// Whether this event type produces notifications
    pub enabled: bool,
    /// Destination channel, if configured
    pub channel_id: Option<String>,
}

/// Ensures the logging record for a server exists, creating the header row
/// plus one default-disabled slot per event type if absent.
pub async fn ensure_logging_config(
    db: &DatabaseConnection,
    server_id: &str,
    server_name: Option<&str>,
) -> Result<()> {
    if LoggingServer::find_by_id(server_id).one(db).await?.is_some() {
        return Ok(());
    }

    let header = logging_server::ActiveModel {
        server_id: Set(server_id.to_string()),
        server_name: Set(server_name.map(ToString::to_string)),
    };
    header.insert(db).await?;

    let slots = ALL_EVENT_TYPES.into_iter().map(|event| log_config::ActiveModel {
        server_id: Set(server_id.to_string()),
        category: Set(event.category().as_str().to_string()),
        event_type: Set(event.as_str().to_string()),
        enabled: Set(false),
        channel_id: Set(None),
    });
    LogConfig::insert_many(slots).exec(db).await?;

    Ok(())
}

/// Reads one slot for a server, defaulting to disabled when the record has
/// not been created yet.
pub async fn get_log_slot(
    db: &DatabaseConnection,
    server_id: &str,
    event: LogEventType,
) -> Result<LogSlot> {
    let row = LogConfig::find_by_id((
        server_id.to_string(),
        event.category().as_str().to_string(),
        event.as_str().to_string(),
    ))
    .one(db)
    .await?;

    Ok(row.map_or(
        LogSlot {
            enabled: false,
            channel_id: None,
        },
        |row| LogSlot {
            enabled: row.enabled,
            channel_id: row.channel_id,
        },
    ))
}

/// Persists one slot. Silently no-ops when `(category, event_type)` is not
/// part of the fixed taxonomy.
pub async fn set_log(
    db: &DatabaseConnection,
    server_id: &str,
    category: &str,
    event_type: &str,
    channel_id: Option<&str>,
    enabled: bool,
) -> Result<()> {
    let (Some(category), Some(event)) =
        (LogCategory::parse(category), LogEventType::parse(event_type))
    else {
        return Ok(());
    };
    if event.category() != category {
        return Ok(());
    }

    ensure_logging_config(db, server_id, None).await?;

    LogConfig::update_many()
        .col_expr(log_config::Column::Enabled, Expr::value(enabled))
        .col_expr(
            log_config::Column::ChannelId,
            Expr::value(channel_id.map(ToString::to_string)),
        )
        .filter(log_config::Column::ServerId.eq(server_id))
        .filter(log_config::Column::Category.eq(category.as_str()))
        .filter(log_config::Column::EventType.eq(event.as_str()))
        .exec(db)
        .await?;

    Ok(())
}

/// Process-local cache of resolved log destinations.
///
/// Populated once per `(server, event)` key per process lifetime. The
/// category is implied by the event type, so it is not part of the key.
#[derive(Debug, Default)]
pub struct LogCache {
    resolved: Mutex<HashMap<(String, LogEventType), Option<String>>>,
}

impl LogCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves where `event` should be logged for `server_id`.
    ///
    /// Returns the destination channel id when the slot is enabled and has a
    /// channel configured, `None` otherwise. The first lookup for a key
    /// ensures the server's logging record exists (creating the all-disabled
    /// default) and caches the result for the life of the process.
    pub async fn resolve(
        &self,
        db: &DatabaseConnection,
        server_id: &str,
        server_name: Option<&str>,
        event: LogEventType,
    ) -> Result<Option<String>> {
        let key = (server_id.to_string(), event);
        {
            let cache = self.resolved.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }

        // Lock released across the store round-trip; a racing resolve for
        // the same key just does the same work and inserts the same value.
        ensure_logging_config(db, server_id, server_name).await?;
        let slot = get_log_slot(db, server_id, event).await?;
        let resolution = if slot.enabled { slot.channel_id } else { None };

        let mut cache = self.resolved.lock().unwrap_or_else(|e| e.into_inner());
        cache.entry(key).or_insert_with(|| resolution.clone());
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    const SERVER: &str = "server-1";

    #[tokio::test]
    async fn test_first_lookup_seeds_default_disabled_config() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = LogCache::new();

        let resolution = cache
            .resolve(&db, SERVER, Some("Test Server"), LogEventType::MessageDelete)
            .await?;
        assert_eq!(resolution, None);

        // All eleven slots were persisted, disabled
        let slots = LogConfig::find()
            .filter(log_config::Column::ServerId.eq(SERVER))
            .all(&db)
            .await?;
        assert_eq!(slots.len(), ALL_EVENT_TYPES.len());
        assert!(slots.iter().all(|s| !s.enabled && s.channel_id.is_none()));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_log_visible_to_fresh_cache_only() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = LogCache::new();

        // Resolve once so the key is cached as disabled
        assert_eq!(
            cache
                .resolve(&db, SERVER, None, LogEventType::MessageDelete)
                .await?,
            None
        );

        set_log(&db, SERVER, "message_logs", "message_delete", Some("chan-9"), true).await?;

        // Same process: stale cached value
        assert_eq!(
            cache
                .resolve(&db, SERVER, None, LogEventType::MessageDelete)
                .await?,
            None
        );

        // Fresh cache (a new process) sees the update
        let fresh = LogCache::new();
        assert_eq!(
            fresh
                .resolve(&db, SERVER, None, LogEventType::MessageDelete)
                .await?,
            Some("chan-9".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_set_log_rejects_unknown_taxonomy() -> Result<()> {
        let db = setup_test_db().await?;

        // Unknown category and mismatched category/event both no-op
        set_log(&db, SERVER, "voice_logs", "message_delete", Some("c"), true).await?;
        set_log(&db, SERVER, "role_logs", "message_delete", Some("c"), true).await?;

        let slot = get_log_slot(&db, SERVER, LogEventType::MessageDelete).await?;
        assert!(!slot.enabled);
        Ok(())
    }

    #[tokio::test]
    async fn test_enabled_without_channel_resolves_to_none() -> Result<()> {
        let db = setup_test_db().await?;
        set_log(&db, SERVER, "role_logs", "role_update", None, true).await?;

        let cache = LogCache::new();
        assert_eq!(
            cache.resolve(&db, SERVER, None, LogEventType::RoleUpdate).await?,
            None
        );
        Ok(())
    }

    #[test]
    fn test_taxonomy_round_trip() {
        for event in ALL_EVENT_TYPES {
            assert_eq!(LogEventType::parse(event.as_str()), Some(event));
            assert_eq!(
                LogCategory::parse(event.category().as_str()),
                Some(event.category())
            );
        }
    }
}
