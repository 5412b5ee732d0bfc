//! Log config entity - One row per (server, category, event type) slot.
//!
//! The category/event-type taxonomy is fixed (see [`crate::core::logging`]);
//! rows outside it are never written.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-event logging slot
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "log_configs")]
pub struct Model {
    /// Chat-platform server identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    /// Log category name (e.g. "message_logs")
    #[sea_orm(primary_key, auto_increment = false)]
    pub category: String,
    /// Event type name within the category (e.g. "message_delete")
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_type: String,
    /// Whether this event type produces notifications
    pub enabled: bool,
    /// Destination channel for notifications, if configured
    pub channel_id: Option<String>,
}

/// Defines relationships between log-config slots and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each slot belongs to one logging server record
    #[sea_orm(
        belongs_to = "super::logging_server::Entity",
        from = "Column::ServerId",
        to = "super::logging_server::Column::ServerId"
    )]
    Server,
}

impl Related<super::logging_server::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Server.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
