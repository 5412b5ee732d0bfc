//! Logging server entity - Per-server logging configuration header.
//!
//! Holds the display name only; the actual per-event settings live in
//! [`super::log_config`]. Created with all events disabled the first time any
//! event for the server is evaluated, and never deleted by this subsystem.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-server logging configuration record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "logging_servers")]
pub struct Model {
    /// Chat-platform server identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    /// Server display name, informational only
    pub server_name: Option<String>,
}

/// Defines relationships between logging servers and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One server has one log-config row per event type
    #[sea_orm(has_many = "super::log_config::Entity")]
    Slots,
}

impl Related<super::log_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Slots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
