//! Prefix entity - Per-server command prefix override.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-server command prefix
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prefixes")]
pub struct Model {
    /// Chat-platform server identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    /// Command prefix used in this server
    pub prefix: String,
}

/// Prefixes have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
