//! Economy server entity - Per-server switch for the economy subsystem.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-server economy record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "economy_servers")]
pub struct Model {
    /// Chat-platform server identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    /// Whether the economy subsystem is active for this server
    pub enabled: bool,
}

/// Defines relationships between economy servers and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One server has many user economy rows
    #[sea_orm(has_many = "super::economy_user::Entity")]
    Users,
}

impl Related<super::economy_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
