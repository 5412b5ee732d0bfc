//! Economy user entity - Wallet, bank, and cooldown state for one user in
//! one server.
//!
//! Rows are created lazily on first reference with an empty wallet and a
//! 300-coin bank. Balances are whole coins; there is no fractional currency.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-user economy state, keyed by (server, user)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "economy_users")]
pub struct Model {
    /// Chat-platform server identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    /// Chat-platform user identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Spendable balance, never negative
    pub wallet: i64,
    /// Savings balance, never negative, not subject to wagers
    pub bank: i64,
    /// UTC timestamp of the last successful daily claim
    pub last_daily: Option<DateTimeUtc>,
    /// Current job title, if the user holds one
    pub job: Option<String>,
}

/// Defines relationships between economy users and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each user row belongs to one economy server record
    #[sea_orm(
        belongs_to = "super::economy_server::Entity",
        from = "Column::ServerId",
        to = "super::economy_server::Column::ServerId"
    )]
    Server,
}

impl Related<super::economy_server::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Server.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
