//! Shared test utilities for coinlog.
//!
//! Common helpers for setting up test databases and seeding economy state
//! with sensible defaults.

use crate::{config::jobs::{JobConfig, Rarity}, core::economy, errors::Result};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a user with the given wallet balance on top of the default
/// 300-coin bank.
pub async fn seed_user_with_wallet(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
    wallet: i64,
) -> Result<()> {
    economy::ensure_user(db, server_id, user_id).await?;
    economy::add_wallet(db, server_id, user_id, wallet).await
}

/// A small job catalog covering the interesting rarity tiers.
#[must_use]
pub fn sample_jobs() -> Vec<JobConfig> {
    vec![
        JobConfig {
            name: "Janitor".to_string(),
            min_income: 50,
            max_income: 150,
            rarity: Rarity::Common,
        },
        JobConfig {
            name: "Streamer".to_string(),
            min_income: 10,
            max_income: 2000,
            rarity: Rarity::Risky,
        },
        JobConfig {
            name: "Astronaut".to_string(),
            min_income: 2000,
            max_income: 5000,
            rarity: Rarity::Legendary,
        },
    ]
}
