//! Database configuration module.
//!
//! Handles `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`
//! so the schema always matches the Rust struct definitions without manual SQL.

use crate::entities::{EconomyServer, EconomyUser, LogConfig, LoggingServer, Prefix};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use sea_orm::sea_query::TableCreateStatement;

/// Gets the database URL from `DATABASE_URL` or falls back to a local
/// `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/coinlog.sqlite".to_string())
}

/// Establishes the database connection using [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions, ignoring ones that
/// already exist so startup is idempotent.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements: Vec<TableCreateStatement> = vec![
        schema.create_table_from_entity(EconomyServer),
        schema.create_table_from_entity(EconomyUser),
        schema.create_table_from_entity(LoggingServer),
        schema.create_table_from_entity(LogConfig),
        schema.create_table_from_entity(Prefix),
    ];

    for statement in &mut statements {
        db.execute(builder.build(statement.if_not_exists())).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EconomyServerModel, EconomyUserModel, LogConfigModel, PrefixModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist if we can query them
        let _: Vec<EconomyServerModel> = EconomyServer::find().limit(1).all(&db).await?;
        let _: Vec<EconomyUserModel> = EconomyUser::find().limit(1).all(&db).await?;
        let _: Vec<LogConfigModel> = LogConfig::find().limit(1).all(&db).await?;
        let _: Vec<PrefixModel> = Prefix::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
