//! Bot layer - chat-platform interface and command handlers
//!
//! Provides the Discord interface for coinlog: all commands, the gateway
//! event handler that feeds the event notifier, bot context management, and
//! the per-server dynamic command prefix.

/// Chat command implementations (economy, gambling, jobs, admin, general)
pub mod commands;
/// Gateway event handlers feeding the event notifier
pub mod handlers;

use crate::{
    core::{cooldown::Cooldowns, jobs::JobCatalog, logging::LogCache},
    entities::{Prefix, prefix},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};
use tracing::{error, info, warn};

/// Shared data available to all bot commands and event handlers.
pub struct BotData {
    /// Database connection for all store operations
    pub database: DatabaseConnection,
    /// Job catalog loaded from config.toml
    pub jobs: JobCatalog,
    /// Coinflip and job-application cooldown state
    pub cooldowns: Cooldowns,
    /// Process-local cache of resolved log destinations
    pub log_cache: LogCache,
    /// Prefix used when a server has not configured its own
    pub default_prefix: String,
}

impl BotData {
    /// Creates the shared bot context with empty cooldown and cache state.
    #[must_use]
    pub fn new(database: DatabaseConnection, jobs: JobCatalog, default_prefix: String) -> Self {
        Self {
            database,
            jobs,
            cooldowns: Cooldowns::new(),
            log_cache: LogCache::new(),
            default_prefix,
        }
    }
}

/// Convenience context alias used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Looks up the configured prefix for a server, if any.
pub async fn get_prefix(db: &DatabaseConnection, server_id: &str) -> Result<Option<String>> {
    Ok(Prefix::find_by_id(server_id)
        .one(db)
        .await?
        .map(|row| row.prefix))
}

/// Persists the command prefix for a server.
pub async fn set_prefix(db: &DatabaseConnection, server_id: &str, new_prefix: &str) -> Result<()> {
    let row = prefix::ActiveModel {
        server_id: Set(server_id.to_string()),
        prefix: Set(new_prefix.to_string()),
    };
    Prefix::insert(row)
        .on_conflict(
            OnConflict::column(prefix::Column::ServerId)
                .update_column(prefix::Column::Prefix)
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Command-error handler: user-facing validation errors become replies,
/// everything else is logged and answered with a generic failure message.
async fn on_error(framework_error: poise::FrameworkError<'_, BotData, Error>) {
    match framework_error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            if error.is_user_facing() {
                let _ = ctx.say(commands::user_error_reply(&error)).await;
            } else {
                error!("Error in command `{}`: {error}", ctx.command().name);
                let _ = ctx.say("⚠️ Something went wrong. Please try again.").await;
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                warn!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the serenity client with the poise framework installed.
///
/// The caller owns the returned client so it can hand the HTTP/cache
/// handles to the auth API before starting the gateway connection.
pub async fn build_client(token: &str, data: BotData) -> Result<serenity::Client> {
    let options = poise::FrameworkOptions {
        commands: vec![
            commands::general::ping(),
            commands::general::help(),
            commands::economy::balance(),
            commands::economy::deposit(),
            commands::economy::withdraw(),
            commands::economy::daily(),
            commands::gamble::coinflip(),
            commands::gamble::roulette(),
            commands::jobs::jobs(),
            commands::jobs::job(),
            commands::admin::setlog(),
            commands::admin::setprefix(),
            commands::admin::seteconomy(),
        ],
        prefix_options: poise::PrefixFrameworkOptions {
            dynamic_prefix: Some(|ctx| {
                Box::pin(async move {
                    let data = ctx.framework.user_data;
                    let Some(guild_id) = ctx.guild_id else {
                        return Ok(Some(data.default_prefix.clone()));
                    };
                    match get_prefix(&data.database, &guild_id.to_string()).await {
                        Ok(Some(prefix)) => Ok(Some(prefix)),
                        Ok(None) => Ok(Some(data.default_prefix.clone())),
                        Err(e) => {
                            warn!("Prefix lookup failed: {e}");
                            Ok(Some(data.default_prefix.clone()))
                        }
                    }
                })
            }),
            ..Default::default()
        },
        event_handler: |ctx, event, _framework, data| {
            Box::pin(handlers::handle_event(ctx, event, data))
        },
        on_error: |framework_error| Box::pin(on_error(framework_error)),
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .options(options)
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .map_err(Error::from)
}
