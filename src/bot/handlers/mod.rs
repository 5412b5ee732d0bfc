//! Gateway event handlers.
//!
//! Maps raw serenity events into the SDK-agnostic [`LogEvent`] model, then
//! resolves the destination through the log cache and delivers the built
//! notification. Events outside a server, and update/delete events whose
//! prior state is not in the gateway cache, are skipped: without the old
//! state there is nothing meaningful to report.

use crate::{
    bot::BotData,
    core::notify::{ActorRef, AttachmentRef, ChannelState, LogEvent, MessageInfo, RoleState},
    errors::Result,
};
use poise::serenity_prelude as serenity;
use tracing::warn;

/// Entry point wired into the poise framework options.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &BotData,
) -> Result<()> {
    // Mapping is synchronous and cache-only; all awaits happen after every
    // cache reference has been dropped.
    let Some(log_event) = map_event(ctx, event) else {
        return Ok(());
    };
    dispatch(ctx, data, log_event).await
}

fn role_state(role: &serenity::Role) -> RoleState {
    RoleState {
        id: role.id.to_string(),
        name: role.name.clone(),
        color: (role.colour.0 != 0).then(|| format!("#{:06X}", role.colour.0)),
        mentionable: role.mentionable,
        hoist: role.hoist,
        allow: role.permissions.bits(),
        // The platform models role permissions as a single mask
        deny: 0,
        rank: i64::from(role.position),
    }
}

fn channel_state(channel: &serenity::GuildChannel) -> ChannelState {
    ChannelState {
        id: channel.id.to_string(),
        name: channel.name.clone(),
        description: channel.topic.clone(),
        kind: channel.kind.name().to_string(),
    }
}

fn timestamp_to_utc(timestamp: serenity::Timestamp) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(timestamp.unix_timestamp(), 0)
}

/// Converts a gateway event into a loggable event, or `None` when it is not
/// part of the logging taxonomy or lacks the state needed to describe it.
fn map_event(ctx: &serenity::Context, event: &serenity::FullEvent) -> Option<LogEvent> {
    match event {
        serenity::FullEvent::MessageDelete {
            channel_id,
            deleted_message_id,
            guild_id,
        } => {
            let guild_id = (*guild_id)?;
            // Content and author are only known for cached messages
            let cached = ctx.cache.message(*channel_id, *deleted_message_id)?;
            Some(LogEvent::MessageDeleted {
                message: MessageInfo {
                    server_id: guild_id.to_string(),
                    channel_id: channel_id.to_string(),
                    message_id: deleted_message_id.to_string(),
                    author: ActorRef {
                        id: cached.author.id.to_string(),
                        is_bot: cached.author.bot,
                    },
                    timestamp: timestamp_to_utc(cached.timestamp),
                },
                content: Some(cached.content.clone()),
                attachments: cached
                    .attachments
                    .iter()
                    .map(|a| AttachmentRef {
                        filename: a.filename.clone(),
                        url: a.url.clone(),
                    })
                    .collect(),
            })
        }
        serenity::FullEvent::MessageUpdate {
            old_if_available,
            new,
            event,
        } => {
            let guild_id = event.guild_id?;
            let author = new
                .as_ref()
                .map(|m| &m.author)
                .or(event.author.as_ref())?;
            let timestamp = new
                .as_ref()
                .map(|m| m.timestamp)
                .or(event.timestamp)
                .and_then(timestamp_to_utc);
            Some(LogEvent::MessageEdited {
                message: MessageInfo {
                    server_id: guild_id.to_string(),
                    channel_id: event.channel_id.to_string(),
                    message_id: event.id.to_string(),
                    author: ActorRef {
                        id: author.id.to_string(),
                        is_bot: author.bot,
                    },
                    timestamp,
                },
                before: old_if_available.as_ref().map(|m| m.content.clone()),
                after: new
                    .as_ref()
                    .map(|m| m.content.clone())
                    .or_else(|| event.content.clone()),
            })
        }
        serenity::FullEvent::GuildRoleCreate { new } => Some(LogEvent::RoleCreated {
            server_id: new.guild_id.to_string(),
            role: role_state(new),
        }),
        serenity::FullEvent::GuildRoleUpdate {
            old_data_if_available,
            new,
        } => {
            let old = old_data_if_available.as_ref()?;
            Some(LogEvent::RoleUpdated {
                server_id: new.guild_id.to_string(),
                old: role_state(old),
                new: role_state(new),
            })
        }
        serenity::FullEvent::GuildRoleDelete {
            guild_id,
            removed_role_data_if_available,
            ..
        } => {
            let role = removed_role_data_if_available.as_ref()?;
            Some(LogEvent::RoleDeleted {
                server_id: guild_id.to_string(),
                role: role_state(role),
            })
        }
        serenity::FullEvent::ChannelCreate { channel } => Some(LogEvent::ChannelCreated {
            server_id: channel.guild_id.to_string(),
            channel: channel_state(channel),
        }),
        serenity::FullEvent::ChannelUpdate { old, new } => {
            let old = old.as_ref()?;
            Some(LogEvent::ChannelUpdated {
                server_id: new.guild_id.to_string(),
                old: channel_state(old),
                new: channel_state(new),
            })
        }
        serenity::FullEvent::ChannelDelete { channel, .. } => Some(LogEvent::ChannelDeleted {
            server_id: channel.guild_id.to_string(),
            channel: channel_state(channel),
        }),
        _ => None,
    }
}

/// Resolves the destination for `event` and delivers its notification.
/// Delivery failures are logged, never propagated; a broken log channel
/// must not take down event handling.
async fn dispatch(ctx: &serenity::Context, data: &BotData, event: LogEvent) -> Result<()> {
    if event.from_bot_actor() {
        return Ok(());
    }

    let server_id = event.server_id().to_string();
    let server_name = server_id
        .parse::<std::num::NonZeroU64>()
        .ok()
        .and_then(|id| {
            ctx.cache
                .guild(serenity::GuildId::new(id.get()))
                .map(|g| g.name.clone())
        });

    let Some(channel_id) = data
        .log_cache
        .resolve(
            &data.database,
            &server_id,
            server_name.as_deref(),
            event.event_type(),
        )
        .await?
    else {
        return Ok(());
    };

    let Some(notification) = event.build() else {
        return Ok(());
    };

    let Ok(raw_id) = channel_id.parse::<std::num::NonZeroU64>() else {
        warn!("Ignoring malformed log channel id {channel_id:?} for server {server_id}");
        return Ok(());
    };

    let embed = serenity::CreateEmbed::new()
        .title(notification.title)
        .description(notification.description)
        .colour(notification.color);
    if let Err(e) = serenity::ChannelId::new(raw_id.get())
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        warn!("Failed to deliver log notification to channel {channel_id}: {e}");
    }
    Ok(())
}
