//! Admin commands - log configuration, command prefix, economy toggle.
//!
//! All of these require the Manage Server permission.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{self, Context},
        core::{
            economy,
            logging::{self, LogCategory, LogEventType},
        },
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Configures where one event type is logged and whether it is enabled.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "MANAGE_GUILD"
    )]
    pub async fn setlog(
        ctx: Context<'_>,
        #[description = "moderation_logs, message_logs, role_logs or channel_logs"]
        category: String,
        #[description = "Event type, e.g. message_delete"] event_type: String,
        #[description = "Channel notifications are sent to"] channel: Option<serenity::Channel>,
        #[description = "Whether to enable this event (default on)"] enabled: Option<bool>,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };

        // Validate up front so a typo gets a reply instead of a silent no-op
        let Some(parsed_category) = LogCategory::parse(&category) else {
            ctx.say(
                "❌ Unknown category. Use one of: `moderation_logs`, \
                 `message_logs`, `role_logs`, `channel_logs`.",
            )
            .await?;
            return Ok(());
        };
        let Some(parsed_event) = LogEventType::parse(&event_type) else {
            ctx.say("❌ Unknown event type. Try e.g. `message_delete` or `role_update`.")
                .await?;
            return Ok(());
        };
        if parsed_event.category() != parsed_category {
            ctx.say(format!(
                "❌ `{parsed_event}` belongs to `{}`, not `{parsed_category}`.",
                parsed_event.category()
            ))
            .await?;
            return Ok(());
        }

        let enabled = enabled.unwrap_or(true);
        let channel_id = channel.as_ref().map(|c| c.id().to_string());
        logging::set_log(
            &ctx.data().database,
            &guild_id.to_string(),
            parsed_category.as_str(),
            parsed_event.as_str(),
            channel_id.as_deref(),
            enabled,
        )
        .await?;

        let state = if enabled { "enabled" } else { "disabled" };
        let destination = channel_id
            .map_or_else(|| "no channel".to_string(), |id| format!("<#{id}>"));
        ctx.say(format!("✅ `{parsed_event}` logging {state} ({destination})."))
            .await?;
        Ok(())
    }

    /// Changes the command prefix for this server.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "MANAGE_GUILD"
    )]
    pub async fn setprefix(
        ctx: Context<'_>,
        #[description = "New command prefix, e.g. `!`"] prefix: String,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };
        let prefix = prefix.trim();
        if prefix.is_empty() || prefix.len() > 8 {
            ctx.say("❌ Prefix must be 1-8 characters.").await?;
            return Ok(());
        }

        bot::set_prefix(&ctx.data().database, &guild_id.to_string(), prefix).await?;
        ctx.say(format!("✅ Prefix set to `{prefix}`.")).await?;
        Ok(())
    }

    /// Enables or disables the economy for this server.
    #[poise::command(
        slash_command,
        prefix_command,
        guild_only,
        required_permissions = "MANAGE_GUILD"
    )]
    pub async fn seteconomy(
        ctx: Context<'_>,
        #[description = "Whether the economy is active here"] enabled: bool,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };
        economy::set_enabled(&ctx.data().database, &guild_id.to_string(), enabled).await?;
        let state = if enabled { "enabled" } else { "disabled" };
        ctx.say(format!("✅ Economy {state} for this server.")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
