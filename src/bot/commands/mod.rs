//! Chat command implementations, grouped by concern.

/// Admin commands - log configuration, prefix, economy toggle
pub mod admin;
/// Balance, deposit, withdraw, and the daily claim
pub mod economy;
/// Coinflip and roulette
pub mod gamble;
/// General commands - ping and help
pub mod general;
/// Job listing and applications
pub mod jobs;

use crate::{bot::Context, errors::Error, errors::Result};

/// Embed accent used for neutral informational replies.
pub(crate) const COLOR_INFO: u32 = 0x98C9FF;
/// Embed accent for favorable outcomes.
pub(crate) const COLOR_WIN: u32 = 0x2ECC71;
/// Embed accent for losses and failures.
pub(crate) const COLOR_LOSS: u32 = 0xE74C3C;

/// Resolves the invoking server for an economy command, replying and
/// returning `None` when the command ran outside a server or the server
/// has its economy disabled.
pub(crate) async fn economy_guard(ctx: &Context<'_>) -> Result<Option<String>> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("❌ This command only works in a server.").await?;
        return Ok(None);
    };
    let server_id = guild_id.to_string();
    if !crate::core::economy::is_enabled(&ctx.data().database, &server_id).await? {
        ctx.say("❌ The economy is disabled in this server.").await?;
        return Ok(None);
    }
    Ok(Some(server_id))
}

/// Renders a user-facing validation error the way the bot replies in chat.
#[must_use]
pub fn user_error_reply(error: &Error) -> String {
    match error {
        Error::InvalidAmount { .. } => "❌ Invalid amount. Use a number or `all`.".to_string(),
        Error::InsufficientFunds { .. } => "❌ Invalid or insufficient amount.".to_string(),
        Error::InvalidBet { .. } => "❌ Bet must be: red, black, even, odd or 0-36".to_string(),
        Error::UnknownJob { .. } => {
            "❌ That job doesn't exist. Try `jobs` to see options.".to_string()
        }
        Error::CooldownActive { remaining } => {
            let secs = remaining.as_secs_f64();
            if secs < 3600.0 {
                format!("🕒 Try again in `{}s`.", secs.round() as i64)
            } else {
                format!("🕒 You already applied for a job recently. Try again in `{:.1}h`.", secs / 3600.0)
            }
        }
        other => format!("⚠️ {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cooldown_reply_rounds_to_seconds() {
        let reply = user_error_reply(&Error::CooldownActive {
            remaining: Duration::from_millis(6600),
        });
        assert_eq!(reply, "🕒 Try again in `7s`.");
    }

    #[test]
    fn test_long_cooldown_reply_uses_hours() {
        let reply = user_error_reply(&Error::CooldownActive {
            remaining: Duration::from_secs(23 * 3600),
        });
        assert!(reply.contains("23.0h"));
    }
}
