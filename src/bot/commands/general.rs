//! General commands - ping, help, and other utility commands.
//! Simple commands that don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**coinlog Help**\n\
        Here is a summary of all available commands.\n\n\
        **Economy**\n\
        • `balance` (`bal`) - Shows your wallet and bank balance.\n\
        • `deposit <amount|all>` (`dep`) - Moves coins from wallet to bank.\n\
        • `withdraw <amount|all>` (`wd`) - Moves coins from bank to wallet.\n\
        • `daily` - Claims your daily 500 coins (once every 24h).\n\n\
        **Gambling**\n\
        • `coinflip [amount|all]` (`cf`) - 35% chance to double your stake.\n\
        • `roulette <bet> [amount|all]` - Bet on red, black, even, odd or 0-36.\n\n\
        **Jobs**\n\
        • `jobs` - Lists available jobs.\n\
        • `job [name]` - Applies for a job (once every 24h).\n\n\
        **Admin**\n\
        • `setlog <category> <event> [#channel] [on|off]` - Configures event logging.\n\
        • `setprefix <prefix>` - Changes the command prefix for this server.\n\
        • `seteconomy <on|off>` - Enables or disables the economy here.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
