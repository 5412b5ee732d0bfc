//! Economy commands - balance, deposit, withdraw, daily.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        bot::commands::{COLOR_INFO, COLOR_LOSS, COLOR_WIN, economy_guard},
        core::{economy, gamble::Stake},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Shows your wallet and bank balance.
    #[poise::command(slash_command, prefix_command, aliases("bal"), guild_only)]
    pub async fn balance(ctx: Context<'_>) -> Result<()> {
        let Some(server_id) = economy_guard(&ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let balance = economy::get_balance(&ctx.data().database, &server_id, &user_id).await?;

        let description = format!(
            "| Account | Coins |\n\
             | ------- | ----- |\n\
             | 👛 Wallet | `{}` |\n\
             | 🏦 Bank | `{}` |\n\
             | 💰 Total | `{}` |",
            balance.wallet,
            balance.bank,
            balance.total()
        );
        let embed = serenity::CreateEmbed::new()
            .title(format!("{}'s Balance", ctx.author().name))
            .description(description)
            .colour(COLOR_INFO);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Moves coins from your wallet into your bank.
    #[poise::command(slash_command, prefix_command, aliases("dep"), guild_only)]
    pub async fn deposit(
        ctx: Context<'_>,
        #[description = "Amount of coins, or `all`"] amount: String,
    ) -> Result<()> {
        let Some(server_id) = economy_guard(&ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let db = &ctx.data().database;

        let stake: Stake = amount.parse()?;
        let balance = economy::get_balance(db, &server_id, &user_id).await?;
        let amount = stake.resolve(balance.wallet)?;

        if economy::deposit(db, &server_id, &user_id, amount).await? {
            ctx.say(format!("✅ Deposited `{amount}` coins into your bank."))
                .await?;
        } else {
            // Wallet changed between the read and the transfer
            ctx.say("❌ Invalid or insufficient amount.").await?;
        }
        Ok(())
    }

    /// Moves coins from your bank into your wallet.
    #[poise::command(slash_command, prefix_command, aliases("wd"), guild_only)]
    pub async fn withdraw(
        ctx: Context<'_>,
        #[description = "Amount of coins, or `all`"] amount: String,
    ) -> Result<()> {
        let Some(server_id) = economy_guard(&ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let db = &ctx.data().database;

        let stake: Stake = amount.parse()?;
        let balance = economy::get_balance(db, &server_id, &user_id).await?;
        let amount = stake.resolve(balance.bank)?;

        if economy::withdraw(db, &server_id, &user_id, amount).await? {
            ctx.say(format!("✅ Withdrew `{amount}` coins from your bank."))
                .await?;
        } else {
            ctx.say("❌ Invalid or insufficient amount.").await?;
        }
        Ok(())
    }

    /// Claims your daily coins, once every 24 hours.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn daily(ctx: Context<'_>) -> Result<()> {
        let Some(server_id) = economy_guard(&ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let db = &ctx.data().database;

        if economy::claim_daily(db, &server_id, &user_id, economy::DAILY_REWARD).await? {
            let embed = serenity::CreateEmbed::new()
                .title("💰 Daily Claimed")
                .description(format!(
                    "You received `{}` coins! Come back in 24 hours.",
                    economy::DAILY_REWARD
                ))
                .colour(COLOR_WIN);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        } else {
            let embed = serenity::CreateEmbed::new()
                .title("🕒 Already Claimed")
                .description("You already claimed your daily coins. Try again later.")
                .colour(COLOR_LOSS);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
