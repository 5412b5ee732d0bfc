//! Gambling commands - coinflip and roulette.
//!
//! Parse errors and insufficient-funds rejections propagate out of the
//! command and are turned into chat replies by the framework error handler.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        bot::commands::{COLOR_LOSS, COLOR_WIN, economy_guard},
        core::gamble,
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use rand::{SeedableRng, rngs::StdRng};
    use std::time::Instant;

    /// Flips a coin for your stake. 35% chance to win the same amount.
    #[poise::command(slash_command, prefix_command, aliases("cf"), guild_only)]
    pub async fn coinflip(
        ctx: Context<'_>,
        #[description = "Amount of coins, or `all` (default 100)"] amount: Option<String>,
    ) -> Result<()> {
        let Some(server_id) = economy_guard(&ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let data = ctx.data();

        let stake: gamble::Stake = amount.as_deref().unwrap_or("100").parse()?;
        // thread_rng is not Send across awaits; a freshly seeded StdRng is
        let mut rng = StdRng::from_entropy();
        let outcome = gamble::coinflip(
            &data.database,
            &data.cooldowns,
            &mut rng,
            &server_id,
            &user_id,
            stake,
            Instant::now(),
        )
        .await?;

        let embed = if outcome.won {
            serenity::CreateEmbed::new()
                .title("🪙 Coinflip - You won!")
                .description(format!("You won `{}` coins!", outcome.amount))
                .colour(COLOR_WIN)
        } else {
            serenity::CreateEmbed::new()
                .title("🪙 Coinflip - You lost")
                .description(format!("You lost `{}` coins.", outcome.amount))
                .colour(COLOR_LOSS)
        };
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Spins the roulette wheel. Bet on red, black, even, odd or a number.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn roulette(
        ctx: Context<'_>,
        #[description = "red, black, even, odd or a number 0-36"] bet: String,
        #[description = "Amount of coins, or `all` (default 100)"] amount: Option<String>,
    ) -> Result<()> {
        let Some(server_id) = economy_guard(&ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let data = ctx.data();

        let bet: gamble::RouletteBet = bet.parse()?;
        let stake: gamble::Stake = amount.as_deref().unwrap_or("100").parse()?;
        let mut rng = StdRng::from_entropy();
        let outcome =
            gamble::roulette(&data.database, &mut rng, &server_id, &user_id, bet, stake).await?;

        let landed = format!("The ball landed on **{} {}**.", outcome.pocket, outcome.color);
        let embed = match outcome.payout {
            Some(payout) => serenity::CreateEmbed::new()
                .title("🎡 Roulette - You won!")
                .description(format!("{landed}\nYour `{bet}` bet paid out `{payout}` coins!"))
                .colour(COLOR_WIN),
            None => serenity::CreateEmbed::new()
                .title("🎡 Roulette - You lost")
                .description(format!(
                    "{landed}\nYour `{bet}` bet lost `{}` coins.",
                    outcome.amount
                ))
                .colour(COLOR_LOSS),
        };
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
