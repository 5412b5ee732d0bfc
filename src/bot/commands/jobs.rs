//! Job commands - the paginated catalog listing and applications.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        bot::commands::{COLOR_INFO, COLOR_LOSS, COLOR_WIN, economy_guard},
        core::jobs::{self, ApplicationOutcome},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use rand::{SeedableRng, rngs::StdRng};
    use std::time::Instant;

    /// Renders one catalog page as an embed description.
    fn render_page(page: &[crate::config::jobs::JobConfig]) -> String {
        page.iter()
            .map(|job| {
                format!(
                    "**{}** ({})\n💵 `{}` - `{}` coins\n",
                    job.name,
                    job.rarity.as_str(),
                    job.min_income,
                    job.max_income
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Lists the available jobs, five per page.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn jobs(ctx: Context<'_>) -> Result<()> {
        list_jobs(ctx).await
    }

    /// Shared implementation of the catalog listing, callable from `job`.
    async fn list_jobs(ctx: Context<'_>) -> Result<()> {
        let pages: Vec<String> = ctx
            .data()
            .jobs
            .pages()
            .iter()
            .map(|page| render_page(page))
            .collect();
        if pages.is_empty() {
            ctx.say("❌ No jobs are configured.").await?;
            return Ok(());
        }
        paginate(ctx, &pages).await
    }

    /// Walks the user through the catalog pages with prev/next buttons.
    ///
    /// Modeled on `poise::builtins::paginate`; the collector stops after ten
    /// minutes of inactivity and the message is left on its last page.
    async fn paginate(ctx: Context<'_>, pages: &[String]) -> Result<()> {
        // Unique per invocation so concurrent listings don't cross wires
        let ctx_id = ctx.id();
        let prev_id = format!("{ctx_id}prev");
        let next_id = format!("{ctx_id}next");

        let embed_for = |index: usize| {
            serenity::CreateEmbed::new()
                .title("💼 Available Jobs")
                .description(&pages[index])
                .footer(serenity::CreateEmbedFooter::new(format!(
                    "Page {}/{} • apply with `job <name>`",
                    index + 1,
                    pages.len()
                )))
                .colour(COLOR_INFO)
        };

        let components = serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&prev_id).label("◀"),
            serenity::CreateButton::new(&next_id).label("▶"),
        ]);

        let reply = poise::CreateReply::default()
            .embed(embed_for(0))
            .components(vec![components]);
        ctx.send(reply).await?;

        if pages.len() < 2 {
            return Ok(());
        }

        let mut current = 0;
        while let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
            .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
            .timeout(std::time::Duration::from_secs(600))
            .await
        {
            if press.data.custom_id == next_id {
                current = (current + 1) % pages.len();
            } else if press.data.custom_id == prev_id {
                current = current.checked_sub(1).unwrap_or(pages.len() - 1);
            } else {
                continue;
            }

            press
                .create_response(
                    ctx.serenity_context(),
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new()
                            .embed(embed_for(current)),
                    ),
                )
                .await?;
        }
        Ok(())
    }

    /// Applies for a job by name, or lists the catalog when none is given.
    #[poise::command(slash_command, prefix_command, guild_only)]
    pub async fn job(
        ctx: Context<'_>,
        #[description = "Name of the job to apply for"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        let Some(name) = name else {
            return list_jobs(ctx).await;
        };
        let Some(server_id) = economy_guard(&ctx).await? else {
            return Ok(());
        };
        let user_id = ctx.author().id.to_string();
        let data = ctx.data();

        let mut rng = StdRng::from_entropy();
        let outcome = jobs::apply(
            &data.database,
            &data.jobs,
            &data.cooldowns,
            &mut rng,
            &server_id,
            &user_id,
            &name,
            Instant::now(),
        )
        .await?;

        let embed = match outcome {
            ApplicationOutcome::Hired { job, pay, line } => serenity::CreateEmbed::new()
                .title("✅ You got the job!")
                .description(format!(
                    "{line}\nYou are now a **{job}** and earned `{pay}` coins."
                ))
                .colour(COLOR_WIN),
            ApplicationOutcome::Rejected { line } => serenity::CreateEmbed::new()
                .title("❌ Application rejected")
                .description(line)
                .colour(COLOR_LOSS),
        };
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
