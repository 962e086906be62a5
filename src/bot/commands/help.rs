use crate::bot::{Context, Error};
use crate::utils::format::create_help_embed;

/// Affiche les commandes disponibles
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = create_help_embed(&ctx.data().config.command_prefix);
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
