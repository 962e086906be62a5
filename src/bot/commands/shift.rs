use crate::bot::interactions::shift_buttons::create_shift_buttons;
use crate::bot::{Context, Error};
use crate::utils::format::{create_panel_embed, create_status_embed};

/// Affiche la pointeuse pour prendre ou finir un service
#[poise::command(slash_command, prefix_command)]
pub async fn service(ctx: Context<'_>) -> Result<(), Error> {
    let builder = poise::CreateReply::default()
        .embed(create_panel_embed())
        .components(vec![create_shift_buttons()])
        .ephemeral(true);

    ctx.send(builder).await?;

    Ok(())
}

/// Affiche ton état de service et ton total
#[poise::command(slash_command, prefix_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let user_id = ctx.author().id.to_string();
    let username = ctx.author().name.clone();
    let offset = ctx.data().config.display_offset;

    let embed = {
        let tracker = ctx.data().tracker.lock().await;
        create_status_embed(&username, tracker.record(&user_id), offset)
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
