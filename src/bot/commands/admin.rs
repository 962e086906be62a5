use crate::bot::{Context, Error};
use crate::utils::format::{describe_shift_error, format_error_message, format_success_message};
use poise::serenity_prelude as serenity;

/// Members holding the configured admin role, or everyone when none is configured
async fn is_admin(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(role_id) = ctx.data().config.admin_role_id else {
        return Ok(true);
    };
    let role = serenity::RoleId::new(role_id);

    let allowed = match ctx.author_member().await {
        Some(member) => member.roles.contains(&role),
        None => false,
    };

    if !allowed {
        tracing::warn!("User {} tried to clear shifts without the admin role", ctx.author().id);
        ctx.send(
            poise::CreateReply::default()
                .content(format_error_message("Cette commande est réservée aux administrateurs."))
                .ephemeral(true),
        )
        .await?;
    }

    Ok(allowed)
}

/// Réinitialise les heures de tout le monde (admin)
#[poise::command(slash_command, prefix_command, check = "is_admin")]
pub async fn clear(ctx: Context<'_>) -> Result<(), Error> {
    let result = ctx.data().tracker.lock().await.clear_all().await;

    let content = match result {
        Ok(_) => format_success_message("🧹 Tous les compteurs ont été remis à zéro."),
        Err(e) => describe_shift_error(&e, ctx.data().config.display_offset),
    };

    ctx.send(poise::CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}
