use crate::bot::{Context, Error, display_name};
use crate::tracker::{ActiveShift, UserTotal};
use crate::utils::format::{
    COLOR_ACTIVE, COLOR_TOTALS, create_list_embed, format_active_line, format_total_line,
};

/// Affiche les heures totales par utilisateur
#[poise::command(slash_command, prefix_command)]
pub async fn total(ctx: Context<'_>) -> Result<(), Error> {
    // Snapshot under the lock, resolve names after releasing it
    let totals: Vec<UserTotal> = ctx.data().tracker.lock().await.totals().collect();

    let mut lines = Vec::with_capacity(totals.len());
    for entry in &totals {
        let name = display_name(ctx.serenity_context(), &entry.user_id).await;
        lines.push(format_total_line(&name, entry.total_hours));
    }

    let embed = create_list_embed(
        "📊 Heures totales par utilisateur",
        &lines,
        "Aucune donnée disponible.",
        COLOR_TOTALS,
    );
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Affiche qui est actuellement en service
#[poise::command(slash_command, prefix_command)]
pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
    let offset = ctx.data().config.display_offset;
    let mut active: Vec<ActiveShift> = ctx.data().tracker.lock().await.active();
    active.sort_by_key(|shift| shift.since);

    let mut lines = Vec::with_capacity(active.len());
    for shift in &active {
        let name = display_name(ctx.serenity_context(), &shift.user_id).await;
        lines.push(format_active_line(&name, shift.since, offset));
    }

    let embed = create_list_embed(
        "🟢 Utilisateurs actuellement en service",
        &lines,
        "Aucun utilisateur en service.",
        COLOR_ACTIVE,
    );
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
