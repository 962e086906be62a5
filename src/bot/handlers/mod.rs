use crate::bot::{Data, Error};
use crate::bot::interactions::shift_buttons;
use poise::serenity_prelude as serenity;

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!("Bot logged in as {}", data_about_bot.user.name);
        }
        serenity::FullEvent::InteractionCreate { interaction } => {
            if let serenity::Interaction::Component(component_interaction) = interaction {
                if let Err(e) = shift_buttons::handle_shift_interaction(ctx, component_interaction, data).await {
                    tracing::error!("Error handling component interaction: {:?}", e);
                }
            }
        }
        _ => {}
    }
    Ok(())
}
