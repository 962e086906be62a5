use crate::bot::{Data, Error};
use crate::utils::format::describe_shift_error;
use crate::utils::time::{format_hours, format_time, get_current_datetime};
use poise::serenity_prelude as serenity;

pub const START_BUTTON_ID: &str = "start";
pub const END_BUTTON_ID: &str = "end";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftAction {
    Start,
    End,
}

impl ShiftAction {
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            START_BUTTON_ID => Some(ShiftAction::Start),
            END_BUTTON_ID => Some(ShiftAction::End),
            _ => None,
        }
    }
}

pub fn create_shift_buttons() -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(START_BUTTON_ID)
            .label("🟢 Prise de service")
            .style(serenity::ButtonStyle::Success),
        serenity::CreateButton::new(END_BUTTON_ID)
            .label("🔴 Fin de service")
            .style(serenity::ButtonStyle::Danger),
    ])
}

pub async fn handle_shift_interaction(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let Some(action) = ShiftAction::from_custom_id(&interaction.data.custom_id) else {
        tracing::debug!("Ignoring component interaction {}", interaction.data.custom_id);
        return Ok(());
    };

    let user_id = interaction.user.id.to_string();
    let username = &interaction.user.name;
    let offset = data.config.display_offset;
    let now = get_current_datetime();

    let content = match action {
        ShiftAction::Start => match data.tracker.lock().await.start(&user_id, now).await {
            Ok(clock_in) => format!(
                "🟢 {} a pris son service à **{}**",
                username,
                format_time(clock_in.clock_in_time, offset)
            ),
            Err(e) => describe_shift_error(&e, offset),
        },
        ShiftAction::End => match data.tracker.lock().await.end(&user_id, now).await {
            Ok(clock_out) => format!(
                "🔴 {} a terminé son service à **{}**\n🕒 Durée : **{}**",
                username,
                format_time(clock_out.clock_out_time, offset),
                format_hours(clock_out.duration_hours)
            ),
            Err(e) => describe_shift_error(&e, offset),
        },
    };

    respond(ctx, interaction, content).await
}

async fn respond(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    content: String,
) -> Result<(), Error> {
    interaction
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_button_ids() {
        assert_eq!(ShiftAction::from_custom_id("start"), Some(ShiftAction::Start));
        assert_eq!(ShiftAction::from_custom_id("end"), Some(ShiftAction::End));
    }

    #[test]
    fn test_unknown_button_ids_are_ignored() {
        assert_eq!(ShiftAction::from_custom_id("time_edit"), None);
        assert_eq!(ShiftAction::from_custom_id(""), None);
        assert_eq!(ShiftAction::from_custom_id("START"), None);
    }
}
