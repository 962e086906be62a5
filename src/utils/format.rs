use crate::database::models::UserShiftRecord;
use crate::error::ShiftError;
use crate::utils::time::{format_datetime, format_hours, format_time};
use chrono::FixedOffset;
use poise::serenity_prelude as serenity;

pub const COLOR_HELP: u32 = 0x00ae86;
pub const COLOR_PANEL: u32 = 0x5865f2;
pub const COLOR_TOTALS: u32 = 0x2ecc71;
pub const COLOR_ACTIVE: u32 = 0x3498db;

pub fn format_error_message(error: &str) -> String {
    format!("❌ {}", error)
}

pub fn format_success_message(message: &str) -> String {
    format!("✅ {}", message)
}

/// User-facing text for a rejected or failed shift action
pub fn describe_shift_error(error: &ShiftError, offset: FixedOffset) -> String {
    match error {
        ShiftError::NoActiveShift => {
            format_error_message("Tu dois d'abord cliquer sur **Prise de service**.")
        }
        ShiftError::ShiftAlreadyActive { since } => format_error_message(&format!(
            "Tu es déjà en service depuis **{}**. Clique sur **Fin de service** d'abord.",
            format_time(*since, offset)
        )),
        ShiftError::ClockSkew { start, .. } => format_error_message(&format!(
            "L'heure de fin précède ta prise de service (**{}**). Réessaie dans un instant.",
            format_time(*start, offset)
        )),
        ShiftError::Persistence(_) => {
            format_error_message("Impossible d'enregistrer les données. Préviens un administrateur.")
        }
    }
}

pub fn format_total_line(name: &str, total_hours: f64) -> String {
    format!("- **{}** : {}", name, format_hours(total_hours))
}

pub fn format_active_line(name: &str, since: chrono::DateTime<chrono::Utc>, offset: FixedOffset) -> String {
    format!("- {} → En service depuis **{}**", name, format_time(since, offset))
}

pub fn format_user_status(record: Option<&UserShiftRecord>, offset: FixedOffset) -> String {
    let Some(record) = record else {
        return "Aucun service enregistré pour le moment.".to_string();
    };

    let mut status = String::new();
    match record.current_start {
        Some(since) => status.push_str(&format!(
            "🟢 En service depuis **{}**\n",
            format_time(since, offset)
        )),
        None => status.push_str("🔴 Hors service\n"),
    }

    status.push_str(&format!(
        "🕒 Total : **{}** sur {} service(s)",
        format_hours(record.total),
        record.sessions.len()
    ));

    if let Some(last) = record.sessions.last() {
        status.push_str(&format!(
            "\n📅 Dernier service : {} → {} ({})",
            format_datetime(last.start, offset),
            format_time(last.end, offset),
            format_hours(last.hours())
        ));
    }

    status
}

pub fn create_help_embed(prefix: &str) -> serenity::CreateEmbed {
    let lines = [
        format!("`{}service` → Prendre ou finir un service (avec boutons)", prefix),
        format!("`{}total` → Voir les heures totales par utilisateur", prefix),
        format!("`{}info` → Voir qui est en service actuellement", prefix),
        format!("`{}status` → Voir ton propre état et ton total", prefix),
        format!("`{}clear` → Réinitialise les heures de tout le monde (admin)", prefix),
        format!("`{}help` → Affiche ce message", prefix),
    ];

    serenity::CreateEmbed::new()
        .title("📘 Commandes disponibles")
        .description(lines.join("\n"))
        .color(COLOR_HELP)
}

pub fn create_panel_embed() -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("🕒 Pointeuse")
        .description("Clique sur un des boutons ci-dessous selon ton action.")
        .color(COLOR_PANEL)
}

pub fn create_list_embed(title: &str, lines: &[String], empty: &str, color: u32) -> serenity::CreateEmbed {
    let description = if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    };

    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(color)
        .timestamp(chrono::Utc::now())
}

pub fn create_status_embed(username: &str, record: Option<&UserShiftRecord>, offset: FixedOffset) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("📊 Mon service")
        .description(format_user_status(record, offset))
        .color(COLOR_ACTIVE)
        .author(serenity::CreateEmbedAuthor::new(username))
        .timestamp(chrono::Utc::now())
}
