pub mod commands;
pub mod handlers;
pub mod interactions;

use crate::config::Config;
use crate::database::{self, Backend, ShiftStore};
use crate::tracker::ShiftTracker;
use anyhow::Result;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

#[derive(Clone)]
pub struct Data {
    /// One lock around validate + mutate + persist for every action
    pub tracker: Arc<Mutex<ShiftTracker<Backend>>>,
    pub config: Config,
}

pub async fn create_bot(config: Config) -> Result<serenity::Client> {
    let backend = database::open_backend(&config).await?;
    let store = ShiftStore::load(backend).await?;

    let data = Data {
        tracker: Arc::new(Mutex::new(ShiftTracker::new(store))),
        config: config.clone(),
    };

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::help::help(),
                commands::shift::service(),
                commands::shift::status(),
                commands::reports::total(),
                commands::reports::info(),
                commands::admin::clear(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                ignore_bots: true,
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    Ok(client)
}

/// Username for a stored user id, or a mention when the platform can't resolve it.
pub async fn display_name(ctx: &serenity::Context, user_id: &str) -> String {
    let Some(id) = user_id.parse::<u64>().ok().filter(|id| *id != 0) else {
        return user_id.to_string();
    };

    match serenity::UserId::new(id).to_user(ctx).await {
        Ok(user) => user.name,
        Err(e) => {
            tracing::debug!("Could not resolve user {}: {:?}", user_id, e);
            format!("<@{}>", id)
        }
    }
}
