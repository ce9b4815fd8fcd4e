//! `agendabot register` — Declare the slash commands and exit.

use agendabot_channels::{DiscordClient, DiscordConfig};
use agendabot_dispatcher::register_schema;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let client = DiscordClient::new(DiscordConfig::from_settings(&config.discord))?;

    if !register_schema(&client).await {
        return Err(format!(
            "Command registration failed for guild {}",
            config.discord.guild_id
        )
        .into());
    }

    println!(
        "✅ Commands registered for guild {}",
        config.discord.guild_id
    );
    Ok(())
}
