//! `agendabot serve` — Register the slash commands, then serve interactions.

use std::sync::Arc;

use agendabot_channels::{DiscordClient, DiscordConfig};
use agendabot_dispatcher::register_schema;

pub async fn run(
    port_override: Option<u16>,
    ephemeral: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config()?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    let dispatcher = Arc::new(super::open_dispatcher(&config, ephemeral));

    let client = DiscordClient::new(DiscordConfig::from_settings(&config.discord))?;
    register_schema(&client).await;

    println!("📚 Agendabot");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    if ephemeral {
        println!("   Storage:   in memory");
    } else {
        println!("   Storage:   {}", config.storage.path.display());
    }

    agendabot_gateway::start(config, dispatcher).await?;

    Ok(())
}
