//! Discord REST client.
//!
//! Declares the agenda slash commands for one application/guild pair via
//! `PUT /applications/{application}/guilds/{guild}/commands`, which replaces
//! the guild's command set in a single call.

use agendabot_config::DiscordSettings;
use agendabot_core::command::{CommandRegistrar, CommandSpec, OptionKind, OptionSpec};
use agendabot_core::error::ChannelError;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://discord.com/api/v10";

/// Discord application command types.
const CHAT_INPUT: u8 = 1;
/// Discord option types.
const STRING_OPTION: u8 = 3;

/// Discord channel configuration.
#[derive(Clone)]
pub struct DiscordConfig {
    /// Bot token from the Discord Developer Portal.
    pub bot_token: Option<String>,
    /// Application the commands belong to.
    pub application_id: String,
    /// Guild the commands are scoped to.
    pub guild_id: String,
}

impl DiscordConfig {
    pub fn from_settings(settings: &DiscordSettings) -> Self {
        Self {
            bot_token: settings.bot_token.clone(),
            application_id: settings.application_id.clone(),
            guild_id: settings.guild_id.clone(),
        }
    }
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("bot_token", &"[REDACTED]")
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

/// A slash command in Discord's wire format.
#[derive(Debug, Serialize)]
struct ApplicationCommand<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<ApplicationCommandOption<'a>>,
}

#[derive(Debug, Serialize)]
struct ApplicationCommandOption<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: u8,
    required: bool,
}

impl<'a> From<&'a OptionSpec> for ApplicationCommandOption<'a> {
    fn from(spec: &'a OptionSpec) -> Self {
        Self {
            name: &spec.name,
            description: &spec.description,
            kind: match spec.kind {
                OptionKind::String => STRING_OPTION,
            },
            required: spec.required,
        }
    }
}

impl<'a> From<&'a CommandSpec> for ApplicationCommand<'a> {
    fn from(spec: &'a CommandSpec) -> Self {
        Self {
            name: &spec.name,
            description: &spec.description,
            kind: CHAT_INPUT,
            options: spec.options.iter().map(Into::into).collect(),
        }
    }
}

/// Request body for a bulk overwrite of the guild's commands.
pub fn command_payload(commands: &[CommandSpec]) -> serde_json::Value {
    let commands: Vec<ApplicationCommand<'_>> = commands.iter().map(Into::into).collect();
    serde_json::to_value(commands).unwrap_or_default()
}

/// Discord REST client.
pub struct DiscordClient {
    config: DiscordConfig,
    base_url: String,
    client: reqwest::Client,
}

impl DiscordClient {
    pub fn new(config: DiscordConfig) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ChannelError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            base_url: DEFAULT_BASE_URL.into(),
            client,
        })
    }

    /// Use a different API root (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn commands_url(&self) -> String {
        format!(
            "{}/applications/{}/guilds/{}/commands",
            self.base_url, self.config.application_id, self.config.guild_id
        )
    }
}

#[async_trait]
impl CommandRegistrar for DiscordClient {
    fn name(&self) -> &str {
        "discord"
    }

    async fn register(&self, commands: &[CommandSpec]) -> Result<(), ChannelError> {
        let token = self
            .config
            .bot_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ChannelError::NotConfigured("Discord bot token is not set".into()))?;

        let url = self.commands_url();
        debug!(url = %url, commands = commands.len(), "PUT application commands");

        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("Bot {token}"))
            .json(&command_payload(commands))
            .send()
            .await
            .map_err(|e| ChannelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(ChannelError::RegistrationFailed {
                status: status.as_u16(),
                reason,
            });
        }
        Ok(())
    }
}
