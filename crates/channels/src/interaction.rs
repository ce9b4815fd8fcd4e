//! Discord interaction payloads and request verification.
//!
//! Discord delivers slash commands as signed HTTP POSTs. Each request
//! carries `X-Signature-Ed25519` and `X-Signature-Timestamp`; the signature
//! covers `timestamp || body` and is checked against the application's
//! public key before anything else is read.

use agendabot_core::command::Command;
use agendabot_core::error::{ChannelError, CommandError};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Interaction types we handle.
pub const PING: u8 = 1;
pub const APPLICATION_COMMAND: u8 = 2;

/// Response types we send.
const PONG: u8 = 1;
const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

/// Checks interaction signatures against the application public key.
#[derive(Debug, Clone)]
pub struct InteractionVerifier {
    key: VerifyingKey,
}

impl InteractionVerifier {
    /// Build from the hex-encoded public key shown in the developer portal.
    pub fn from_hex(public_key: &str) -> Result<Self, ChannelError> {
        let bytes: [u8; 32] = hex::decode(public_key.trim())
            .map_err(|e| ChannelError::NotConfigured(format!("public key is not hex: {e}")))?
            .try_into()
            .map_err(|_| ChannelError::NotConfigured("public key must be 32 bytes".into()))?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| ChannelError::NotConfigured(format!("invalid public key: {e}")))?;
        Ok(Self { key })
    }

    pub fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> Result<(), ChannelError> {
        let bytes: [u8; 64] = hex::decode(signature)
            .map_err(|_| ChannelError::InvalidSignature("signature is not hex".into()))?
            .try_into()
            .map_err(|_| ChannelError::InvalidSignature("signature must be 64 bytes".into()))?;
        let signature = Signature::from_bytes(&bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify(&message, &signature)
            .map_err(|_| ChannelError::InvalidSignature("signature mismatch".into()))
    }
}

/// An inbound interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,

    #[serde(default)]
    pub data: Option<CommandData>,

    /// Absent in direct messages.
    #[serde(default)]
    pub guild_id: Option<String>,

    #[serde(default)]
    pub member: Option<Member>,

    /// Set instead of `member` in direct messages.
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,

    #[serde(default)]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,

    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub username: Option<String>,
}

impl Interaction {
    pub fn parse(body: &[u8]) -> Result<Self, ChannelError> {
        serde_json::from_slice(body).map_err(|e| ChannelError::InvalidPayload(e.to_string()))
    }

    /// The invoking user, in a guild or a DM.
    pub fn user(&self) -> Option<&User> {
        self.member.as_ref().map(|m| &m.user).or(self.user.as_ref())
    }
}

impl CommandData {
    /// Convert to an agenda command. Non-string option values are
    /// stringified.
    pub fn to_command(&self) -> Result<Command, CommandError> {
        let options: HashMap<String, String> = self
            .options
            .iter()
            .map(|o| {
                let value = match &o.value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (o.name.clone(), value)
            })
            .collect();
        Command::from_options(&self.name, &options)
    }
}

/// The synchronous reply to an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseData {
    pub content: String,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: PONG,
            data: None,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(ResponseData {
                content: content.into(),
            }),
        }
    }
}
