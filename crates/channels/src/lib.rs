//! Discord adapter for Agendabot.
//!
//! - **interaction** — signed inbound interactions and their replies
//! - **discord** — REST client that registers the slash commands

pub mod discord;
pub mod interaction;

pub use discord::{DiscordClient, DiscordConfig};
pub use interaction::{Interaction, InteractionResponse, InteractionVerifier};
