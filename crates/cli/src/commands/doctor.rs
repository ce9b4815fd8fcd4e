//! `agendabot doctor` — Diagnose configuration and storage.

use agendabot_channels::InteractionVerifier;
use agendabot_config::AppConfig;
use agendabot_core::storage::AgendaStorage;
use agendabot_store::JsonFileStorage;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Agendabot Doctor");
    println!("===================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found at {}", config_path.display());
    } else {
        println!("  ⚠️  No config file at {}, using defaults", config_path.display());
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  Fix the config file before running other checks.");
            return Ok(());
        }
    };

    if config.discord.bot_token.as_deref().is_some_and(|t| !t.is_empty()) {
        println!("  ✅ Bot token configured");
    } else {
        println!("  ❌ No bot token, set AGENDABOT_TOKEN");
        issues += 1;
    }

    match config.discord.public_key.as_deref() {
        Some(key) => match InteractionVerifier::from_hex(key) {
            Ok(_) => println!("  ✅ Public key valid"),
            Err(e) => {
                println!("  ❌ Public key invalid: {e}");
                issues += 1;
            }
        },
        None => {
            println!("  ❌ No public key, set AGENDABOT_PUBLIC_KEY");
            issues += 1;
        }
    }

    let storage = JsonFileStorage::new(config.storage.path.clone());
    match storage.load() {
        Ok(agenda) => println!(
            "  ✅ Agenda readable: {} subject(s), {} assignment(s)",
            agenda.subject_count(),
            agenda.len()
        ),
        Err(e) => {
            println!("  ❌ Agenda unreadable: {e}");
            issues += 1;
        }
    }

    println!(
        "  ℹ️  Commands target application {} in guild {}",
        config.discord.application_id, config.discord.guild_id
    );

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
