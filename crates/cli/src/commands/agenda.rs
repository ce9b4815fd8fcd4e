//! `agendabot add | remove | list` — Work on the agenda from a terminal.
//!
//! Goes through the same dispatcher as chat commands, so `add` and `remove`
//! print the reply the bot would post. `list` prints the whole table, which
//! chat replies trim to one message.

pub async fn add(
    subject: &str,
    description: &str,
    date: &str,
    ephemeral: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let dispatcher = super::open_dispatcher(&config, ephemeral);
    println!("{}", dispatcher.handle_add(subject, description, date).await);
    Ok(())
}

pub async fn remove(
    subject: &str,
    description: &str,
    ephemeral: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let dispatcher = super::open_dispatcher(&config, ephemeral);
    println!("{}", dispatcher.handle_remove(subject, description).await);
    Ok(())
}

pub async fn list(ephemeral: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let dispatcher = super::open_dispatcher(&config, ephemeral);
    print!("{}", dispatcher.table().await);
    Ok(())
}
