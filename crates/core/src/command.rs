//! Chat command schema and parsed commands.
//!
//! The schema is what gets declared to the chat platform at startup; a
//! [`Command`] is one invocation of it with its arguments extracted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ChannelError, CommandError};

pub const ADD: &str = "add";
pub const REMOVE: &str = "remove";
pub const LIST: &str = "list";

pub const OPT_SUBJECT: &str = "subject";
pub const OPT_DESCRIPTION: &str = "description";
pub const OPT_DATE: &str = "date";

/// Argument type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    String,
}

/// One named argument of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    pub name: String,
    pub description: String,
    pub kind: OptionKind,
    pub required: bool,
}

impl OptionSpec {
    fn required_string(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: OptionKind::String,
            required: true,
        }
    }
}

/// A command as declared to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
}

/// The three agenda commands.
pub fn schema() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: ADD.into(),
            description: "Ajouter un devoir à l'agenda".into(),
            options: vec![
                OptionSpec::required_string(OPT_SUBJECT, "Matière"),
                OptionSpec::required_string(OPT_DESCRIPTION, "Devoir à faire"),
                OptionSpec::required_string(OPT_DATE, "Date de rendu (jj/mm/aaaa)"),
            ],
        },
        CommandSpec {
            name: REMOVE.into(),
            description: "Supprimer un devoir de l'agenda".into(),
            options: vec![
                OptionSpec::required_string(OPT_SUBJECT, "Matière"),
                OptionSpec::required_string(OPT_DESCRIPTION, "Devoir à supprimer"),
            ],
        },
        CommandSpec {
            name: LIST.into(),
            description: "Afficher l'agenda des devoirs".into(),
            options: vec![],
        },
    ]
}

/// A parsed agenda command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        subject: String,
        description: String,
        date: String,
    },
    Remove {
        subject: String,
        description: String,
    },
    List,
}

impl Command {
    /// Build a command from its name and named string options.
    pub fn from_options(
        name: &str,
        options: &HashMap<String, String>,
    ) -> Result<Self, CommandError> {
        let take = |option: &str| {
            options
                .get(option)
                .cloned()
                .ok_or_else(|| CommandError::MissingOption {
                    command: name.to_string(),
                    option: option.to_string(),
                })
        };

        match name {
            ADD => Ok(Self::Add {
                subject: take(OPT_SUBJECT)?,
                description: take(OPT_DESCRIPTION)?,
                date: take(OPT_DATE)?,
            }),
            REMOVE => Ok(Self::Remove {
                subject: take(OPT_SUBJECT)?,
                description: take(OPT_DESCRIPTION)?,
            }),
            LIST => Ok(Self::List),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => ADD,
            Self::Remove { .. } => REMOVE,
            Self::List => LIST,
        }
    }
}

/// A platform command registry the schema is declared to.
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Registry name for logs (e.g. "discord").
    fn name(&self) -> &str;

    /// Replace the registered commands with `commands`.
    async fn register(&self, commands: &[CommandSpec]) -> Result<(), ChannelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn schema_shape_is_stable() {
        let schema = schema();
        let names: Vec<&str> = schema.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["add", "remove", "list"]);

        let add_opts: Vec<&str> = schema[0].options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(add_opts, ["subject", "description", "date"]);
        assert!(schema[0].options.iter().all(|o| o.required && o.kind == OptionKind::String));

        let remove_opts: Vec<&str> = schema[1].options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(remove_opts, ["subject", "description"]);
        assert!(schema[1].options.iter().all(|o| o.required));

        assert!(schema[2].options.is_empty());
    }

    #[test]
    fn parses_add() {
        let cmd = Command::from_options(
            "add",
            &options(&[("subject", "Math"), ("description", "Essay"), ("date", "01/05/2025")]),
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                subject: "Math".into(),
                description: "Essay".into(),
                date: "01/05/2025".into(),
            }
        );
        assert_eq!(cmd.name(), "add");
    }

    #[test]
    fn parses_remove_and_list() {
        let cmd = Command::from_options(
            "remove",
            &options(&[("subject", "Math"), ("description", "Essay")]),
        )
        .unwrap();
        assert!(matches!(cmd, Command::Remove { .. }));
        assert_eq!(Command::from_options("list", &HashMap::new()).unwrap(), Command::List);
    }

    #[test]
    fn missing_option_is_reported() {
        let err = Command::from_options("add", &options(&[("subject", "Math")])).unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingOption {
                command: "add".into(),
                option: "description".into(),
            }
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_eq!(
            Command::from_options("agenda", &HashMap::new()),
            Err(CommandError::Unknown("agenda".into()))
        );
    }
}
