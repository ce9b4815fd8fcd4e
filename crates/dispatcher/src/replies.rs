//! Reply texts sent back to the chat.

use agendabot_core::error::{CommandError, DateError};

pub fn added(subject: &str, description: &str, date_text: &str) -> String {
    format!("Devoir ajouté pour la matière **{subject}** : {description} à rendre pour le {date_text}")
}

pub fn removed(subject: &str, description: &str) -> String {
    format!("Le devoir **{description}** pour la matière **{subject}** a été supprimé.")
}

pub fn assignment_not_found(subject: &str, description: &str) -> String {
    format!("Aucun devoir **{description}** trouvé pour la matière **{subject}**.")
}

pub fn subject_not_found(subject: &str) -> String {
    format!("Aucune matière **{subject}** trouvée dans l'agenda.")
}

pub fn invalid_date(date_text: &str, error: &DateError) -> String {
    format!("Date invalide **{date_text}** ({error}) : utilisez le format jj/mm/aaaa.")
}

pub fn invalid_command(error: &CommandError) -> String {
    format!("Commande invalide : {error}")
}

pub fn save_failed() -> String {
    "Impossible d'enregistrer l'agenda, réessayez plus tard.".to_string()
}

/// Longest message content Discord accepts, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Room kept free below [`MESSAGE_LIMIT`] for the code fences and the
/// hidden-rows footer.
const TRIM_RESERVE: usize = 80;

/// Wrap the agenda table in a code block so it renders monospaced.
pub fn code_block(table: &str) -> String {
    format!("```\n{table}```")
}

/// Like [`code_block`], but keeps the header and as many leading rows as fit
/// in one message, then counts the rows left out.
pub fn trimmed_code_block(table: &str) -> String {
    let budget = MESSAGE_LIMIT - TRIM_RESERVE;
    let mut shown = String::new();
    let mut used = 0;
    let mut hidden = 0;

    for (i, line) in table.lines().enumerate() {
        let len = line.chars().count() + 1;
        // Header and separator always stay.
        if hidden == 0 && (i < 2 || used + len <= budget) {
            shown.push_str(line);
            shown.push('\n');
            used += len;
        } else {
            hidden += 1;
        }
    }

    if hidden == 0 {
        return code_block(&shown);
    }
    format!(
        "{}\n… et {hidden} autre(s) devoir(s) non affiché(s).",
        code_block(&shown)
    )
}
