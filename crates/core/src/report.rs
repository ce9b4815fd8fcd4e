//! Agenda report: every assignment in one chronological table.
//!
//! ```text
//! Matière       Devoirs                        Date
//! -------------------------------------------------------------------
//! Math          Problem Set                    01/05/2025 (J-3)
//! History       Read Ch.3                      10/05/2025 (J-12)
//! ```

use chrono::NaiveDate;
use std::fmt;

use crate::agenda::Agenda;
use crate::date::DueDate;

const SUBJECT_WIDTH: usize = 13;
const DESCRIPTION_WIDTH: usize = 30;
const SEPARATOR_WIDTH: usize = 67;

const SUBJECT_HEADER: &str = "Matière";
const DESCRIPTION_HEADER: &str = "Devoirs";
const DATE_HEADER: &str = "Date";
const TODAY_LABEL: &str = "Aujourd'hui";

/// One flattened agenda line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow<'a> {
    pub subject: &'a str,
    pub description: &'a str,
    pub date: DueDate,
}

/// Position of a due date relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    /// Signed day count: positive ahead, negative overdue.
    Offset(i64),
}

impl RelativeDay {
    pub fn between(date: DueDate, today: NaiveDate) -> Self {
        match date.days_from(today) {
            0 => Self::Today,
            days => Self::Offset(days),
        }
    }
}

impl fmt::Display for RelativeDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str(TODAY_LABEL),
            // Countdown style: J-3 is three days ahead, J+2 two days overdue.
            Self::Offset(days) if *days > 0 => write!(f, "J-{days}"),
            Self::Offset(days) => write!(f, "J+{}", days.unsigned_abs()),
        }
    }
}

/// Flatten the agenda and sort it by due date.
///
/// The sort is stable: rows sharing a date stay in subject order, then
/// ledger order.
pub fn rows(agenda: &Agenda) -> Vec<ReportRow<'_>> {
    let mut rows: Vec<ReportRow<'_>> = agenda
        .iter()
        .flat_map(|(subject, ledger)| {
            ledger.iter().map(move |a| ReportRow {
                subject,
                description: &a.description,
                date: a.date,
            })
        })
        .collect();
    rows.sort_by_key(|row| row.date);
    rows
}

/// Render the agenda as a fixed-column text table.
///
/// Columns are padded, never truncated. An empty agenda renders the header
/// and separator only.
pub fn render(agenda: &Agenda, today: NaiveDate) -> String {
    let mut out = format!(
        "{SUBJECT_HEADER:<SUBJECT_WIDTH$} {DESCRIPTION_HEADER:<DESCRIPTION_WIDTH$} {DATE_HEADER}\n"
    );
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');

    for row in rows(agenda) {
        let label = RelativeDay::between(row.date, today);
        out.push_str(&format!(
            "{:<SUBJECT_WIDTH$} {:<DESCRIPTION_WIDTH$} {} ({label})\n",
            row.subject,
            row.description,
            row.date.to_display(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::Assignment;
    use crate::date::normalize;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn agenda_of(entries: &[(&str, &str, &str)]) -> Agenda {
        let mut agenda = Agenda::new();
        for (subject, description, date) in entries {
            agenda.add(*subject, Assignment::new(*description, normalize(date).unwrap()));
        }
        agenda
    }

    #[test]
    fn rows_are_sorted_by_date_regardless_of_insertion() {
        let agenda = agenda_of(&[
            ("Physics", "Lab report", "10/01/2025"),
            ("Art", "Sketch", "25/12/2024"),
            ("Math", "Exercises", "01/03/2025"),
        ]);
        let dates: Vec<String> = rows(&agenda).iter().map(|r| r.date.canonical()).collect();
        assert_eq!(dates, ["2024-12-25", "2025-01-10", "2025-03-01"]);
    }

    #[test]
    fn ties_keep_flatten_order() {
        let agenda = agenda_of(&[
            ("Math", "Second", "01/05/2025"),
            ("Art", "First", "01/05/2025"),
            ("Math", "Third", "01/05/2025"),
        ]);
        let descriptions: Vec<&str> = rows(&agenda).iter().map(|r| r.description).collect();
        assert_eq!(descriptions, ["First", "Second", "Third"]);
    }

    #[test]
    fn relative_day_labels() {
        let due = |s: &str| normalize(s).unwrap();
        assert_eq!(RelativeDay::between(due("15/06/2025"), today()), RelativeDay::Today);
        assert_eq!(RelativeDay::between(due("20/06/2025"), today()), RelativeDay::Offset(5));
        assert_eq!(RelativeDay::between(due("10/06/2025"), today()), RelativeDay::Offset(-5));

        assert_eq!(RelativeDay::Today.to_string(), "Aujourd'hui");
        assert_eq!(RelativeDay::Offset(5).to_string(), "J-5");
        assert_eq!(RelativeDay::Offset(-5).to_string(), "J+5");
    }

    #[test]
    fn empty_agenda_renders_header_only() {
        let text = render(&Agenda::new(), today());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Matière       Devoirs                        Date");
        assert_eq!(lines[1], "-".repeat(67));
    }

    #[test]
    fn columns_are_padded() {
        let agenda = agenda_of(&[("Math", "Essay", "15/06/2025")]);
        let text = render(&agenda, today());
        let row = text.lines().nth(2).unwrap();
        assert_eq!(
            row,
            format!("{}{}{}", "Math          ", "Essay                          ", "15/06/2025 (Aujourd'hui)")
        );
    }

    #[test]
    fn overlong_values_are_not_truncated() {
        let long_subject = "Computer Science";
        let long_description = "A description that is definitely longer than thirty chars";
        let agenda = agenda_of(&[(long_subject, long_description, "16/06/2025")]);
        let text = render(&agenda, today());
        let row = text.lines().nth(2).unwrap();
        assert_eq!(
            row,
            format!("{long_subject} {long_description} 16/06/2025 (J-1)")
        );
    }
}
