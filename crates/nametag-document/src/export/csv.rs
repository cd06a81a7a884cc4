// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Attendee CSV.
//
// Two columns, header first:
//
//   "<subject>",
//   ,"<name 1>"
//   ,"<name 2>"
//
// Rows are joined with `\n`, no trailing newline. Values are wrapped in
// double quotes verbatim; embedded quotes are not escaped.

use chrono::NaiveDate;
use nametag_core::types::ExportPayload;

/// Subject line for an export made on `date`, e.g. `New event: Jan 01`.
pub fn export_subject(date: NaiveDate) -> String {
    format!("New event: {}", date.format("%b %d"))
}

/// Render the CSV body for `names` under a `subject` header row.
pub fn csv_content(subject: &str, names: &[String]) -> String {
    std::iter::once(format!("\"{subject}\","))
        .chain(names.iter().map(|name| format!(",\"{name}\"")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The human-readable summary used as mail body or share message.
pub fn summary_body(subject: &str, names: &[String], recipient: &str) -> String {
    format!(
        "To: {recipient}\nSubject: {subject}\n\nAttendees:\n{}",
        names.join("\n")
    )
}

/// Assemble everything a transport needs for one export.
pub fn build_export(subject: &str, names: &[String], recipient: &str) -> ExportPayload {
    ExportPayload {
        subject: subject.to_string(),
        body: summary_body(subject, names, recipient),
        csv_content: csv_content(subject, names),
        recipient: recipient.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn csv_has_subject_header_then_one_row_per_name() {
        let payload = build_export("New event: Jan 01", &names(&["Alice", "Bob"]), "x@y.com");
        assert_eq!(payload.csv_content, "\"New event: Jan 01\",\n,\"Alice\"\n,\"Bob\"");

        let rows: Vec<&str> = payload.csv_content.split('\n').collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "\"New event: Jan 01\",");
        assert!(rows[1..].iter().all(|r| r.starts_with(",\"") && r.ends_with('"')));
    }

    #[test]
    fn empty_list_is_header_only() {
        assert_eq!(csv_content("Meetup", &[]), "\"Meetup\",");
    }

    #[test]
    fn order_and_duplicates_are_kept() {
        let csv = csv_content("S", &names(&["Bob", "Alice", "Bob"]));
        assert_eq!(csv, "\"S\",\n,\"Bob\"\n,\"Alice\"\n,\"Bob\"");
    }

    #[test]
    fn body_lists_recipient_subject_and_names() {
        let payload = build_export("New event: Mar 07", &names(&["Ada", "Linus"]), "desk@example.org");
        assert_eq!(
            payload.body,
            "To: desk@example.org\nSubject: New event: Mar 07\n\nAttendees:\nAda\nLinus"
        );
        assert_eq!(payload.recipient, "desk@example.org");
        assert_eq!(payload.subject, "New event: Mar 07");
    }

    #[test]
    fn subject_uses_short_month_and_padded_day() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(export_subject(date), "New event: Jan 01");
    }
}
