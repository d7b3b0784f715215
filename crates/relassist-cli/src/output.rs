//! Output formatting for ticket listings.

use std::fmt::Write as _;

use relassist_core::models::ticket::{SignoffTicket, TicketOutput, parse_timestamp};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Jira timestamp shortened for humans; unparsable input is shown as is.
fn short_date(created: &str) -> String {
    parse_timestamp(created)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| created.to_string())
}

/// Render version support tickets.
pub fn format_tickets(tickets: &[TicketOutput], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "tickets": tickets
        }))?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["id", "summary", "status", "assignee", "created", "release_notes"])?;
            for t in tickets {
                wtr.write_record([
                    t.id.as_str(),
                    t.summary.as_str(),
                    t.status.as_str(),
                    t.assignee.as_deref().unwrap_or_default(),
                    t.created.as_str(),
                    t.release_notes.as_deref().unwrap_or_default(),
                ])?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for t in tickets {
                writeln!(output, "{} [{}] {}", t.id, t.status, t.summary)?;
                writeln!(output, "  Assignee: {}", t.assignee.as_deref().unwrap_or("unassigned"))?;
                writeln!(output, "  Created: {}", short_date(&t.created))?;
                if let Some(notes) = &t.release_notes {
                    writeln!(output, "  Release notes: {notes}")?;
                }
            }
            Ok(output)
        }
    }
}

/// Render release sign-off tickets.
pub fn format_signoffs(tickets: &[SignoffTicket], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "success": true,
            "total": tickets.len(),
            "tickets": tickets,
        }))?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record([
                "key",
                "summary",
                "status",
                "fix_versions",
                "connector_version",
                "sdk_version",
                "platform_version",
            ])?;
            for t in tickets {
                let fix_versions = t.fix_versions.join(";");
                wtr.write_record([
                    t.key.as_str(),
                    t.summary.as_str(),
                    t.status.as_str(),
                    fix_versions.as_str(),
                    t.versions.current_connector_version.as_deref().unwrap_or_default(),
                    t.versions.current_sdk_version.as_deref().unwrap_or_default(),
                    t.versions.current_platform_version.as_deref().unwrap_or_default(),
                ])?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for t in tickets {
                writeln!(output, "{} [{}] {}", t.key, t.status, t.summary)?;
                if !t.created.is_empty() {
                    writeln!(output, "  Created: {}", short_date(&t.created))?;
                }
                if !t.fix_versions.is_empty() {
                    writeln!(output, "  Fix versions: {}", t.fix_versions.join(", "))?;
                }
                let versions = [
                    ("Connector", &t.versions.current_connector_version),
                    ("SDK", &t.versions.current_sdk_version),
                    ("Platform", &t.versions.current_platform_version),
                ];
                for (name, value) in versions {
                    if let Some(value) = value {
                        writeln!(output, "  {name}: {value}")?;
                    }
                }
            }
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relassist_core::VersionFields;

    fn ticket() -> TicketOutput {
        TicketOutput {
            id: "CON-1".to_string(),
            summary: "Support 25.3".to_string(),
            status: "To Triage".to_string(),
            assignee: None,
            created: "2024-01-15T10:30:00.000+0000".to_string(),
            release_notes: Some("https://example.com/r".to_string()),
        }
    }

    #[test]
    fn test_tickets_csv() {
        let csv = format_tickets(&[ticket()], OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,summary,status,assignee,created,release_notes"));
        assert_eq!(
            lines.next(),
            Some("CON-1,Support 25.3,To Triage,,2024-01-15T10:30:00.000+0000,https://example.com/r")
        );
    }

    #[test]
    fn test_tickets_json() {
        let json = format_tickets(&[ticket()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tickets"][0]["releaseNotes"], "https://example.com/r");
    }

    #[test]
    fn test_tickets_text() {
        let text = format_tickets(&[ticket()], OutputFormat::Text).unwrap();
        assert!(text.contains("CON-1 [To Triage] Support 25.3"));
        assert!(text.contains("Assignee: unassigned"));
        assert!(text.contains("Created: 2024-01-15 10:30"));
    }

    #[test]
    fn test_short_date_passthrough() {
        assert_eq!(short_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_signoffs_text() {
        let signoff = SignoffTicket {
            key: "CON-25671".to_string(),
            summary: "Release sign-off for 25.3.4".to_string(),
            status: "Accepted".to_string(),
            created: String::new(),
            assignee: None,
            reporter: None,
            fix_versions: vec!["25.3.4".to_string()],
            versions: VersionFields {
                current_sdk_version: Some("25.3.0.20250804-1138".to_string()),
                ..Default::default()
            },
        };

        let text = format_signoffs(&[signoff], OutputFormat::Text).unwrap();
        assert!(text.contains("CON-25671 [Accepted] Release sign-off for 25.3.4"));
        assert!(text.contains("Fix versions: 25.3.4"));
        assert!(text.contains("SDK: 25.3.0.20250804-1138"));
        assert!(!text.contains("Connector:"));
    }
}
