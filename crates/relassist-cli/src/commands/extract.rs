//! Extract command - run the description extractors on a local file.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::{Value, json};
use tracing::debug;

use relassist_core::extract::{DescriptionExtractor, LabeledValueExtractor, VersionExtractor};

use super::{GlobalArgs, print_json};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Description or issue JSON file, or plain text (stdin if omitted)
    pub input: Option<PathBuf>,

    /// Label preceding the release notes link (defaults to the configured label)
    #[arg(short, long)]
    pub label: Option<String>,
}

/// Description value held by `content`.
///
/// Issue payloads (objects with `fields`) contribute their
/// `fields.description`; other JSON is the description itself; anything
/// that is not JSON is a plain-text description.
fn description_value(content: &str) -> Value {
    match serde_json::from_str::<Value>(content) {
        Ok(value) if value.get("fields").is_some() => value["fields"]["description"].clone(),
        Ok(value) => value,
        Err(_) => Value::String(content.to_string()),
    }
}

pub fn run(args: ExtractArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let content = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let label = match args.label {
        Some(label) => label,
        None => global.load_config()?.release.release_notes_label,
    };
    debug!("Extracting with release notes label {label:?}");

    let description = description_value(&content);
    let release_notes = LabeledValueExtractor::new(label).extract_value(&description);
    let versions = VersionExtractor::new().extract_value(&description);

    print_json(&json!({
        "release_notes": release_notes,
        "versions": versions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_value_from_issue() {
        let content = r#"{"key": "CON-1", "fields": {"description": "Release Information: x"}}"#;
        assert_eq!(description_value(content), json!("Release Information: x"));
    }

    #[test]
    fn test_description_value_from_document() {
        let content = r#"{"type": "doc", "content": []}"#;
        assert_eq!(description_value(content), json!({"type": "doc", "content": []}));
    }

    #[test]
    fn test_description_value_plain_text() {
        assert_eq!(
            description_value("Release Information: https://x.test/notes\n"),
            json!("Release Information: https://x.test/notes\n")
        );
    }
}
