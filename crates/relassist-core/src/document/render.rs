//! Rendering the typed tree back to ADF JSON for Jira writes.
//!
//! Only nodes built by this crate render faithfully. `Other` nodes keep
//! just their type, so fetched descriptions are edited as raw JSON (see
//! `signoff::append_to_description`).

use serde_json::{Map, Value, json};

use super::{Block, Document, Inline, Mark};

pub(super) fn document(doc: &Document) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": doc.blocks.iter().map(block).collect::<Vec<_>>(),
    })
}

fn block(block: &Block) -> Value {
    match block {
        Block::Paragraph(content) => json!({
            "type": "paragraph",
            "content": content.iter().map(inline).collect::<Vec<_>>(),
        }),
        Block::Heading { level, content } => json!({
            "type": "heading",
            "attrs": {"level": level},
            "content": content.iter().map(inline).collect::<Vec<_>>(),
        }),
        Block::BulletList(items) => json!({
            "type": "bulletList",
            "content": items
                .iter()
                .map(|item| json!({
                    "type": "listItem",
                    "content": item.iter().map(self::block).collect::<Vec<_>>(),
                }))
                .collect::<Vec<_>>(),
        }),
        Block::CodeBlock { language, text } => {
            // Text nodes must not be empty
            let mut node = if text.is_empty() {
                json!({"type": "codeBlock"})
            } else {
                json!({"type": "codeBlock", "content": [{"type": "text", "text": text}]})
            };
            if let Some(language) = language {
                node["attrs"] = json!({"language": language});
            }
            node
        }
        Block::Other(kind) => json!({"type": kind}),
    }
}

fn inline(node: &Inline) -> Value {
    match node {
        Inline::Text { text, marks } => {
            let mut out = Map::new();
            out.insert("type".into(), json!("text"));
            out.insert("text".into(), json!(text));
            if !marks.is_empty() {
                out.insert("marks".into(), marks.iter().map(mark).collect());
            }
            Value::Object(out)
        }
        Inline::HardBreak => json!({"type": "hardBreak"}),
        Inline::InlineCard { url } => json!({"type": "inlineCard", "attrs": {"url": url}}),
        Inline::Other(kind) => json!({"type": kind}),
    }
}

fn mark(mark: &Mark) -> Value {
    match mark {
        Mark::Link { href: Some(href) } => json!({"type": "link", "attrs": {"href": href}}),
        other => json!({"type": other.type_name()}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_comment_body() {
        let doc = Document::from_text("Test comment");
        assert_eq!(
            doc.to_value(),
            json!({
                "type": "doc",
                "version": 1,
                "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Test comment"}]}]
            })
        );
    }

    #[test]
    fn test_render_reparses_to_same_tree() {
        let doc = Document::new()
            .with_paragraph(vec![
                Inline::text("Previous SDK Version: "),
                Inline::code("25.3.0.20250804-1138"),
                Inline::HardBreak,
                Inline::card("https://tasktop.atlassian.net/browse/CON-1"),
            ]);

        assert_eq!(Document::from_value(&doc.to_value()), doc);
    }

    #[test]
    fn test_render_empty_code_block() {
        let doc = Document {
            blocks: vec![Block::CodeBlock { language: None, text: String::new() }],
        };
        assert_eq!(doc.to_value()["content"][0], json!({"type": "codeBlock"}));
    }
}
