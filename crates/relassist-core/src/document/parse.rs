//! Lenient conversion from raw ADF JSON into the typed tree.

use serde_json::Value;

use super::{Block, Document, Inline, Mark};

fn node_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or("")
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn attr_str(node: &Value, name: &str) -> Option<String> {
    node.get("attrs")
        .and_then(|attrs| attrs.get(name))
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub(super) fn document(value: &Value) -> Document {
    Document {
        blocks: children(value).iter().map(block).collect(),
    }
}

fn block(node: &Value) -> Block {
    match node_type(node) {
        "paragraph" => Block::Paragraph(inlines(node)),
        "heading" => {
            let level = node
                .get("attrs")
                .and_then(|attrs| attrs.get("level"))
                .and_then(Value::as_u64)
                .and_then(|level| u8::try_from(level).ok())
                .unwrap_or(1);
            Block::Heading {
                level,
                content: inlines(node),
            }
        }
        "bulletList" => Block::BulletList(
            children(node)
                .iter()
                .map(|item| children(item).iter().map(block).collect())
                .collect(),
        ),
        "codeBlock" => Block::CodeBlock {
            language: attr_str(node, "language"),
            text: children(node)
                .iter()
                .filter_map(|n| n.get("text").and_then(Value::as_str))
                .collect(),
        },
        other => Block::Other(other.to_string()),
    }
}

fn inlines(node: &Value) -> Vec<Inline> {
    children(node).iter().map(inline).collect()
}

fn inline(node: &Value) -> Inline {
    match node_type(node) {
        "text" => Inline::Text {
            text: node
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            marks: node
                .get("marks")
                .and_then(Value::as_array)
                .map(|marks| marks.iter().map(mark).collect())
                .unwrap_or_default(),
        },
        "hardBreak" => Inline::HardBreak,
        "inlineCard" => Inline::InlineCard {
            url: attr_str(node, "url"),
        },
        other => Inline::Other(other.to_string()),
    }
}

fn mark(node: &Value) -> Mark {
    match Mark::from_type(node_type(node)) {
        Mark::Link { .. } => Mark::Link {
            href: attr_str(node, "href"),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_block_variants() {
        let doc = document(&json!({
            "type": "doc",
            "version": 1,
            "content": [
                {"type": "heading", "attrs": {"level": 3}, "content": [{"type": "text", "text": "Title"}]},
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "item"}]}
                    ]}
                ]},
                {"type": "codeBlock", "attrs": {"language": "bash"}, "content": [{"type": "text", "text": "ls"}]},
                {"type": "rule"}
            ]
        }));

        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 3,
                    content: vec![Inline::text("Title")],
                },
                Block::BulletList(vec![vec![Block::Paragraph(vec![Inline::text("item")])]]),
                Block::CodeBlock {
                    language: Some("bash".to_string()),
                    text: "ls".to_string(),
                },
                Block::Other("rule".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_marks() {
        let doc = document(&json!({
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "25.3.0.20250904-1757", "marks": [
                    {"type": "code"},
                    {"type": "link", "attrs": {"href": "https://example.com"}},
                    {"type": "textColor"}
                ]}
            ]}]
        }));

        assert_eq!(
            doc.blocks[0],
            Block::Paragraph(vec![Inline::Text {
                text: "25.3.0.20250904-1757".to_string(),
                marks: vec![
                    Mark::Code,
                    Mark::Link {
                        href: Some("https://example.com".to_string())
                    },
                    Mark::Other("textColor".to_string()),
                ],
            }])
        );
    }

    #[test]
    fn test_parse_malformed_degrades() {
        // Paragraph without content, text without payload, content not an array.
        let doc = document(&json!({
            "content": [
                {"type": "paragraph"},
                {"type": "paragraph", "content": [{"type": "text"}, 42, {"type": "mention"}]},
                {"type": "paragraph", "content": "oops"}
            ]
        }));

        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph(vec![]),
                Block::Paragraph(vec![
                    Inline::text(""),
                    Inline::Other(String::new()),
                    Inline::Other("mention".to_string()),
                ]),
                Block::Paragraph(vec![]),
            ]
        );

        assert_eq!(document(&json!({"content": {"not": "a list"}})).blocks, vec![]);
        assert_eq!(document(&Value::Null).blocks, vec![]);
    }
}
