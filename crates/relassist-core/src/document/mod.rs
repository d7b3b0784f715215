//! Typed model of Jira rich-text documents (Atlassian Document Format).
//!
//! Ticket descriptions and comment bodies arrive as loosely shaped JSON.
//! [`Document::from_value`] turns them into a closed set of block and
//! inline variants; unknown node types are kept as `Other` so traversal
//! never has to inspect attributes at runtime. The same tree is rendered
//! back to JSON when posting comments or appending description blocks.

mod parse;
mod render;

use serde_json::Value;

/// A ticket description: either plain text or a rich document.
#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    /// Plain string description (older issues, or API v2 payloads).
    Plain(String),
    /// Structured ADF document.
    Rich(Document),
}

impl Description {
    /// Interpret a raw `description` field.
    ///
    /// Strings become [`Description::Plain`], objects carrying a `content`
    /// key become [`Description::Rich`]. Anything else (null, numbers,
    /// arrays, objects without `content`) yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Plain(s.clone())),
            Value::Object(map) if map.contains_key("content") => {
                Some(Self::Rich(Document::from_value(value)))
            }
            _ => None,
        }
    }

    /// Text searched by label lookups.
    ///
    /// For rich documents this is every text run of every top-level
    /// paragraph joined without separators.
    pub fn search_text(&self) -> String {
        match self {
            Self::Plain(s) => s.clone(),
            Self::Rich(doc) => doc.paragraph_text(),
        }
    }

    /// The rich document, if this is one.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Rich(doc) => Some(doc),
            Self::Plain(_) => None,
        }
    }
}

/// Root `doc` node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Top-level blocks in document order.
    pub blocks: Vec<Block>,
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    /// Each item holds the blocks of one `listItem`.
    BulletList(Vec<Vec<Block>>),
    CodeBlock { language: Option<String>, text: String },
    /// Any other block type, by its `type` name.
    Other(String),
}

/// Inline node inside a paragraph or heading.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text { text: String, marks: Vec<Mark> },
    HardBreak,
    /// Embedded link card.
    InlineCard { url: Option<String> },
    /// Any other inline type, by its `type` name.
    Other(String),
}

/// Formatting annotation attached to a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    /// Monospace.
    Code,
    Strong,
    Em,
    Link { href: Option<String> },
    Other(String),
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw ADF value. Malformed parts degrade to empty content.
    pub fn from_value(value: &Value) -> Self {
        parse::document(value)
    }

    /// Render as an ADF `doc` value.
    pub fn to_value(&self) -> Value {
        render::document(self)
    }

    /// Document holding one paragraph with a single plain text run.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with_paragraph(vec![Inline::text(text)])
    }

    /// Append a paragraph.
    pub fn with_paragraph(mut self, content: Vec<Inline>) -> Self {
        self.blocks.push(Block::Paragraph(content));
        self
    }

    /// Append all blocks of another document.
    pub fn extend(&mut self, other: Document) {
        self.blocks.extend(other.blocks);
    }

    /// Inline sequences of the top-level paragraphs, in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &[Inline]> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(content) => Some(content.as_slice()),
            _ => None,
        })
    }

    /// Concatenated text of every paragraph text run.
    pub fn paragraph_text(&self) -> String {
        self.paragraphs()
            .flat_map(|content| content.iter())
            .filter_map(Inline::as_text)
            .collect()
    }
}

impl Inline {
    /// Plain text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Text run carrying the `code` mark.
    pub fn code(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            marks: vec![Mark::Code],
        }
    }

    /// Link card pointing at `url`.
    pub fn card(url: impl Into<String>) -> Self {
        Self::InlineCard {
            url: Some(url.into()),
        }
    }

    /// Payload of a text run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Whether this is a text run carrying `mark`.
    pub fn has_mark(&self, mark: &Mark) -> bool {
        match self {
            Self::Text { marks, .. } => marks.contains(mark),
            _ => false,
        }
    }
}

impl Mark {
    /// Map an ADF mark `type` name (without attributes).
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "code" => Self::Code,
            "strong" => Self::Strong,
            "em" => Self::Em,
            "link" => Self::Link { href: None },
            other => Self::Other(other.to_string()),
        }
    }

    /// ADF `type` name.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Code => "code",
            Self::Strong => "strong",
            Self::Em => "em",
            Self::Link { .. } => "link",
            Self::Other(kind) => kind,
        }
    }
}
