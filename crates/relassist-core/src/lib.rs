//! Core library for the release assistants.
//!
//! This crate provides:
//! - A typed model of Jira rich-text documents
//! - Field extraction from ticket descriptions (release notes, versions)
//! - Jira payload models and JQL building
//! - Release version arithmetic and commit/Gerrit output parsing

pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod signoff;
pub mod vcs;
pub mod version;

pub use document::{Block, Description, Document, Inline, Mark};
pub use error::{RelassistError, Result, TicketError, VersionError};
pub use extract::{
    DescriptionExtractor, LabeledValueExtractor, VersionExtractor, VersionFields,
    extract_labeled_value, extract_positional_fields, extract_release_notes,
};
pub use models::config::AssistantConfig;
pub use models::ticket::{Issue, SignoffTicket, TicketOutput};
pub use version::ReleaseVersion;
