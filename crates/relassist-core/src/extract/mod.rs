//! Field extraction from ticket descriptions.
//!
//! Two strategies are provided:
//! - [`labeled`]: find a literal label in the concatenated description text
//!   and take the first token after it (release-notes URLs).
//! - [`positional`]: within a paragraph, pair `code`-marked version runs
//!   with the nearest preceding label run (sign-off version fields).
//!
//! Extraction never fails; unrecognised or malformed input yields absent
//! fields.

pub mod labeled;
pub mod positional;

pub use labeled::{LabeledValueExtractor, RELEASE_NOTES_LABEL, extract_labeled_value, extract_release_notes};
pub use positional::{VersionExtractor, VersionFields, VersionLabel, extract_positional_fields};

use serde_json::Value;

use crate::document::Description;

/// Trait for description field extractors.
pub trait DescriptionExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract from an already interpreted description.
    fn extract(&self, description: &Description) -> Self::Output;

    /// Extract from a raw `description` field as returned by Jira.
    fn extract_value(&self, value: &Value) -> Self::Output
    where
        Self::Output: Default,
    {
        Description::from_value(value)
            .map(|description| self.extract(&description))
            .unwrap_or_default()
    }
}
