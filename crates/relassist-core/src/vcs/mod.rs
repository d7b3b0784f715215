//! Version-control helpers: commit log parsing, task-key discovery and
//! Gerrit push conventions.
//!
//! Everything here works on strings; running git is left to the caller.

pub mod commits;
pub mod gerrit;
pub mod patterns;

pub use commits::{Commit, TaskKeyMatcher, parse_log, unique_task_keys};
pub use gerrit::{PushOutcome, commit_message, push_refspec, task_url};
