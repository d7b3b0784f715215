//! Data models: configuration, Jira payloads and JQL.

pub mod config;
pub mod jql;
pub mod ticket;
