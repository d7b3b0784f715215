//! Jira Cloud REST v3 client.

use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use relassist_core::document::Document;
use relassist_core::models::config::JiraConfig;
use relassist_core::models::ticket::{Issue, SearchResponse, TransitionsResponse};

/// Site URL and basic-auth pair. Treated as opaque strings.
#[derive(Debug, Clone)]
pub struct JiraCredentials {
    pub base_url: String,
    pub user: String,
    pub token: String,
}

impl JiraCredentials {
    /// Combine command-line/environment values with the config file.
    ///
    /// Explicit values win over the file; all three must end up present.
    pub fn resolve(
        url: Option<&str>,
        user: Option<&str>,
        token: Option<&str>,
        config: &JiraConfig,
    ) -> anyhow::Result<Self> {
        let pick = |explicit: Option<&str>, configured: &Option<String>| {
            explicit
                .map(str::to_string)
                .or_else(|| configured.clone())
                .filter(|v| !v.trim().is_empty())
        };

        match (
            pick(url, &config.base_url),
            pick(user, &config.user),
            pick(token, &config.token),
        ) {
            (Some(base_url), Some(user), Some(token)) => Ok(Self {
                base_url: base_url.trim_end_matches('/').to_string(),
                user,
                token,
            }),
            _ => anyhow::bail!("Missing Jira credentials: set JIRA_URL, JIRA_USER and JIRA_TOKEN"),
        }
    }
}

/// Body of a created comment.
#[derive(Debug, Deserialize)]
pub struct CreatedComment {
    pub id: Option<String>,
}

/// Async Jira client bound to one site.
pub struct JiraClient {
    http: Client,
    credentials: JiraCredentials,
}

impl JiraClient {
    pub fn new(credentials: JiraCredentials, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("relassist/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { http, credentials })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/3/{path}", self.credentials.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.credentials.user, Some(&self.credentials.token))
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> anyhow::Result<Response> {
        let response = self
            .authed(builder)
            .send()
            .await
            .with_context(|| format!("Jira request failed: {what}"))?;

        let status = response.status();
        if status.is_success() {
            debug!("{what}: {status}");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Jira request failed: {what}: {status}: {body}")
    }

    /// Run a JQL search.
    pub async fn search(
        &self,
        jql: &str,
        fields: &str,
        max_results: u32,
    ) -> anyhow::Result<SearchResponse> {
        info!("Searching Jira: {jql}");
        let max_results = max_results.to_string();
        let request = self.http.get(self.url("search/jql")).query(&[
            ("jql", jql),
            ("maxResults", max_results.as_str()),
            ("fields", fields),
        ]);

        let response = self.send(request, "search").await?;
        Ok(response.json().await?)
    }

    /// Fetch one issue.
    pub async fn get_issue(&self, key: &str, fields: &str) -> anyhow::Result<Issue> {
        let request = self
            .http
            .get(self.url(&format!("issue/{key}")))
            .query(&[("fields", fields)]);

        let response = self.send(request, &format!("get issue {key}")).await?;
        Ok(response.json().await?)
    }

    /// Add a comment with an ADF body.
    pub async fn add_comment(&self, key: &str, body: &Document) -> anyhow::Result<CreatedComment> {
        let request = self
            .http
            .post(self.url(&format!("issue/{key}/comment")))
            .json(&json!({ "body": body.to_value() }));

        let response = self.send(request, &format!("comment on {key}")).await?;
        Ok(response.json().await?)
    }

    /// Transitions currently available on an issue.
    pub async fn transitions(&self, key: &str) -> anyhow::Result<TransitionsResponse> {
        let request = self.http.get(self.url(&format!("issue/{key}/transitions")));
        let response = self.send(request, &format!("transitions of {key}")).await?;
        Ok(response.json().await?)
    }

    /// Apply a transition by id.
    pub async fn transition(&self, key: &str, transition_id: &str) -> anyhow::Result<()> {
        info!("Transitioning {key} with transition {transition_id}");
        let request = self
            .http
            .post(self.url(&format!("issue/{key}/transitions")))
            .json(&json!({ "transition": { "id": transition_id } }));

        self.send(request, &format!("transition {key}")).await?;
        Ok(())
    }

    /// Replace an issue description with a raw ADF value.
    pub async fn update_description(&self, key: &str, description: &Value) -> anyhow::Result<()> {
        info!("Updating description of {key}");
        let request = self
            .http
            .put(self.url(&format!("issue/{key}")))
            .json(&json!({ "fields": { "description": description } }));

        self.send(request, &format!("update {key}")).await?;
        Ok(())
    }
}
