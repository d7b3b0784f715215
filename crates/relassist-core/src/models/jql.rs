//! JQL query building.

/// Minimal JQL builder joining clauses with `AND`.
#[derive(Debug, Clone, Default)]
pub struct JqlQuery {
    clauses: Vec<String>,
    order_by: Option<String>,
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl JqlQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// `field = "value"`
    pub fn eq(mut self, field: &str, value: &str) -> Self {
        self.clauses.push(format!("{field} = {}", quote(value)));
        self
    }

    /// `field ~ "value"` (text search)
    pub fn contains(mut self, field: &str, value: &str) -> Self {
        self.clauses.push(format!("{field} ~ {}", quote(value)));
        self
    }

    /// Add an `eq` clause only when `value` is present.
    pub fn eq_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    /// Newest first.
    pub fn order_by_created_desc(mut self) -> Self {
        self.order_by = Some("created DESC".to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut jql = self.clauses.join(" AND ");
        if let Some(order) = &self.order_by {
            if !jql.is_empty() {
                jql.push(' ');
            }
            jql.push_str("ORDER BY ");
            jql.push_str(order);
        }
        jql
    }
}

/// Query for version support tickets of `issue_type` in `status`.
pub fn version_support_jql(project: &str, issue_type: &str, status: &str) -> String {
    JqlQuery::new()
        .eq("project", project)
        .eq("type", issue_type)
        .eq("status", status)
        .order_by_created_desc()
        .build()
}

/// Query for release sign-off tickets.
pub fn signoff_jql(
    project: &str,
    summary: &str,
    fix_version: Option<&str>,
    status: Option<&str>,
) -> String {
    JqlQuery::new()
        .eq("project", project)
        .contains("summary", summary)
        .eq_opt("fixVersion", fix_version)
        .eq_opt("status", status)
        .order_by_created_desc()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_support_jql() {
        assert_eq!(
            version_support_jql("CON", "Version Support", "To Triage"),
            r#"project = "CON" AND type = "Version Support" AND status = "To Triage" ORDER BY created DESC"#
        );
    }

    #[test]
    fn test_signoff_jql() {
        assert_eq!(
            signoff_jql("CON", "Release sign-off", Some("25.3.3"), None),
            r#"project = "CON" AND summary ~ "Release sign-off" AND fixVersion = "25.3.3" ORDER BY created DESC"#
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(
            JqlQuery::new().eq("summary", r#"say "hi""#).build(),
            r#"summary = "say \"hi\"""#
        );
    }

    #[test]
    fn test_order_only() {
        assert_eq!(JqlQuery::new().order_by_created_desc().build(), "ORDER BY created DESC");
    }
}
