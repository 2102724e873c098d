//! Task tracker (`td`)
//!
//! Hierarchical issues with a review workflow. Status transitions happen on
//! the server; this module only names them.

use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::client::AdminClient;
use crate::error::ClientError;
use crate::query::Query;

const BASE: &str = "/api/td";

/// Issue status as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TdStatus {
    Open,
    InProgress,
    InReview,
    Blocked,
    Closed,
    /// Any status this client does not know yet
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for TdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TdStatus::Open => write!(f, "open"),
            TdStatus::InProgress => write!(f, "in_progress"),
            TdStatus::InReview => write!(f, "in_review"),
            TdStatus::Blocked => write!(f, "blocked"),
            TdStatus::Closed => write!(f, "closed"),
            TdStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl TdStatus {
    /// Wire value for a status filter; `Unknown` filters nothing
    fn filter_value(self) -> Option<String> {
        match self {
            TdStatus::Unknown => None,
            status => Some(status.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdIssue {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TdStatus,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub labels: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Progress note attached to an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdLog {
    pub id: i64,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub created_at: String,
}

/// Snapshot left for whoever picks the issue up next
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TdHandoff {
    #[serde(default)]
    pub done: Vec<String>,
    #[serde(default)]
    pub remaining: Vec<String>,
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub uncertain: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdIssueDetail {
    #[serde(flatten)]
    pub issue: TdIssue,
    #[serde(default)]
    pub logs: Vec<TdLog>,
    #[serde(default)]
    pub handoffs: Vec<TdHandoff>,
    #[serde(default)]
    pub children: Vec<TdIssue>,
}

/// Node of the dependency tree rooted at one issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdTreeNode {
    #[serde(flatten)]
    pub issue: TdIssue,
    #[serde(default)]
    pub children: Vec<TdTreeNode>,
    #[serde(default)]
    pub blocked_by: Vec<String>,
}

/// Open work across every tracked project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TdGlobalView {
    #[serde(default)]
    pub projects: Vec<TdProjectIssues>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdProjectIssues {
    pub project: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub issues: Vec<TdIssue>,
}

/// Filters for `issues`
#[derive(Debug, Clone, Default)]
pub struct TdIssueFilter {
    pub status: Option<TdStatus>,
    pub kind: Option<String>,
    pub priority: Option<String>,
    pub parent: Option<String>,
    pub limit: Option<i64>,
    /// Include closed issues
    pub all: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTdIssue {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TdIssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
}

#[derive(Serialize)]
struct LogRequest<'a> {
    message: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
}

#[derive(Serialize)]
struct ApproveRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

#[derive(Serialize)]
struct RejectRequest<'a> {
    reason: &'a str,
}

pub struct TdApi<'a> {
    client: &'a AdminClient,
}

impl<'a> TdApi<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    fn issue_path(id: &str) -> String {
        format!("{}/{}", BASE, encode(id))
    }

    fn action_path(id: &str, action: &str) -> String {
        format!("{}/{}/{}", BASE, encode(id), action)
    }

    pub async fn issues(&self, filter: &TdIssueFilter) -> Result<Vec<TdIssue>, ClientError> {
        let status = filter.status.and_then(TdStatus::filter_value);
        let path = Query::new()
            .str("status", status.as_deref())
            .str("type", filter.kind.as_deref())
            .str("priority", filter.priority.as_deref())
            .str("parent", filter.parent.as_deref())
            .num("limit", filter.limit)
            .flag("all", filter.all)
            .apply(&format!("{}/", BASE));
        self.client.get(&path).await
    }

    /// One issue with its logs, handoffs and direct children
    pub async fn issue(&self, id: &str) -> Result<TdIssueDetail, ClientError> {
        self.client.get(&Self::issue_path(id)).await
    }

    pub async fn create(&self, issue: &NewTdIssue) -> Result<TdIssue, ClientError> {
        self.client.post(&format!("{}/", BASE), issue).await
    }

    pub async fn update(&self, id: &str, update: &TdIssueUpdate) -> Result<TdIssue, ClientError> {
        self.client.patch(&Self::issue_path(id), update).await
    }

    pub async fn delete(&self, id: &str) -> Result<serde_json::Value, ClientError> {
        self.client.delete(&Self::issue_path(id)).await
    }

    /// Append a progress note
    pub async fn log(
        &self,
        id: &str,
        message: &str,
        kind: Option<&str>,
    ) -> Result<TdLog, ClientError> {
        self.client
            .post(&Self::action_path(id, "log"), &LogRequest { message, kind })
            .await
    }

    /// Submit for review
    pub async fn review(&self, id: &str) -> Result<TdIssue, ClientError> {
        self.client
            .post(&Self::action_path(id, "review"), &serde_json::json!({}))
            .await
    }

    pub async fn approve(&self, id: &str, comment: Option<&str>) -> Result<TdIssue, ClientError> {
        self.client
            .post(&Self::action_path(id, "approve"), &ApproveRequest { comment })
            .await
    }

    /// Send back to work with a reason
    pub async fn reject(&self, id: &str, reason: &str) -> Result<TdIssue, ClientError> {
        self.client
            .post(&Self::action_path(id, "reject"), &RejectRequest { reason })
            .await
    }

    pub async fn handoff(&self, id: &str, handoff: &TdHandoff) -> Result<TdHandoff, ClientError> {
        self.client
            .post(&Self::action_path(id, "handoff"), handoff)
            .await
    }

    /// Dependency tree rooted at `id`
    pub async fn tree(&self, id: &str) -> Result<TdTreeNode, ClientError> {
        self.client.get(&Self::action_path(id, "tree")).await
    }

    /// Issues across all projects, optionally narrowed to one status
    pub async fn global(&self, status: Option<TdStatus>) -> Result<TdGlobalView, ClientError> {
        let status = status.and_then(TdStatus::filter_value);
        let path = Query::new()
            .str("status", status.as_deref())
            .apply(&format!("{}/global", BASE));
        self.client.get(&path).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_utils::connected_client;

    fn issue_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": "Wire up calendar sync",
            "description": null,
            "status": status,
            "type": "task",
            "priority": "P1",
            "parent_id": null,
            "created_at": "2026-02-10T08:00:00Z",
            "updated_at": "2026-02-12T08:00:00Z"
        })
    }

    #[test]
    fn status_display_matches_wire_format() {
        assert_eq!(TdStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            serde_json::to_value(TdStatus::InReview).unwrap(),
            json!("in_review")
        );
    }

    #[test]
    fn unknown_status_deserializes() {
        let status: TdStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, TdStatus::Unknown);
    }

    #[tokio::test]
    async fn issues_serializes_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/td/"))
            .and(query_param("status", "in_review"))
            .and(query_param("type", "bug"))
            .and(query_param("limit", "5"))
            .and(query_param("all", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([issue_json("td-1", "in_review")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let filter = TdIssueFilter {
            status: Some(TdStatus::InReview),
            kind: Some("bug".to_string()),
            limit: Some(5),
            all: true,
            ..Default::default()
        };
        let issues = client.td().issues(&filter).await.unwrap();
        assert_eq!(issues[0].status, TdStatus::InReview);
        assert_eq!(issues[0].kind.as_deref(), Some("task"));
    }

    #[tokio::test]
    async fn unknown_status_is_not_sent_as_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/td/"))
            .respond_with(|req: &wiremock::Request| {
                assert_eq!(req.url.query(), None);
                ResponseTemplate::new(200).set_body_json(json!([]))
            })
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/td/global"))
            .respond_with(|req: &wiremock::Request| {
                assert_eq!(req.url.query(), None);
                ResponseTemplate::new(200).set_body_json(json!({"projects": []}))
            })
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let filter = TdIssueFilter {
            status: Some(TdStatus::Unknown),
            ..Default::default()
        };
        assert!(client.td().issues(&filter).await.unwrap().is_empty());
        let view = client.td().global(Some(TdStatus::Unknown)).await.unwrap();
        assert!(view.projects.is_empty());
    }

    #[tokio::test]
    async fn issue_detail_flattens_issue_fields() {
        let server = MockServer::start().await;
        let mut detail = issue_json("td-1", "in_progress");
        detail["logs"] = json!([{
            "id": 1, "message": "Started", "type": "progress", "created_at": "2026-02-11"
        }]);
        detail["handoffs"] = json!([{"done": ["schema"], "remaining": ["ui"]}]);
        detail["children"] = json!([issue_json("td-2", "open")]);

        Mock::given(method("GET"))
            .and(path("/api/td/td-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let detail = client.td().issue("td-1").await.unwrap();
        assert_eq!(detail.issue.id, "td-1");
        assert_eq!(detail.logs[0].message, "Started");
        assert_eq!(detail.handoffs[0].remaining, vec!["ui".to_string()]);
        assert!(detail.handoffs[0].decisions.is_empty());
        assert_eq!(detail.children[0].status, TdStatus::Open);
    }

    #[tokio::test]
    async fn transitions_post_to_action_paths() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/td/td-1/review"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(issue_json("td-1", "in_review")),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/td/td-1/approve"))
            .and(body_json(json!({"comment": "lgtm"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(issue_json("td-1", "closed")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/td/td-2/reject"))
            .and(body_json(json!({"reason": "missing tests"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(issue_json("td-2", "in_progress")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let td = client.td();
        assert_eq!(td.review("td-1").await.unwrap().status, TdStatus::InReview);
        assert_eq!(
            td.approve("td-1", Some("lgtm")).await.unwrap().status,
            TdStatus::Closed
        );
        assert_eq!(
            td.reject("td-2", "missing tests").await.unwrap().status,
            TdStatus::InProgress
        );
    }

    #[tokio::test]
    async fn log_and_handoff_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/td/td-1/log"))
            .and(body_json(json!({"message": "halfway", "type": "progress"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "message": "halfway", "type": "progress", "created_at": "2026-02-12"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/td/td-1/handoff"))
            .and(body_json(json!({
                "done": ["parser"],
                "remaining": ["feed"],
                "decisions": [],
                "uncertain": ["timezone"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "done": ["parser"],
                "remaining": ["feed"],
                "decisions": [],
                "uncertain": ["timezone"],
                "created_at": "2026-02-12"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let log = client
            .td()
            .log("td-1", "halfway", Some("progress"))
            .await
            .unwrap();
        assert_eq!(log.id, 3);

        let handoff = TdHandoff {
            done: vec!["parser".to_string()],
            remaining: vec!["feed".to_string()],
            decisions: vec![],
            uncertain: vec!["timezone".to_string()],
            created_at: None,
        };
        let saved = client.td().handoff("td-1", &handoff).await.unwrap();
        assert_eq!(saved.created_at.as_deref(), Some("2026-02-12"));
    }

    #[tokio::test]
    async fn tree_is_recursive() {
        let server = MockServer::start().await;
        let mut root = issue_json("td-1", "open");
        let mut child = issue_json("td-2", "blocked");
        child["blocked_by"] = json!(["td-3"]);
        root["children"] = json!([child]);

        Mock::given(method("GET"))
            .and(path("/api/td/td-1/tree"))
            .respond_with(ResponseTemplate::new(200).set_body_json(root))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let tree = client.td().tree("td-1").await.unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].issue.status, TdStatus::Blocked);
        assert_eq!(tree.children[0].blocked_by, vec!["td-3".to_string()]);
        assert!(tree.children[0].children.is_empty());
    }

    #[tokio::test]
    async fn global_groups_by_project() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/td/global"))
            .and(query_param("status", "open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projects": [{"project": "aivena", "issues": [issue_json("td-1", "open")]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let view = client.td().global(Some(TdStatus::Open)).await.unwrap();
        assert_eq!(view.projects[0].project, "aivena");
        assert_eq!(view.projects[0].issues.len(), 1);
    }

    #[tokio::test]
    async fn ids_are_path_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/td/a%20b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        client.td().delete("a b").await.unwrap();
    }
}
