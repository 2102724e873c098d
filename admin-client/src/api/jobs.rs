//! Job telemetry

use serde::{Deserialize, Serialize};

use crate::client::AdminClient;
use crate::error::ClientError;
use crate::query::Query;

/// Default page size for `recent`
pub const DEFAULT_RECENT_LIMIT: i64 = 20;

/// Aggregate counters over all jobs (or one channel)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStats {
    pub total: u64,
    pub errors: u64,
    pub tokens: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentJob {
    pub id: i64,
    pub channel: String,
    pub status: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost: f64,
    pub duration_ms: u64,
    pub created_at: String,
}

pub struct JobsApi<'a> {
    client: &'a AdminClient,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self, channel: Option<&str>) -> Result<JobStats, ClientError> {
        let path = Query::new().str("channel", channel).apply("/api/jobs/stats");
        self.client.get(&path).await
    }

    /// Most recent jobs, newest first (server order)
    pub async fn recent(&self, limit: Option<i64>) -> Result<Vec<RecentJob>, ClientError> {
        let path = Query::new()
            .num("limit", Some(limit.unwrap_or(DEFAULT_RECENT_LIMIT)))
            .apply("/api/jobs/recent");
        self.client.get(&path).await
    }

    /// Per-model usage breakdown
    pub async fn models(&self) -> Result<serde_json::Value, ClientError> {
        self.client.get("/api/jobs/models").await
    }

    /// Per-tool usage breakdown
    pub async fn tools(&self) -> Result<serde_json::Value, ClientError> {
        self.client.get("/api/jobs/tools").await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::test_utils::connected_client;

    #[tokio::test]
    async fn stats_filters_by_channel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/stats"))
            .and(query_param("channel", "telegram"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 42, "errors": 2, "tokens": 12000, "cost": 0.37
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let stats = client.jobs().stats(Some("telegram")).await.unwrap();
        assert_eq!(stats.total, 42);
        assert_eq!(stats.errors, 2);
    }

    #[tokio::test]
    async fn stats_without_channel_sends_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/stats"))
            .respond_with(|req: &wiremock::Request| {
                assert_eq!(req.url.query(), None);
                ResponseTemplate::new(200)
                    .set_body_json(json!({"total": 0, "errors": 0, "tokens": 0, "cost": 0.0}))
            })
            .mount(&server)
            .await;

        let client = connected_client(&server);
        client.jobs().stats(None).await.unwrap();
    }

    #[tokio::test]
    async fn recent_defaults_to_twenty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/recent"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 7,
                "channel": "cron",
                "status": "ok",
                "model": "claude",
                "input_tokens": 100,
                "output_tokens": 50,
                "cost": 0.01,
                "duration_ms": 900,
                "created_at": "2026-02-13 08:00:00"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let jobs = client.jobs().recent(None).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].channel, "cron");
        assert_eq!(jobs[0].duration_ms, 900);
    }

    #[tokio::test]
    async fn models_and_tools_are_plain_gets() {
        let server = MockServer::start().await;
        for p in ["/api/jobs/models", "/api/jobs/tools"] {
            Mock::given(method("GET"))
                .and(path(p))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = connected_client(&server);
        assert_eq!(client.jobs().models().await.unwrap(), json!([]));
        assert_eq!(client.jobs().tools().await.unwrap(), json!([]));
    }
}
