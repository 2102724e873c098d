use serde::Serialize;

use crate::client::AdminClient;
use crate::error::ClientError;

#[derive(Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

pub struct DashboardApi<'a> {
    client: &'a AdminClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Widget layout and settings, shape owned by the server
    pub async fn config(&self) -> Result<serde_json::Value, ClientError> {
        self.client.get("/api/dashboard/config").await
    }

    /// Send a free-form prompt to the assistant
    pub async fn prompt(&self, prompt: &str) -> Result<serde_json::Value, ClientError> {
        self.client
            .post("/api/dashboard/prompt", &PromptRequest { prompt })
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::test_utils::connected_client;

    #[tokio::test]
    async fn prompt_posts_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dashboard/prompt"))
            .and(body_json(json!({"prompt": "summarise my day"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "busy"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let reply = client.dashboard().prompt("summarise my day").await.unwrap();
        assert_eq!(reply["reply"], "busy");
    }

    #[tokio::test]
    async fn config_is_returned_untyped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"widgets": ["jobs"]})))
            .mount(&server)
            .await;

        let client = connected_client(&server);
        let config = client.dashboard().config().await.unwrap();
        assert_eq!(config["widgets"][0], "jobs");
    }
}
