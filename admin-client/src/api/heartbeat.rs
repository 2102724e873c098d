//! Heartbeat monitoring

use serde::{Deserialize, Serialize};

use crate::client::AdminClient;
use crate::error::ClientError;

const PATH: &str = "/api/heartbeat";

/// Heartbeat runner status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatStatus {
    pub active: bool,
    pub running: bool,
    pub interval_minutes: u32,
    pub last_check: Option<String>,
    pub last_result: Option<String>,
    pub last_duration: Option<f64>,
    pub stats: HeartbeatStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatStats {
    pub total: u64,
    pub ok: u64,
    pub alerts: u64,
}

#[derive(Serialize)]
struct ActionRequest<'a> {
    action: &'a str,
}

pub struct HeartbeatApi<'a> {
    client: &'a AdminClient,
}

impl<'a> HeartbeatApi<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    pub async fn status(&self) -> Result<HeartbeatStatus, ClientError> {
        self.client.get(PATH).await
    }

    /// Start the periodic heartbeat
    pub async fn start(&self) -> Result<serde_json::Value, ClientError> {
        self.action("start").await
    }

    pub async fn stop(&self) -> Result<serde_json::Value, ClientError> {
        self.action("stop").await
    }

    /// Run one check now, outside the schedule
    pub async fn run(&self) -> Result<serde_json::Value, ClientError> {
        self.action("run").await
    }

    async fn action(&self, action: &str) -> Result<serde_json::Value, ClientError> {
        self.client.post(PATH, &ActionRequest { action }).await
    }
}
