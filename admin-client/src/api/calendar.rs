//! Calendar events

use serde::{Deserialize, Serialize};

use crate::client::{AdminClient, RequestOptions};
use crate::error::ClientError;
use crate::query::Query;

const PATH: &str = "/api/calendar";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    pub recurrence: Option<String>,
}

/// Data needed to create an event
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCalendarEvent {
    pub title: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

/// Partial update; only the set fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarEventUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

#[derive(Serialize)]
struct IdRequest {
    id: i64,
}

pub struct CalendarApi<'a> {
    client: &'a AdminClient,
}

impl<'a> CalendarApi<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Events between `start` and `end` (ISO dates or timestamps)
    pub async fn list(&self, start: &str, end: &str) -> Result<Vec<CalendarEvent>, ClientError> {
        let path = Query::new()
            .str("start", Some(start))
            .str("end", Some(end))
            .apply(PATH);
        self.client.get(&path).await
    }

    pub async fn create(&self, event: &NewCalendarEvent) -> Result<CalendarEvent, ClientError> {
        self.client.post(PATH, event).await
    }

    pub async fn update(&self, update: &CalendarEventUpdate) -> Result<CalendarEvent, ClientError> {
        self.client.patch(PATH, update).await
    }

    /// The id travels in the body, not the path
    pub async fn delete(&self, id: i64) -> Result<serde_json::Value, ClientError> {
        let options = RequestOptions::delete().json(&IdRequest { id })?;
        self.client.request(PATH, options).await
    }
}
