//! Personal CRM: contacts, companies, interactions, reminders,
//! relationships and groups, plus CSV import/export of contacts.

use serde::{Deserialize, Serialize};

use crate::client::{AdminClient, RequestOptions};
use crate::error::ClientError;
use crate::query::Query;

const BASE: &str = "/api/crm";

/// Content type used for contact import
pub const CSV_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_id: Option<i64>,
    pub notes: Option<String>,
    /// Comma-separated, as stored by the server
    pub tags: Option<String>,
    pub birthday: Option<String>,
}

/// Contact fields for create and update; unset fields are not sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A logged touchpoint with a contact (call, meeting, message...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: i64,
    pub contact_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: Option<String>,
    pub happened_at: String,
    #[serde(default)]
    pub contact_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewInteraction {
    pub contact_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Defaults to now on the server when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub happened_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub contact_id: Option<i64>,
    pub message: String,
    pub due_date: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub contact_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReminder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    pub message: String,
    pub due_date: String,
}

/// Directed link between two contacts ("spouse", "colleague", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: i64,
    pub contact_id: i64,
    pub related_contact_id: i64,
    pub relationship_type: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub related_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRelationship {
    pub contact_id: i64,
    pub related_contact_id: i64,
    pub relationship_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outcome of a CSV contact import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Serialize)]
struct GroupMemberRequest {
    contact_id: i64,
}

pub struct CrmApi<'a> {
    client: &'a AdminClient,
}

impl<'a> CrmApi<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    // --- Contacts ---

    /// All contacts, or those matching the search term `q`
    pub async fn contacts(&self, q: Option<&str>) -> Result<Vec<Contact>, ClientError> {
        let path = Query::new()
            .str("q", q)
            .apply(&format!("{}/contacts", BASE));
        self.client.get(&path).await
    }

    pub async fn contact(&self, id: i64) -> Result<Contact, ClientError> {
        self.client
            .get(&format!("{}/contacts/{}", BASE, id))
            .await
    }

    pub async fn create_contact(&self, contact: &ContactInput) -> Result<Contact, ClientError> {
        self.client
            .post(&format!("{}/contacts", BASE), contact)
            .await
    }

    pub async fn update_contact(
        &self,
        id: i64,
        contact: &ContactInput,
    ) -> Result<Contact, ClientError> {
        self.client
            .patch(&format!("{}/contacts/{}", BASE, id), contact)
            .await
    }

    pub async fn delete_contact(&self, id: i64) -> Result<serde_json::Value, ClientError> {
        self.client
            .delete(&format!("{}/contacts/{}", BASE, id))
            .await
    }

    /// All contacts as CSV text
    pub async fn export_csv(&self) -> Result<String, ClientError> {
        self.client
            .request_text(&format!("{}/contacts/export", BASE), RequestOptions::get())
            .await
    }

    /// Upload contacts as CSV text
    pub async fn import_csv(&self, csv: &str) -> Result<ImportResult, ClientError> {
        let options = RequestOptions::post().text(CSV_CONTENT_TYPE, csv);
        self.client
            .request(&format!("{}/contacts/import", BASE), options)
            .await
    }

    // --- Companies ---

    pub async fn companies(&self) -> Result<Vec<Company>, ClientError> {
        self.client.get(&format!("{}/companies", BASE)).await
    }

    pub async fn create_company(&self, company: &CompanyInput) -> Result<Company, ClientError> {
        self.client
            .post(&format!("{}/companies", BASE), company)
            .await
    }

    pub async fn update_company(
        &self,
        id: i64,
        company: &CompanyInput,
    ) -> Result<Company, ClientError> {
        self.client
            .patch(&format!("{}/companies/{}", BASE, id), company)
            .await
    }

    pub async fn delete_company(&self, id: i64) -> Result<serde_json::Value, ClientError> {
        self.client
            .delete(&format!("{}/companies/{}", BASE, id))
            .await
    }

    // --- Interactions ---

    pub async fn interactions(
        &self,
        contact_id: Option<i64>,
    ) -> Result<Vec<Interaction>, ClientError> {
        let path = Query::new()
            .num("contact_id", contact_id)
            .apply(&format!("{}/interactions", BASE));
        self.client.get(&path).await
    }

    pub async fn log_interaction(
        &self,
        interaction: &NewInteraction,
    ) -> Result<Interaction, ClientError> {
        self.client
            .post(&format!("{}/interactions", BASE), interaction)
            .await
    }

    pub async fn delete_interaction(&self, id: i64) -> Result<serde_json::Value, ClientError> {
        self.client
            .delete(&format!("{}/interactions/{}", BASE, id))
            .await
    }

    // --- Reminders ---

    /// Open reminders due soon
    pub async fn upcoming(&self) -> Result<Vec<Reminder>, ClientError> {
        self.client
            .get(&format!("{}/reminders/upcoming", BASE))
            .await
    }

    /// All reminders; completed ones only when `include_done`
    pub async fn reminders(&self, include_done: bool) -> Result<Vec<Reminder>, ClientError> {
        let path = Query::new()
            .flag("all", include_done)
            .apply(&format!("{}/reminders", BASE));
        self.client.get(&path).await
    }

    pub async fn create_reminder(&self, reminder: &NewReminder) -> Result<Reminder, ClientError> {
        self.client
            .post(&format!("{}/reminders", BASE), reminder)
            .await
    }

    pub async fn complete_reminder(&self, id: i64) -> Result<Reminder, ClientError> {
        self.client
            .post(
                &format!("{}/reminders/{}/complete", BASE, id),
                &serde_json::json!({}),
            )
            .await
    }

    pub async fn delete_reminder(&self, id: i64) -> Result<serde_json::Value, ClientError> {
        self.client
            .delete(&format!("{}/reminders/{}", BASE, id))
            .await
    }

    // --- Relationships ---

    pub async fn relationships(&self, contact_id: i64) -> Result<Vec<Relationship>, ClientError> {
        self.client
            .get(&format!("{}/contacts/{}/relationships", BASE, contact_id))
            .await
    }

    pub async fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> Result<Relationship, ClientError> {
        self.client
            .post(&format!("{}/relationships", BASE), relationship)
            .await
    }

    pub async fn delete_relationship(&self, id: i64) -> Result<serde_json::Value, ClientError> {
        self.client
            .delete(&format!("{}/relationships/{}", BASE, id))
            .await
    }

    // --- Groups ---

    pub async fn groups(&self) -> Result<Vec<Group>, ClientError> {
        self.client.get(&format!("{}/groups", BASE)).await
    }

    pub async fn create_group(&self, group: &NewGroup) -> Result<Group, ClientError> {
        self.client.post(&format!("{}/groups", BASE), group).await
    }

    pub async fn delete_group(&self, id: i64) -> Result<serde_json::Value, ClientError> {
        self.client
            .delete(&format!("{}/groups/{}", BASE, id))
            .await
    }

    pub async fn add_to_group(
        &self,
        group_id: i64,
        contact_id: i64,
    ) -> Result<serde_json::Value, ClientError> {
        self.client
            .post(
                &format!("{}/groups/{}/members", BASE, group_id),
                &GroupMemberRequest { contact_id },
            )
            .await
    }

    pub async fn remove_from_group(
        &self,
        group_id: i64,
        contact_id: i64,
    ) -> Result<serde_json::Value, ClientError> {
        self.client
            .delete(&format!("{}/groups/{}/members/{}", BASE, group_id, contact_id))
            .await
    }
}
