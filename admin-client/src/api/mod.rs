//! Domain API modules
//!
//! Thin endpoint-to-function mappings over `AdminClient`. Each accessor
//! borrows the client, e.g. `client.crm().contacts(None)`.

pub mod calendar;
pub mod crm;
pub mod dashboard;
pub mod heartbeat;
pub mod jobs;
pub mod td;

pub use calendar::{CalendarApi, CalendarEvent, CalendarEventUpdate, NewCalendarEvent};
pub use crm::{
    Company, CompanyInput, Contact, ContactInput, CrmApi, Group, ImportResult, Interaction,
    NewGroup, NewInteraction, NewRelationship, NewReminder, Relationship, Reminder,
};
pub use dashboard::DashboardApi;
pub use heartbeat::{HeartbeatApi, HeartbeatStats, HeartbeatStatus};
pub use jobs::{JobStats, JobsApi, RecentJob};
pub use td::{
    NewTdIssue, TdApi, TdGlobalView, TdHandoff, TdIssue, TdIssueDetail, TdIssueFilter,
    TdIssueUpdate, TdLog, TdProjectIssues, TdStatus, TdTreeNode,
};

use crate::client::AdminClient;

impl AdminClient {
    pub fn heartbeat(&self) -> HeartbeatApi<'_> {
        HeartbeatApi::new(self)
    }

    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    pub fn calendar(&self) -> CalendarApi<'_> {
        CalendarApi::new(self)
    }

    pub fn crm(&self) -> CrmApi<'_> {
        CrmApi::new(self)
    }

    pub fn td(&self) -> TdApi<'_> {
        TdApi::new(self)
    }
}
