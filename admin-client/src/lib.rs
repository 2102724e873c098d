//! Aivena admin API client
//!
//! Typed HTTP client for the assistant's admin API:
//! - `session`: endpoint + bearer token, mirrored into a `KeyValueStore`
//! - `client`: the request executor (headers, auth, error translation)
//! - `api`: heartbeat, jobs, dashboard, calendar, CRM and task endpoints
//!
//! A 401 from any endpoint clears the session and fires the
//! `SessionExpiredHandler` registered on the client.

pub mod api;
pub mod client;
pub mod error;
pub mod query;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use client::{AdminClient, RequestBody, RequestOptions, SessionExpiredHandler};
pub use error::{ClientError, StoreError};
pub use query::Query;
pub use session::{Session, SessionState, ENDPOINT_KEY, TOKEN_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
