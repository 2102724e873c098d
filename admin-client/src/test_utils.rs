//! Test helpers shared by the executor and API module tests

use std::sync::Arc;

use wiremock::MockServer;

use crate::client::AdminClient;
use crate::session::Session;

/// Client pointed at `server` with token `sk-test`
pub fn connected_client(server: &MockServer) -> AdminClient {
    let session = Arc::new(Session::in_memory());
    session
        .set_endpoint(&format!("{}/", server.uri()))
        .expect("in-memory store never fails");
    session
        .set_token("sk-test")
        .expect("in-memory store never fails");
    AdminClient::new(session)
}
