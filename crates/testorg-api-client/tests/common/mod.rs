#![allow(dead_code)]

use httpmock::MockServer;
use serde_json::{
    Value,
    json,
};
use testorg_api_client::{
    BaseClientOptions,
    TestOrgApiClient,
};

pub async fn start_mock_server() -> MockServer {
    MockServer::start_async().await
}

/// Client pointed at `server` with default options
pub fn client_for(server: &MockServer) -> TestOrgApiClient {
    client_with(server, BaseClientOptions::new())
}

pub fn client_with(server: &MockServer, options: BaseClientOptions) -> TestOrgApiClient {
    TestOrgApiClient::new(options.with_base_url(server.base_url()))
        .expect("Failed to create client for mock server")
}

pub fn matrix_json() -> Value {
    json!({
        "id": "tt0133093",
        "title": "The Matrix",
        "rating": 8.7
    })
}
