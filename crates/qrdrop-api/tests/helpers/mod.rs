#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use std::collections::HashMap;
use std::sync::Arc;

use axum_test::TestServer;
use qrdrop_api::setup::routes::setup_routes;
use qrdrop_api::{AppState, UploadService};
use qrdrop_core::Config;

use fixtures::{TEST_CREDENTIALS, TEST_FOLDER_ID};
use storage::MockStorage;

pub const TEST_UPLOAD_TOKEN: &str = "test-upload-token-0123456789";

/// Test application state
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Environment lookup backed by a fixed set of variables.
pub fn test_lookup(extra: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + Clone {
    let mut vars: HashMap<String, String> = HashMap::from([
        (
            "GOOGLE_SERVICE_ACCOUNT_JSON".to_string(),
            TEST_CREDENTIALS.to_string(),
        ),
        ("DRIVE_FOLDER_ID".to_string(), TEST_FOLDER_ID.to_string()),
    ]);
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    move |key: &str| vars.get(key).cloned()
}

/// App with the upload token set and a recording storage
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[("UPLOAD_TOKEN", TEST_UPLOAD_TOKEN)], MockStorage::new())
}

pub fn setup_test_app_with(vars: &[(&str, &str)], storage: MockStorage) -> TestApp {
    let config = Config::from_lookup(test_lookup(vars)).expect("Invalid test configuration");
    let storage = Arc::new(storage);

    let state = Arc::new(AppState {
        config: config.clone(),
        upload: UploadService::from_config(&config, storage.clone()),
    });
    let app = setup_routes(&config, state).expect("Failed to build routes");

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");
    TestApp { server, storage }
}
