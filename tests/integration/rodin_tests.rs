//! Rodin queue API integration tests.

use veloxi_models::TaskId;
use veloxi_rodin::{GenerationJobClient, RodinClient};

/// Test that an unknown request id polls as not-ready rather than fatal.
#[tokio::test]
#[ignore = "requires FAL_KEY"]
async fn test_unknown_request_is_not_ready() {
    dotenvy::dotenv().ok();

    let client = RodinClient::from_env().expect("Failed to create Rodin client");
    let err = client
        .result(&TaskId::from("00000000-0000-0000-0000-000000000000"))
        .await
        .expect_err("Unknown request should not resolve");

    assert!(err.is_not_ready(), "got unexpected error kind: {err:?}");
}
