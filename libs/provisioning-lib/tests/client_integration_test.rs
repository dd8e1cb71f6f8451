//! Integration tests for the provisioning client against a mock HTTP server.
//!
//! The real debt collection API is never needed here; wiremock stands in for
//! it so the status handling and payload shapes can be exercised exactly.

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use provisioning_lib::{
    ProvisioningClient, ProvisioningConfig, ProvisioningError, UserRecord, WebhookEvent,
};

fn client_for(server: &MockServer) -> ProvisioningClient {
    let config = ProvisioningConfig::new(format!("{}/api", server.uri()), "test-api-key");
    ProvisioningClient::new(config).expect("client should build")
}

fn sample_records() -> Vec<UserRecord> {
    vec![
        UserRecord {
            keycloak_id: "test-user-1-uuid".to_string(),
            email: "admin@medical-group-1.com".to_string(),
            first_name: Some("Dr. John".to_string()),
            last_name: Some("Doe".to_string()),
            engagemx_client_id: "medical_group_1".to_string(),
            is_active: true,
        },
        UserRecord {
            keycloak_id: "test-user-2-uuid".to_string(),
            email: "manager@hospital-2.com".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Smith".to_string()),
            engagemx_client_id: "hospital_2".to_string(),
            is_active: true,
        },
    ]
}

#[tokio::test]
async fn test_check_health_decodes_status_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/webhooks/status"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webhook_system": "active",
            "supported_events": ["user.created", "user.updated"],
            "timestamp": "2024-01-01T00:00:00Z",
            "version": "1.0.0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server).check_health().await.unwrap();

    assert_eq!(status.webhook_system.as_deref(), Some("active"));
    assert_eq!(status.supported_events.len(), 2);
    assert_eq!(status.version.as_deref(), Some("1.0.0"));
}

#[tokio::test]
async fn test_check_health_maps_non_200_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/webhooks/status"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).check_health().await.unwrap_err();

    match err {
        ProvisioningError::UnexpectedStatus { status, body } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_check_health_undecodable_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/webhooks/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).check_health().await.unwrap_err();

    assert!(matches!(err, ProvisioningError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_provision_users_reports_success_count() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/provisioning/users/bulk"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success_count": 2,
            "error_count": 0,
            "users": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .provision_users(&sample_records())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 2);
    assert!(!outcome.has_errors());
}

#[tokio::test]
async fn test_provision_users_partial_failure_is_still_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/provisioning/users/bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success_count": 1,
            "error_count": 1,
            "errors": ["User manager@hospital-2.com: duplicate email"]
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .provision_users(&sample_records())
        .await
        .unwrap();

    assert_eq!(outcome.success_count, 1);
    assert!(outcome.has_errors());
    assert_eq!(outcome.errors.len(), 1);
}

#[tokio::test]
async fn test_provision_users_sends_empty_batch() {
    let server = MockServer::start().await;

    // No local short-circuit: an empty slice must still reach the API as [].
    Mock::given(method("POST"))
        .and(path("/api/provisioning/users/bulk"))
        .and(body_json(json!([])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success_count": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server).provision_users(&[]).await.unwrap();

    assert_eq!(outcome.success_count, 0);
}

#[tokio::test]
async fn test_provision_users_non_200_carries_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/provisioning/users/bulk"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("Maximum 100 users can be provisioned at once"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .provision_users(&sample_records())
        .await
        .unwrap_err();

    match err {
        ProvisioningError::UnexpectedStatus { status, body } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("Maximum 100 users"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_provision_single_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/provisioning/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7c9a1c6e-0f64-4aee-8f7b-0d9a45cbe111",
            "keycloak_id": "test-user-1-uuid",
            "email": "admin@medical-group-1.com",
            "first_name": "Dr. John",
            "last_name": "Doe",
            "engagemx_client_id": "medical_group_1",
            "is_active": true,
            "action": "created",
            "message": "User successfully created"
        })))
        .mount(&server)
        .await;

    let provisioned = client_for(&server)
        .provision_user(&sample_records()[0])
        .await
        .unwrap();

    assert_eq!(provisioned.keycloak_id, "test-user-1-uuid");
    assert_eq!(
        provisioned.action,
        provisioning_lib::ProvisionAction::Created
    );
}

#[tokio::test]
async fn test_deactivate_user_hits_user_path() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/provisioning/users/test-user-1-uuid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User successfully deactivated",
            "action": "deactivated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .deactivate_user("test-user-1-uuid")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deactivate_unknown_user_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/provisioning/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .deactivate_user("missing")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProvisioningError::UnexpectedStatus {
            status: StatusCode::NOT_FOUND,
            ..
        }
    ));
}

#[tokio::test]
async fn test_send_webhook_event_echoes_event_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/webhooks/events"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Webhook processed successfully",
            "event_id": "test-2024-01-01T00:00:00"
        })))
        .mount(&server)
        .await;

    let event = WebhookEvent::sample_user_created();
    let ack = client_for(&server).send_webhook_event(&event).await.unwrap();

    assert!(ack.success);
    assert_eq!(ack.event_id, "test-2024-01-01T00:00:00");
}

#[tokio::test]
async fn test_connection_refused_is_classified() {
    // Grab a port that nothing is listening on anymore.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let config = ProvisioningConfig::new(format!("{uri}/api"), "test-api-key");
    let client = ProvisioningClient::new(config).unwrap();

    let err = client.check_health().await.unwrap_err();

    assert!(
        matches!(err, ProvisioningError::ConnectionFailed(_)),
        "expected ConnectionFailed, got {err:?}"
    );
}
