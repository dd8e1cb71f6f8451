use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User payload accepted by the provisioning endpoints.
///
/// Field names match the wire format of the debt collection API. Uniqueness
/// of `keycloak_id` is enforced by the remote system, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub keycloak_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub engagemx_client_id: String,
    pub is_active: bool,
}

/// Event kinds understood by the webhook receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "user.created")]
    UserCreated,
    #[serde(rename = "user.updated")]
    UserUpdated,
    #[serde(rename = "user.deactivated")]
    UserDeactivated,
    #[serde(rename = "user.bulk_created")]
    UserBulkCreated,
    #[serde(rename = "client.updated")]
    ClientUpdated,
}

/// Envelope posted to `/webhooks/events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub event_type: EventType,
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub data: UserRecord,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl WebhookEvent {
    /// Build a `user.created` event with a freshly generated test event id.
    pub fn user_created(source: impl Into<String>, data: UserRecord) -> Self {
        let now = Utc::now();
        Self {
            event_type: EventType::UserCreated,
            event_id: test_event_id(now),
            timestamp: now,
            source: source.into(),
            data,
            version: "1.0.0".to_string(),
            signature: None,
        }
    }

    /// The fixed event used by the webhook connectivity test.
    pub fn sample_user_created() -> Self {
        Self::user_created(
            "django-admin-test",
            UserRecord {
                keycloak_id: "webhook-test-user-uuid".to_string(),
                email: "webhook-test@example.com".to_string(),
                first_name: Some("Webhook".to_string()),
                last_name: Some("Test".to_string()),
                engagemx_client_id: "test_client".to_string(),
                is_active: true,
            },
        )
    }
}

/// Test event ids are `test-` plus the ISO 8601 creation time.
///
/// Microsecond precision only, so two events minted in the same microsecond
/// would collide. Fine for manually triggered test traffic.
fn test_event_id(at: DateTime<Utc>) -> String {
    format!("test-{}", at.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Response of `POST /provisioning/users/bulk`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkProvisionOutcome {
    pub success_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl BulkProvisionOutcome {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0 || !self.errors.is_empty()
    }
}

/// Whether provisioning created a new remote user or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionAction {
    Created,
    Updated,
}

/// Response of `POST /provisioning/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionedUser {
    pub id: Uuid,
    pub keycloak_id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub engagemx_client_id: String,
    pub is_active: bool,
    pub action: ProvisionAction,
    #[serde(default)]
    pub message: String,
}

/// Response of `GET /webhooks/status`.
///
/// The API reserves the right to add fields, so everything is optional and
/// unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookStatus {
    #[serde(default)]
    pub webhook_system: Option<String>,
    #[serde(default)]
    pub supported_events: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl WebhookStatus {
    pub fn summary(&self) -> String {
        let system = self.webhook_system.as_deref().unwrap_or("unknown");
        if self.supported_events.is_empty() {
            system.to_string()
        } else {
            format!("{} ({})", system, self.supported_events.join(", "))
        }
    }
}

/// Acknowledgement returned by `POST /webhooks/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookAck {
    pub event_id: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
