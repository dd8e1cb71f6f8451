use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::config::ProvisioningConfig;
use crate::error::ProvisioningError;
use crate::models::{
    BulkProvisionOutcome, ProvisionedUser, UserRecord, WebhookAck, WebhookEvent, WebhookStatus,
};

/// The status probe is cheap, so it gets a tighter deadline than the
/// provisioning calls.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer-authenticated JSON client for the debt collection API.
///
/// Every operation issues exactly one HTTP call; nothing is retried. A
/// request that times out is reported the same way as any other transport
/// failure, through [`ProvisioningError`].
pub struct ProvisioningClient {
    config: ProvisioningConfig,
    http: Client,
}

impl ProvisioningClient {
    pub fn new(config: ProvisioningConfig) -> Result<Self, ProvisioningError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Probe the webhook subsystem status endpoint.
    pub async fn check_health(&self) -> Result<WebhookStatus, ProvisioningError> {
        let response = self
            .http
            .get(self.config.webhook_status_url())
            .bearer_auth(self.config.bearer_token())
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => response
                .json::<WebhookStatus>()
                .await
                .map_err(|e| ProvisioningError::InvalidResponse(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ProvisioningError::UnexpectedStatus { status, body })
            }
        }
    }

    /// Provision a batch of users in one request.
    ///
    /// An empty batch is still sent; whether that is acceptable is the
    /// server's call. Partial failures come back inside the outcome, not as
    /// an `Err`.
    pub async fn provision_users(
        &self,
        records: &[UserRecord],
    ) -> Result<BulkProvisionOutcome, ProvisioningError> {
        tracing::debug!(count = records.len(), "sending bulk provisioning request");

        let response = self
            .http
            .post(self.config.bulk_users_url())
            .bearer_auth(self.config.bearer_token())
            .json(&records)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => response
                .json::<BulkProvisionOutcome>()
                .await
                .map_err(|e| ProvisioningError::InvalidResponse(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ProvisioningError::UnexpectedStatus { status, body })
            }
        }
    }

    /// Provision a single user.
    pub async fn provision_user(
        &self,
        record: &UserRecord,
    ) -> Result<ProvisionedUser, ProvisioningError> {
        let response = self
            .http
            .post(self.config.users_url())
            .bearer_auth(self.config.bearer_token())
            .json(record)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => response
                .json::<ProvisionedUser>()
                .await
                .map_err(|e| ProvisioningError::InvalidResponse(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ProvisioningError::UnexpectedStatus { status, body })
            }
        }
    }

    /// Deactivate a remote user (soft delete on the API side).
    pub async fn deactivate_user(&self, keycloak_id: &str) -> Result<(), ProvisioningError> {
        let response = self
            .http
            .delete(self.config.user_url(keycloak_id))
            .bearer_auth(self.config.bearer_token())
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ProvisioningError::UnexpectedStatus { status, body })
            }
        }
    }

    /// Deliver one webhook event envelope.
    pub async fn send_webhook_event(
        &self,
        event: &WebhookEvent,
    ) -> Result<WebhookAck, ProvisioningError> {
        tracing::debug!(event_id = %event.event_id, "sending webhook event");

        let response = self
            .http
            .post(self.config.webhook_events_url())
            .bearer_auth(self.config.bearer_token())
            .json(event)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => response
                .json::<WebhookAck>()
                .await
                .map_err(|e| ProvisioningError::InvalidResponse(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ProvisioningError::UnexpectedStatus { status, body })
            }
        }
    }
}
