use secrecy::{ExposeSecret, Secret};

use crate::error::ProvisioningError;

const PROVISIONING_API_URL: &str = "PROVISIONING_API_URL";
const PROVISIONING_API_KEY: &str = "PROVISIONING_API_KEY";

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Connection settings for the debt collection API.
///
/// The environment lookup happens once, here; everything downstream receives
/// the resolved config by value.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    pub base_url: String,
    api_key: Secret<String>,
}

impl ProvisioningConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: Secret::new(api_key.into()),
        }
    }

    /// Resolve the config from the process environment.
    ///
    /// Fails with [`ProvisioningError::MissingApiKey`] when the key is unset
    /// or empty, so a blank bearer token never reaches the network layer.
    pub fn from_env() -> Result<Self, ProvisioningError> {
        let base_url =
            std::env::var(PROVISIONING_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var(PROVISIONING_API_KEY).unwrap_or_default();

        if api_key.is_empty() {
            return Err(ProvisioningError::MissingApiKey);
        }

        Ok(Self::new(base_url, api_key))
    }

    pub fn bearer_token(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn webhook_status_url(&self) -> String {
        format!("{}/webhooks/status", self.base_url)
    }

    pub fn webhook_events_url(&self) -> String {
        format!("{}/webhooks/events", self.base_url)
    }

    pub fn users_url(&self) -> String {
        format!("{}/provisioning/users", self.base_url)
    }

    pub fn bulk_users_url(&self) -> String {
        format!("{}/provisioning/users/bulk", self.base_url)
    }

    pub fn user_url(&self, keycloak_id: &str) -> String {
        format!("{}/provisioning/users/{}", self.base_url, keycloak_id)
    }
}
