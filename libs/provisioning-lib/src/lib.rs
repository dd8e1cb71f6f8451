//! # Debt Collection Provisioning Client
//!
//! Typed client for the debt collection API consumed by the user-management
//! layer: user provisioning (single and bulk), webhook delivery checks, and
//! the static Django integration sources emitted by the setup flow.
//!
//! The client performs one HTTP call per operation, with no retries. Failures
//! are reported as [`ProvisioningError`] values so callers can distinguish
//! timeouts from refused connections from unexpected HTTP statuses.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use provisioning_lib::{ProvisioningClient, ProvisioningConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ProvisioningConfig::from_env().expect("PROVISIONING_API_KEY must be set");
//!     let client = ProvisioningClient::new(config).expect("client");
//!
//!     let status = client.check_health().await;
//! }
//! ```

mod client;
mod config;
mod error;
mod models;

pub mod templates;

pub use client::ProvisioningClient;
pub use config::ProvisioningConfig;
pub use error::ProvisioningError;
pub use models::{
    BulkProvisionOutcome, EventType, ProvisionAction, ProvisionedUser, UserRecord, WebhookAck,
    WebhookEvent, WebhookStatus,
};
