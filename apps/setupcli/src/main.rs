// apps/setupcli/src/main.rs

use std::path::Path;
use std::process;

use clap::Command;
use tracing_subscriber::EnvFilter;

use provisioning_lib::templates;
use provisioning_lib::{
    ProvisioningClient, ProvisioningConfig, ProvisioningError, UserRecord, WebhookEvent,
};

/// Which step of the readiness workflow failed. The workflow is
/// all-or-nothing: the first failure aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupStep {
    HealthCheck,
    Provisioning,
    WebhookTest,
    CodeGeneration,
}

#[tokio::main]
async fn main() {
    Command::new("setupcli")
        .about("Debt collection integration setup for the Django admin")
        .get_matches();

    // Step progress goes to stdout; diagnostics stay on stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    println!("🏥 Django Admin - Debt Collection Integration Setup");
    println!("{}", "=".repeat(55));

    let config = match ProvisioningConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("❌ {e}");
            println!("Please set it with: export PROVISIONING_API_KEY='your-api-key'");
            process::exit(1);
        }
    };

    let client = match ProvisioningClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            println!("❌ Failed to create API client: {e}");
            process::exit(1);
        }
    };
    tracing::debug!(base_url = client.base_url(), "provisioning client ready");

    if run_setup(&client, Path::new(".")).await.is_err() {
        process::exit(1);
    }
}

/// The fixed readiness workflow: connectivity, sample provisioning, webhook
/// delivery, generated integration sources. Stops at the first failed step.
async fn run_setup(client: &ProvisioningClient, out_dir: &Path) -> Result<(), SetupStep> {
    println!("1. Testing API connection...");
    if !test_connection(client).await {
        println!("Please ensure the debt collection API is running and accessible");
        return Err(SetupStep::HealthCheck);
    }

    println!("\n2. Provisioning sample users...");
    if !provision_sample_users(client).await {
        println!("Sample user provisioning failed");
        return Err(SetupStep::Provisioning);
    }

    println!("\n3. Testing webhook functionality...");
    if !send_webhook_test(client).await {
        println!("Webhook test failed");
        return Err(SetupStep::WebhookTest);
    }

    println!("\n4. Generating Django integration code...");
    if let Err(e) = write_integration_sources(out_dir) {
        println!("❌ Failed to write generated files: {e}");
        return Err(SetupStep::CodeGeneration);
    }

    println!("✅ Setup complete!");
    println!("\nGenerated files:");
    println!("- {} (model definitions)", templates::MODELS_FILE_NAME);
    println!("- {} (admin integration)", templates::ADMIN_FILE_NAME);
    println!("\nNext steps:");
    println!("1. Copy the model code to your Django models.py");
    println!("2. Copy the admin code to your Django admin.py");
    println!("3. Run Django migrations: python manage.py makemigrations && python manage.py migrate");
    println!("4. Create a Django superuser: python manage.py createsuperuser");
    println!("5. Install the DebtCollectionService from the documentation");
    println!("6. Configure your PROVISIONING_API_KEY in Django settings");

    Ok(())
}

async fn test_connection(client: &ProvisioningClient) -> bool {
    match client.check_health().await {
        Ok(status) => {
            println!("✅ Successfully connected to debt collection API");
            println!("Webhook system status: {}", status.summary());
            true
        }
        Err(ProvisioningError::UnexpectedStatus { status, .. }) => {
            println!("❌ Connection failed with status: {status}");
            false
        }
        Err(e) => {
            println!("❌ Connection error: {e}");
            false
        }
    }
}

async fn provision_sample_users(client: &ProvisioningClient) -> bool {
    match client.provision_users(&sample_users()).await {
        Ok(outcome) => {
            println!(
                "✅ Successfully provisioned {} sample users",
                outcome.success_count
            );
            if outcome.has_errors() {
                println!("⚠️  {} errors occurred", outcome.error_count);
            }
            true
        }
        Err(ProvisioningError::UnexpectedStatus { status, body }) => {
            println!("❌ Provisioning failed with status: {status}");
            println!("{body}");
            false
        }
        Err(e) => {
            println!("❌ Provisioning error: {e}");
            false
        }
    }
}

async fn send_webhook_test(client: &ProvisioningClient) -> bool {
    let event = WebhookEvent::sample_user_created();

    match client.send_webhook_event(&event).await {
        Ok(ack) => {
            println!("✅ Webhook test successful");
            println!("Event ID: {}", ack.event_id);
            true
        }
        Err(ProvisioningError::UnexpectedStatus { status, .. }) => {
            println!("❌ Webhook test failed with status: {status}");
            false
        }
        Err(e) => {
            println!("❌ Webhook test error: {e}");
            false
        }
    }
}

fn write_integration_sources(out_dir: &Path) -> std::io::Result<()> {
    std::fs::write(
        out_dir.join(templates::MODELS_FILE_NAME),
        templates::django_models_source(),
    )?;
    std::fs::write(
        out_dir.join(templates::ADMIN_FILE_NAME),
        templates::django_admin_source(),
    )?;
    Ok(())
}

/// Two fixed records exercising the bulk endpoint end to end.
fn sample_users() -> Vec<UserRecord> {
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
