//! `stagegate` -- one-shot workflow submission tool.
//!
//! Reads a workflow draft from a JSON file and creates it on the
//! workflow service, printing the assigned id on success.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default | Description                                      |
//! |-----------------------|----------|---------|--------------------------------------------------|
//! | `STAGEGATE_API_URL`   | yes      | --      | Service base URL, e.g. `http://host:8080/api/v1` |
//! | `STAGEGATE_API_TOKEN` | no       | --      | Bearer token attached to every request           |
//!
//! Usage: `stagegate <draft.json>`

use stagegate_client::api::WorkflowsApi;
use stagegate_client::auth;
use stagegate_core::workflow::WorkflowDraft;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stagegate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = std::env::var("STAGEGATE_API_URL").unwrap_or_else(|_| {
        tracing::error!("STAGEGATE_API_URL environment variable is required");
        std::process::exit(1);
    });

    let draft_path = std::env::args().nth(1).unwrap_or_else(|| {
        tracing::error!("Usage: stagegate <draft.json>");
        std::process::exit(1);
    });

    let draft_json = std::fs::read_to_string(&draft_path).unwrap_or_else(|e| {
        tracing::error!(path = %draft_path, error = %e, "Failed to read draft file");
        std::process::exit(1);
    });

    let draft: WorkflowDraft = serde_json::from_str(&draft_json).unwrap_or_else(|e| {
        tracing::error!(path = %draft_path, error = %e, "Draft file is not a valid workflow draft");
        std::process::exit(1);
    });

    let api = match std::env::var("STAGEGATE_API_TOKEN") {
        Ok(token) => {
            let client = auth::authenticated_client(&token).unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to build authenticated client");
                std::process::exit(1);
            });
            WorkflowsApi::with_client(client, base_url)
        }
        Err(_) => WorkflowsApi::new(base_url),
    };

    tracing::info!(name = %draft.name, url = %api.base_url(), "Submitting workflow");

    match api.create_workflow(draft).await {
        Ok(workflow) => {
            tracing::info!(id = workflow.id, "Workflow created");
            println!("{}", workflow.id);
        }
        Err(_) => {
            // Failure details were already logged by the client.
            std::process::exit(1);
        }
    }
}
