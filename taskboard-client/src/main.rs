//! # Taskboard Client
//!
//! Signs in with an identity token, syncs the application user and prints a
//! timeline as JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Project timeline
//! taskboard-client
//!
//! # Task timeline of project 3
//! taskboard-client tasks 3
//! ```
//!
//! Configuration comes from `TASKBOARD_*` environment variables; see
//! `taskboard_client::config`.

use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;
use taskboard_client::{
    api::TaskboardApi,
    config::ClientConfig,
    identity::{IdentityProvider, TokenIdentityProvider},
    request::AuthenticatedClient,
    session::SessionContext,
    sync::UserSyncService,
    timeline::{project_entries, task_entries, ProjectRecord, TaskRecord},
    transport::ReqwestTransport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

enum Command {
    Projects,
    Tasks(i32),
}

fn parse_command(args: &[String]) -> anyhow::Result<Command> {
    match args {
        [] => Ok(Command::Projects),
        [cmd] if cmd == "projects" => Ok(Command::Projects),
        [cmd, project_id] if cmd == "tasks" => {
            let project_id = project_id
                .parse()
                .with_context(|| format!("Project id must be a number, got {}", project_id))?;
            Ok(Command::Tasks(project_id))
        }
        _ => anyhow::bail!("Usage: taskboard-client [projects | tasks <projectId>]"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(&args)?;

    let config = ClientConfig::load().context("Failed to load configuration")?;
    config.validate()?;

    let secret = config
        .identity_secret
        .clone()
        .context("TASKBOARD_IDENTITY_SECRET is required to verify the access token")?;

    let identity: Arc<dyn IdentityProvider> =
        Arc::new(TokenIdentityProvider::new(config.access_token.clone(), secret));
    let client = AuthenticatedClient::new(identity.clone(), Arc::new(ReqwestTransport::new()?));
    let api = TaskboardApi::new(client, config.api_base_url.clone());

    let session = SessionContext::new(
        identity,
        UserSyncService::new(api.clone(), config.sync_defaults()),
    );

    let state = session.check_auth_status().await;
    if !state.is_authenticated {
        anyhow::bail!("Not signed in: set TASKBOARD_ACCESS_TOKEN");
    }
    match &state.current_user {
        Some(user) => tracing::info!(user_id = user.user_id, username = %user.username, "Signed in"),
        None => tracing::warn!(error = ?state.error, "Signed in but the user could not be synced"),
    }

    let now = Utc::now();
    let entries = match command {
        Command::Projects => {
            let projects = api.list_projects().await?;
            let records: Vec<ProjectRecord> = projects.iter().map(ProjectRecord::from).collect();
            project_entries(&records, config.project_span(), now)
        }
        Command::Tasks(project_id) => {
            let tasks = api.list_tasks(project_id).await?;
            let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
            task_entries(&records, now)
        }
    };

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
