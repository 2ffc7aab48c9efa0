//! Univer tomato trial loader
//!
//! Loads the trial datasets and prints the dashboard summary for the
//! configured access level as JSON.

use trial_loader::summary::summarize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, datasets) = trial_loader::bootstrap().await?;

    let level = config.dashboard.access_level();
    tracing::info!("Summarizing dashboard for {}", level);

    let summary = summarize(&datasets, level);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
