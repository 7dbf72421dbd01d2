use tracing::info;
use tracing_subscriber::EnvFilter;

use wordpair_cli::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with the game console
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(
        teams = config.teams.len(),
        round_time = config.round_time_seconds,
        target_score = config.target_score,
        "Starting word pair game"
    );

    wordpair_cli::run(config).await
}
