/// kft - operator console for the KFT portals
use clap::Parser;
use kft_console::{cli::Cli, config::ConsoleConfig, Console};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays clean for tables.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kft_client=info,kft_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ConsoleConfig::load(cli.config.as_deref())?
        .with_overrides(cli.api_url, cli.session_dir);
    config.validate()?;

    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let console = Console::from_config(&config)?;
    let mut stdout = std::io::stdout().lock();
    console.run(cli.command, &mut stdout).await?;

    Ok(())
}
