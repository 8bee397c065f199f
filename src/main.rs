//! NeoQuest - A Terminal UI for Neo N3 prediction markets.

use neoquest::{App, Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file; stdout belongs to the TUI.
    let log_dir = neoquest::config::log_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let file_appender = tracing_appender::rolling::daily(log_dir, "neoquest.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neoquest=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    let config = Config::load_or_default()?;

    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}
