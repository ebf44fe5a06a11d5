use std::sync::Arc;

use salon_booking::bridge::StdoutBridge;
use salon_booking::catalog::Catalog;
use salon_booking::channels::CliChannel;
use salon_booking::config::AppConfig;
use salon_booking::session::BookingSession;
use salon_booking::wizard::BookingWizard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the screens and the booking payload.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let catalog = Arc::new(Catalog::load(config.catalog_path.as_deref())?);
    let today = chrono::Local::now().date_naive();

    eprintln!("💈 {} booking v{}", catalog.salon_name(), env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Hours: {:02}:00–{:02}:00, lunch {:02}:00–{:02}:00, {} min slots",
        config.schedule.work_start,
        config.schedule.work_end,
        config.schedule.lunch_start,
        config.schedule.lunch_end,
        config.schedule.step_minutes,
    );
    eprintln!(
        "   Catalog: {}",
        config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    eprintln!("   Type 'help' for commands, 'quit' to exit.");

    let wizard = BookingWizard::new(catalog, config.schedule, today);
    let mut session = BookingSession::new(wizard, StdoutBridge::new());

    CliChannel::new().run(&mut session).await?;

    Ok(())
}
