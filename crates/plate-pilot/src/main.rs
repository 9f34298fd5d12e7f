// PlatePilot entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open database
// 4. Build the MealDB client
// 5. Create mpsc channels and the application state
// 6. Queue the initial random feed load
// 7. Spawn app logic task
// 8. Run the TUI until the user quits
// 9. Cleanup on exit

use plate_pilot::app;
use plate_pilot::config;
use plate_pilot::db;
use plate_pilot::mealdb::MealDbClient;
use plate_pilot::protocol::UserCommand;
use plate_pilot::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("PlatePilot starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: api={}, {} random meals per load",
        config.api.base_url, config.feed.random_meal_count
    );

    // 3. Open database
    let db = db::Database::open(&config.storage.path).context("failed to open database")?;
    info!("Database opened at {}", config.storage.path);

    // 4. Build the MealDB client
    let api = MealDbClient::new(&config.api).context("failed to build HTTP client")?;

    // 5. Create mpsc channels and the application state
    let (api_tx, api_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(config, db, api, api_tx)
        .context("failed to load saved data")?;

    // 6. Home shows random meals on launch.
    cmd_tx
        .send(UserCommand::LoadRandom)
        .await
        .context("failed to queue initial feed load")?;

    // 7. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(api_rx, cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 8. The TUI consumes ui_rx and sends commands through cmd_tx.
    // It blocks until the user confirms quit or presses Ctrl+C.
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 9. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("PlatePilot shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("platepilot.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("plate_pilot=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
