use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use gpui::Application;
use tracing::{debug, error, info};

use mtd_core::db::StoreRegistry;
use mtd_core::{FormData, HistoryRepository, SubmissionController};
use mtd_store_sqlite::SqliteStoreFactory;
use mtd_ui::components::WindowPreferences;
use mtd_ui::config::{AppConfig, ConfigOverrides};
use mtd_ui::state::AppState;
use mtd_ui::{csv_loader, logging, open_main_window, setup_app};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Simulated Making Tax Digital submissions to HMRC.
///
/// Flags override the matching values from the config file.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storage backend (`memory` or `sqlite`).
    #[arg(long)]
    backend: Option<String>,

    /// Storage connection string.
    /// For SQLite this is a file path (e.g. `mtd.db`) or `:memory:`.
    #[arg(long)]
    db: Option<String>,

    /// CSV file whose first row prefills the form.
    #[arg(long)]
    prefill: Option<PathBuf>,

    /// Also write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level or filter directive, e.g. `debug` or `mtd_core=trace`.
    #[arg(long)]
    log_level: Option<String>,
}

// ─── start-up ────────────────────────────────────────────────────────────────

fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::with_builtin();
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

async fn build_controller(config: &AppConfig) -> anyhow::Result<SubmissionController> {
    let store_config = config.store.store_config();
    debug!(backend = %store_config.backend, "opening store");
    let store = build_registry()
        .create(&store_config)
        .await
        .with_context(|| format!("Failed to open '{}' store", store_config.backend))?;

    let repository = HistoryRepository::new(Arc::from(store), config.store.history_key.clone());
    let mut controller = SubmissionController::new(repository, &config.submission);
    if config.submission.rehydrate_history {
        controller
            .rehydrate()
            .await
            .context("Failed to load submission history")?;
    }
    Ok(controller)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.apply(ConfigOverrides {
        backend: cli.backend,
        db: cli.db,
        log_level: cli.log_level,
        log_file: cli.log_file,
    });
    logging::init_from_config(&config.logging)?;
    info!(backend = %config.store.backend, "starting");

    let prefill = match &cli.prefill {
        Some(path) => csv_loader::load_from_file(path)?,
        None => FormData::new(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let controller = runtime.block_on(build_controller(&config))?;
    let state = AppState::new(controller, runtime.handle().clone());

    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx| {
            setup_app(cx);
            if let Err(e) = open_main_window(cx, state, prefill, WindowPreferences::default()) {
                error!(error = %e, "failed to open main window");
                cx.quit();
            }
        });

    info!("exiting");
    Ok(())
}
