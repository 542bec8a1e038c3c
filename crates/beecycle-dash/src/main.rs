mod bootstrap;

use anyhow::Result;
use dash_core::error::DashboardError;
use dash_core::settings::Settings;
use dash_data::loader::find_csv_files;
use dash_runtime::dataset_store::DatasetStore;
use dash_runtime::session::{DashboardSession, Page};
use dash_ui::app::App;
use std::path::PathBuf;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bee Cycle dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Page: {}, Theme: {}", settings.page, settings.theme);

    let data_file = resolve_data_file(&settings)?;
    tracing::info!("Dataset: {}", data_file.display());

    // Malformed --from/--to values surface here, before any data is read.
    let (from, to) = settings.date_bounds()?;
    let regions = if settings.regions.is_empty() {
        None
    } else {
        Some(settings.regions.clone())
    };

    // Loads the dataset exactly once; everything downstream reuses the
    // in-memory table.
    let store = DatasetStore::new(data_file);
    let mut session = DashboardSession::open(store, from, to, regions)?;

    if settings.page == "forecast" {
        session.set_page(Page::Forecast);
    }

    let app = App::new(&settings.theme, session);
    app.run()?;

    Ok(())
}

/// Resolve the dataset path from `--data` or the discovery fallbacks.
///
/// A `--data` directory is searched for CSV files; a `--data` file is used
/// as-is. Without the flag, the standard data directories are searched.
fn resolve_data_file(settings: &Settings) -> Result<PathBuf, DashboardError> {
    match &settings.data {
        Some(path) if path.is_dir() => find_csv_files(path)
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::NoDataFiles(path.clone())),
        Some(path) => Ok(path.clone()),
        None => bootstrap::discover_data_file()
            .ok_or_else(|| DashboardError::DataPathNotFound(PathBuf::from("data"))),
    }
}
