mod config;
mod error;
mod favorites;
mod loader;
mod model;
mod planner;
mod profit;
mod share;
mod stats;
mod ui;

use anyhow::Context as _;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;
use crate::favorites::FavoriteStore;
use crate::ui::PlannerApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stardew_planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let settings = Settings::load().context("failed to load settings")?;

    let catalog = loader::load_catalog(settings.catalog_path.as_deref())
        .context("failed to load crop catalog")?;

    // A share link (or just its query) may be passed to reopen a preset
    let mut planner = settings.initial_planner();
    if let Some(link) = std::env::args().nth(1) {
        planner = share::parse_query(share::query_from_link(&link), planner);
        tracing::info!(season = %planner.season, days_left = planner.days_left, "applied share link");
    }

    let favorites = match FavoriteStore::load(&settings.favorites_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable favorites file");
            FavoriteStore::empty(&settings.favorites_path)
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 650.0]),
        ..Default::default()
    };

    let site_origin = settings.site_origin.clone();

    eframe::run_native(
        "Stardew Crop Profit Planner",
        options,
        Box::new(move |cc| {
            ui::set_custom_style(&cc.egui_ctx);
            Ok(Box::new(PlannerApp::new(catalog, planner, favorites, site_origin)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to open window: {e}"))
}
