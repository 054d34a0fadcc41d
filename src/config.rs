//! Layered settings: built-in defaults, then an optional
//! `config/planner.toml`, then `PLANNER__*` environment variables.

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::model::Season;
use crate::planner::PlannerSettings;
use crate::profit::clamp_season_days;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Crop catalog (`.json`, `.db`, `.sqlite`); the bundled catalog when unset
    pub catalog_path: Option<PathBuf>,

    /// Where favorite crops are stored
    pub favorites_path: PathBuf,

    /// Origin used when building share links
    pub site_origin: String,

    pub default_season: Season,

    pub default_days_left: i64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .set_default("favorites_path", "favorites.json")?
            .set_default("site_origin", "https://stardewtools.app")?
            .set_default("default_season", "spring")?
            .set_default("default_days_left", 28)?
            .add_source(File::with_name("config/planner").required(false))
            .add_source(
                Environment::with_prefix("PLANNER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Initial planner state before any share link is applied.
    pub fn initial_planner(&self) -> PlannerSettings {
        PlannerSettings {
            season: self.default_season,
            days_left: clamp_season_days(self.default_days_left),
            ..Default::default()
        }
    }
}
