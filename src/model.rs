use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    Greenhouse,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::Spring,
        Season::Summer,
        Season::Fall,
        Season::Winter,
        Season::Greenhouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::Greenhouse => "greenhouse",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::Greenhouse => "Greenhouse",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            "greenhouse" => Ok(Season::Greenhouse),
            other => Err(CatalogError::UnknownSeason(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    #[default]
    Normal,
    Silver,
    Gold,
    Iridium,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Normal,
        QualityTier::Silver,
        QualityTier::Gold,
        QualityTier::Iridium,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Normal => "Normal",
            QualityTier::Silver => "Silver",
            QualityTier::Gold => "Gold",
            QualityTier::Iridium => "Iridium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profession {
    #[default]
    None,
    Artisan,
    Agriculturist,
}

impl Profession {
    pub const ALL: [Profession; 3] = [
        Profession::None,
        Profession::Artisan,
        Profession::Agriculturist,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Profession::None => "None",
            Profession::Artisan => "Artisan (+40% goods)",
            Profession::Agriculturist => "Agriculturist (-10% growth)",
        }
    }
}

fn default_yield() -> u32 {
    1
}

/// One entry of the crop catalog. Field aliases accept the camelCase keys
/// used by the web catalog (`season`, `isRegrowing`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDefinition {
    pub id: String,
    pub name: String,
    #[serde(alias = "season")]
    pub seasons: Vec<Season>,
    pub seed_cost: u32,
    pub sell_price: u32,
    pub growth_days: u32,
    #[serde(default)]
    pub regrow_days: u32,
    #[serde(alias = "isRegrowing")]
    pub regrows: bool,
    #[serde(default = "default_yield")]
    pub yield_per_harvest: u32,
}

/// Per-call modifiers. Every field is optional; `None` picks the default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalculationRequest {
    pub season_days: Option<i64>,
    pub quality: Option<QualityTier>,
    pub has_tiller: Option<bool>,
    pub profession: Option<Profession>,
    pub use_processed_goods: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetterOption {
    Kegs,
    PreservesJars,
    Same,
}

impl BetterOption {
    pub fn label(&self) -> &'static str {
        match self {
            BetterOption::Kegs => "Kegs",
            BetterOption::PreservesJars => "Preserves Jars",
            BetterOption::Same => "Same",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedGoodsComparison {
    pub kegs: f64,
    pub preserves_jars: f64,
    pub better_option: BetterOption,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitResult {
    pub crop_id: String,
    pub crop_name: String,
    pub harvest_count: u32,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub gold_per_day: f64,
    pub processed_goods: ProcessedGoodsComparison,
}
