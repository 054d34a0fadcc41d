use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{
    CalculationRequest, CropDefinition, Profession, ProfitResult, QualityTier, Season,
};
use crate::profit::{calculate_season_profit, SEASON_LENGTH};

/// The player's current choices, as edited in the UI or restored from a
/// share link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerSettings {
    pub season: Season,
    pub days_left: u32,
    pub quality: QualityTier,
    pub has_tiller: bool,
    pub profession: Profession,
    pub use_processed_goods: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            season: Season::Spring,
            days_left: SEASON_LENGTH,
            quality: QualityTier::Normal,
            has_tiller: false,
            profession: Profession::None,
            use_processed_goods: false,
        }
    }
}

impl PlannerSettings {
    pub fn to_request(&self) -> CalculationRequest {
        CalculationRequest {
            season_days: Some(self.days_left as i64),
            quality: Some(self.quality),
            has_tiller: Some(self.has_tiller),
            profession: Some(self.profession),
            use_processed_goods: Some(self.use_processed_goods),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CropName,
    HarvestCount,
    TotalRevenue,
    TotalProfit,
    GoldPerDay,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::GoldPerDay,
        SortKey::TotalProfit,
        SortKey::TotalRevenue,
        SortKey::HarvestCount,
        SortKey::CropName,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CropName => "Crop",
            SortKey::HarvestCount => "Harvests",
            SortKey::TotalRevenue => "Revenue",
            SortKey::TotalProfit => "Profit",
            SortKey::GoldPerDay => "Gold/Day",
        }
    }

    /// Names read A-Z by default, numbers highest first.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortKey::CropName => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

pub fn is_eligible(crop: &CropDefinition, season: Season) -> bool {
    season == Season::Greenhouse
        || crop.seasons.contains(&season)
        || crop.seasons.contains(&Season::Greenhouse)
}

// gold/day desc, then profit desc, then name asc
fn ranking_order(a: &ProfitResult, b: &ProfitResult) -> Ordering {
    b.gold_per_day
        .total_cmp(&a.gold_per_day)
        .then_with(|| b.total_profit.total_cmp(&a.total_profit))
        .then_with(|| a.crop_name.cmp(&b.crop_name))
}

/// Evaluates every crop that grows in `settings.season` and ranks them by
/// gold per day.
pub fn rank_crops(catalog: &[CropDefinition], settings: &PlannerSettings) -> Vec<ProfitResult> {
    let request = settings.to_request();

    let mut results: Vec<ProfitResult> = catalog
        .par_iter()
        .filter(|crop| is_eligible(crop, settings.season))
        .map(|crop| calculate_season_profit(crop, &request))
        .collect();

    results.sort_by(ranking_order);

    tracing::debug!(
        season = %settings.season,
        days_left = settings.days_left,
        results = results.len(),
        "ranked crops"
    );

    results
}

pub fn sort_results(results: &mut [ProfitResult], key: SortKey, direction: SortDirection) {
    results.sort_by(|a, b| {
        let primary = match key {
            SortKey::CropName => a.crop_name.cmp(&b.crop_name),
            SortKey::HarvestCount => a.harvest_count.cmp(&b.harvest_count),
            SortKey::TotalRevenue => a.total_revenue.total_cmp(&b.total_revenue),
            SortKey::TotalProfit => a.total_profit.total_cmp(&b.total_profit),
            SortKey::GoldPerDay => a.gold_per_day.total_cmp(&b.gold_per_day),
        };

        let primary = match direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };

        primary.then_with(|| ranking_order(a, b))
    });
}

/// 1-based gold/day rank per crop id, independent of the table's sort.
pub fn gold_ranks(results: &[ProfitResult]) -> HashMap<String, usize> {
    let mut ranked: Vec<&ProfitResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.gold_per_day.total_cmp(&a.gold_per_day));

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, r)| (r.crop_id.clone(), i + 1))
        .collect()
}
