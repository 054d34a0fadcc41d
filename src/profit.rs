use crate::model::{
    BetterOption, CalculationRequest, CropDefinition, ProcessedGoodsComparison, Profession,
    ProfitResult, QualityTier,
};

pub const SEASON_LENGTH: u32 = 28;

const TILLER_MULTIPLIER: f64 = 1.1;
const ARTISAN_MULTIPLIER: f64 = 1.4;
const AGRICULTURIST_SPEED_MULTIPLIER: f64 = 0.9;

const KEG_MULTIPLIER: f64 = 3.0;
const PRESERVES_JAR_MULTIPLIER: f64 = 2.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessingPath {
    Keg,
    PreservesJar,
}

impl ProcessingPath {
    fn multiplier(self) -> f64 {
        match self {
            ProcessingPath::Keg => KEG_MULTIPLIER,
            ProcessingPath::PreservesJar => PRESERVES_JAR_MULTIPLIER,
        }
    }
}

/// Clamps a days-left value into `[1, SEASON_LENGTH]`.
pub fn clamp_season_days(value: i64) -> u32 {
    value.clamp(1, SEASON_LENGTH as i64) as u32
}

pub fn quality_multiplier(quality: QualityTier) -> f64 {
    match quality {
        QualityTier::Normal => 1.0,
        QualityTier::Silver => 1.25,
        QualityTier::Gold => 1.5,
        QualityTier::Iridium => 2.0,
    }
}

/// Raw-crop price multiplier: quality tier times the Tiller bonus.
pub fn sell_price_multiplier(quality: QualityTier, has_tiller: bool) -> f64 {
    quality_multiplier(quality) * if has_tiller { TILLER_MULTIPLIER } else { 1.0 }
}

pub fn artisan_sell_price(
    base_price: u32,
    quality: QualityTier,
    has_tiller: bool,
    has_artisan: bool,
) -> f64 {
    let tiller = if has_tiller { TILLER_MULTIPLIER } else { 1.0 };
    let artisan = if has_artisan { ARTISAN_MULTIPLIER } else { 1.0 };

    base_price as f64 * quality_multiplier(quality) * tiller * artisan
}

/// Growth or regrow days after the Agriculturist speed bonus. Zero stays zero.
pub fn actual_growth_days(base_days: u32, has_agriculturist: bool) -> u32 {
    if !has_agriculturist || base_days == 0 {
        return base_days;
    }
    (base_days as f64 * AGRICULTURIST_SPEED_MULTIPLIER).ceil() as u32
}

/// Number of harvests a planting yields inside `season_days`.
///
/// Day 0 is the planting day. The single-harvest branch subtracts one day
/// from the window while the regrow branch counts from the day after the
/// first harvest; both conventions are kept as they are.
pub fn harvest_count(season_days: u32, growth_days: u32, regrow_days: u32, regrows: bool) -> u32 {
    if season_days <= growth_days {
        return 0;
    }

    if !regrows {
        // growth_days == 0 is rejected by catalog validation
        return (season_days - 1).checked_div(growth_days).unwrap_or(0);
    }

    let remaining = season_days as i64 - (growth_days as i64 + 1);
    let extra = if regrow_days > 0 && remaining >= 0 {
        (remaining / regrow_days as i64) as u32
    } else {
        0
    };
    1 + extra
}

fn total_seed_cost(crop: &CropDefinition, harvests: u32) -> f64 {
    if crop.regrows {
        crop.seed_cost as f64
    } else {
        harvests as f64 * crop.seed_cost as f64
    }
}

fn processed_goods_profit(
    crop: &CropDefinition,
    harvests: u32,
    has_artisan: bool,
    path: ProcessingPath,
) -> f64 {
    // Quality and Tiller do not carry over to artisan goods.
    let artisan_bonus = if has_artisan { ARTISAN_MULTIPLIER } else { 1.0 };
    let unit_price = crop.sell_price as f64 * path.multiplier() * artisan_bonus;

    let revenue = harvests as f64 * unit_price * crop.yield_per_harvest as f64;
    revenue - total_seed_cost(crop, harvests)
}

fn compare_processed_goods(
    crop: &CropDefinition,
    harvests: u32,
    has_artisan: bool,
) -> ProcessedGoodsComparison {
    let kegs = processed_goods_profit(crop, harvests, has_artisan, ProcessingPath::Keg);
    let preserves_jars =
        processed_goods_profit(crop, harvests, has_artisan, ProcessingPath::PreservesJar);

    let better_option = if kegs > preserves_jars {
        BetterOption::Kegs
    } else if preserves_jars > kegs {
        BetterOption::PreservesJars
    } else {
        BetterOption::Same
    };

    ProcessedGoodsComparison {
        kegs,
        preserves_jars,
        better_option,
    }
}

pub fn calculate_season_profit(crop: &CropDefinition, request: &CalculationRequest) -> ProfitResult {
    let season_days = clamp_season_days(request.season_days.unwrap_or(SEASON_LENGTH as i64));
    let quality = request.quality.unwrap_or_default();
    let has_tiller = request.has_tiller.unwrap_or(false);
    let profession = request.profession.unwrap_or_default();
    let use_processed_goods = request.use_processed_goods.unwrap_or(false);

    let has_artisan = profession == Profession::Artisan;
    let has_agriculturist = profession == Profession::Agriculturist;

    let growth_days = actual_growth_days(crop.growth_days, has_agriculturist);
    let regrow_days = actual_growth_days(crop.regrow_days, has_agriculturist);

    let final_sell_price = if use_processed_goods {
        artisan_sell_price(crop.sell_price, quality, has_tiller, has_artisan)
    } else {
        crop.sell_price as f64 * sell_price_multiplier(quality, has_tiller)
    };

    let harvests = harvest_count(season_days, growth_days, regrow_days, crop.regrows);

    let total_revenue = harvests as f64 * final_sell_price * crop.yield_per_harvest as f64;
    let total_profit = total_revenue - total_seed_cost(crop, harvests);
    let gold_per_day = total_profit / season_days as f64;

    ProfitResult {
        crop_id: crop.id.clone(),
        crop_name: crop.name.clone(),
        harvest_count: harvests,
        total_revenue,
        total_profit,
        gold_per_day,
        processed_goods: compare_processed_goods(crop, harvests, has_artisan),
    }
}
