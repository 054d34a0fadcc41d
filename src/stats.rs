use statrs::statistics::Statistics;

use crate::model::{BetterOption, ProfitResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeasonSummary {
    pub crop_count: usize,
    pub profitable_count: usize,
    pub mean_gold_per_day: f64,
    pub std_dev_gold_per_day: f64,
    pub median_gold_per_day: f64,
    pub best: Option<(String, f64)>,
    pub kegs_preferred: usize,
}

/// Aggregates a ranked result set. `results` is expected in ranking order,
/// so the first entry is reported as the best pick.
pub fn summarize(results: &[ProfitResult]) -> SeasonSummary {
    if results.is_empty() {
        return SeasonSummary::default();
    }

    let mut gold: Vec<f64> = results.iter().map(|r| r.gold_per_day).collect();

    // Sample std dev is undefined for a single value
    let std_dev = if gold.len() >= 2 {
        gold.iter().std_dev()
    } else {
        0.0
    };
    let mean = gold.iter().mean();

    gold.sort_by(|a, b| a.total_cmp(b));

    SeasonSummary {
        crop_count: results.len(),
        profitable_count: results.iter().filter(|r| r.total_profit > 0.0).count(),
        mean_gold_per_day: mean,
        std_dev_gold_per_day: std_dev,
        median_gold_per_day: quantile(&gold, 0.50),
        best: results
            .first()
            .map(|r| (r.crop_name.clone(), r.gold_per_day)),
        kegs_preferred: results
            .iter()
            .filter(|r| r.processed_goods.better_option == BetterOption::Kegs)
            .count(),
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    sorted[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProcessedGoodsComparison;

    fn result(name: &str, gold_per_day: f64) -> ProfitResult {
        ProfitResult {
            crop_id: name.to_lowercase(),
            crop_name: name.into(),
            harvest_count: 1,
            total_revenue: 0.0,
            total_profit: gold_per_day * 28.0,
            gold_per_day,
            processed_goods: ProcessedGoodsComparison {
                kegs: 1.0,
                preserves_jars: 0.0,
                better_option: BetterOption::Kegs,
            },
        }
    }

    #[test]
    fn empty_results_give_zero_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary, SeasonSummary::default());
        assert!(summary.best.is_none());
    }

    #[test]
    fn single_result_has_zero_spread() {
        let summary = summarize(&[result("Kale", 5.0)]);
        assert_eq!(summary.std_dev_gold_per_day, 0.0);
        assert_eq!(summary.mean_gold_per_day, 5.0);
        assert_eq!(summary.median_gold_per_day, 5.0);
    }

    #[test]
    fn summary_counts_and_moments() {
        let results = vec![
            result("Strawberry", 12.0),
            result("Cauliflower", 6.0),
            result("Tulip", -1.0),
        ];
        let summary = summarize(&results);

        assert_eq!(summary.crop_count, 3);
        assert_eq!(summary.profitable_count, 2);
        assert_eq!(summary.kegs_preferred, 3);
        assert_eq!(summary.median_gold_per_day, 6.0);
        assert!((summary.mean_gold_per_day - 17.0 / 3.0).abs() < 1e-9);
        // sample variance of (12, 6, -1) = 42.333..
        assert!((summary.std_dev_gold_per_day - 42.333_333_333_333_336_f64.sqrt()).abs() < 1e-9);
        assert_eq!(summary.best, Some(("Strawberry".to_string(), 12.0)));
    }
}
