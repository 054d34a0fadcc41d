use crate::model::{Profession, QualityTier, Season};
use crate::planner::PlannerSettings;
use crate::profit::{clamp_season_days, sell_price_multiplier};

/// Link that reopens the calculator with the current season, days left and
/// artisan preset.
pub fn share_url(origin: &str, settings: &PlannerSettings) -> String {
    let mut url = format!(
        "{}/calculator?season={}&daysLeft={}",
        origin.trim_end_matches('/'),
        settings.season,
        settings.days_left
    );

    if settings.profession == Profession::Artisan {
        url.push_str("&profession=artisan");
    }

    url
}

pub fn share_text(settings: &PlannerSettings, top_pick: Option<&str>, url: &str) -> String {
    let (season_label, greenhouse_suffix) = match settings.season {
        Season::Greenhouse => ("Greenhouse", " (Greenhouse mode)"),
        season => (season.as_str(), ""),
    };
    let profession_suffix = if settings.profession == Profession::Artisan {
        " (Artisan +40% goods)"
    } else {
        ""
    };

    format!(
        "{}, {} days left{}{}: best pick is {}. {}",
        season_label,
        settings.days_left,
        greenhouse_suffix,
        profession_suffix,
        top_pick.unwrap_or("a crop"),
        url
    )
}

/// Accepts a full share link or a bare query string and returns the query.
pub fn query_from_link(link: &str) -> &str {
    link.split_once('?').map_or(link, |(_, query)| query)
}

/// Applies a share-link query string on top of `base`. Unknown or malformed
/// values leave the corresponding setting alone, except the profession,
/// which resets to none unless the link asks for artisan.
pub fn parse_query(query: &str, base: PlannerSettings) -> PlannerSettings {
    let mut settings = base;
    let mut profession = None;
    let mut skill = None;

    for pair in query.trim_start_matches('?').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "season" => {
                if let Some(season) = Season::ALL.into_iter().find(|s| s.as_str() == value) {
                    settings.season = season;
                }
            }
            "daysLeft" => {
                if let Ok(days) = value.trim().parse::<i64>() {
                    settings.days_left = clamp_season_days(days);
                }
            }
            "profession" => {
                profession.get_or_insert(value);
            }
            "skill" => {
                skill.get_or_insert(value);
            }
            _ => {}
        }
    }

    settings.profession = match profession.or(skill) {
        Some("artisan") => Profession::Artisan,
        _ => Profession::None,
    };

    settings
}

pub fn multiplier_label(quality: QualityTier, has_tiller: bool) -> String {
    format!("x{:.2}", sell_price_multiplier(quality, has_tiller))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_artisan_only_when_selected() {
        let mut settings = PlannerSettings {
            season: Season::Summer,
            days_left: 15,
            ..Default::default()
        };
        assert_eq!(
            share_url("https://example.com/", &settings),
            "https://example.com/calculator?season=summer&daysLeft=15"
        );

        settings.profession = Profession::Artisan;
        assert_eq!(
            share_url("https://example.com", &settings),
            "https://example.com/calculator?season=summer&daysLeft=15&profession=artisan"
        );
    }

    #[test]
    fn text_labels_greenhouse_and_artisan() {
        let settings = PlannerSettings {
            season: Season::Greenhouse,
            days_left: 28,
            profession: Profession::Artisan,
            ..Default::default()
        };
        assert_eq!(
            share_text(&settings, Some("Starfruit"), "URL"),
            "Greenhouse, 28 days left (Greenhouse mode) (Artisan +40% goods): best pick is Starfruit. URL"
        );

        let plain = PlannerSettings::default();
        assert_eq!(
            share_text(&plain, None, "URL"),
            "spring, 28 days left: best pick is a crop. URL"
        );
    }

    #[test]
    fn query_restores_settings() {
        let parsed = parse_query(
            "?season=fall&daysLeft=10&profession=artisan",
            PlannerSettings::default(),
        );
        assert_eq!(parsed.season, Season::Fall);
        assert_eq!(parsed.days_left, 10);
        assert_eq!(parsed.profession, Profession::Artisan);
    }

    #[test]
    fn query_ignores_bad_values_and_clamps_days() {
        let base = PlannerSettings {
            season: Season::Summer,
            days_left: 12,
            profession: Profession::Agriculturist,
            ..Default::default()
        };

        let parsed = parse_query("season=monsoon&daysLeft=abc", base);
        assert_eq!(parsed.season, Season::Summer);
        assert_eq!(parsed.days_left, 12);
        assert_eq!(parsed.profession, Profession::None);

        assert_eq!(parse_query("daysLeft=400", base).days_left, 28);
        assert_eq!(parse_query("daysLeft=-3", base).days_left, 1);
    }

    #[test]
    fn full_links_are_reduced_to_their_query() {
        let link = "https://example.com/calculator?season=winter&daysLeft=3";
        assert_eq!(query_from_link(link), "season=winter&daysLeft=3");
        assert_eq!(query_from_link("daysLeft=3"), "daysLeft=3");

        let parsed = parse_query(query_from_link(link), PlannerSettings::default());
        assert_eq!(parsed.season, Season::Winter);
        assert_eq!(parsed.days_left, 3);
    }

    #[test]
    fn query_season_must_be_exact_lowercase() {
        let base = PlannerSettings::default();
        assert_eq!(parse_query("season=Fall", base).season, Season::Spring);
        assert_eq!(parse_query("season= fall ", base).season, Season::Spring);
        assert_eq!(parse_query("season=fall", base).season, Season::Fall);
    }

    #[test]
    fn legacy_skill_key_still_selects_artisan() {
        let parsed = parse_query("skill=artisan", PlannerSettings::default());
        assert_eq!(parsed.profession, Profession::Artisan);
    }

    #[test]
    fn multiplier_label_formats_two_decimals() {
        assert_eq!(multiplier_label(QualityTier::Normal, false), "x1.00");
        assert_eq!(multiplier_label(QualityTier::Gold, true), "x1.65");
        assert_eq!(multiplier_label(QualityTier::Iridium, true), "x2.20");
    }
}
