use crate::{
    favorites::FavoriteStore,
    model::{BetterOption, CropDefinition, Profession, ProfitResult, QualityTier, Season},
    planner::{gold_ranks, rank_crops, sort_results, PlannerSettings, SortDirection, SortKey},
    share::{multiplier_label, share_text, share_url},
    stats::{summarize, SeasonSummary},
};
use eframe::egui;
use egui::{
    Color32, Context, FontFamily, FontId, Margin, RichText, Visuals, Stroke, Vec2
};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};
use std::collections::HashMap;

const INK: Color32 = Color32::from_rgb(74, 50, 30);
const ACCENT: Color32 = Color32::from_rgb(138, 91, 58);
const GAIN: Color32 = Color32::from_rgb(46, 125, 50);
const LOSS: Color32 = Color32::from_rgb(183, 28, 28);

const CHART_CROPS: usize = 10;

pub fn set_custom_style(ctx: &Context) {
    // Parchment and wood, like the in-game shipping menu
    let mut visuals = Visuals::light();

    visuals.panel_fill = Color32::from_rgb(243, 229, 191);
    visuals.window_fill = Color32::from_rgb(255, 248, 232);
    visuals.extreme_bg_color = Color32::from_rgb(255, 242, 200);
    visuals.faint_bg_color = Color32::from_rgb(247, 231, 185);
    visuals.override_text_color = Some(INK);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(255, 242, 200);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(184, 139, 99));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(252, 232, 177);
    visuals.widgets.hovered.bg_stroke = Stroke::new(2.0, ACCENT);

    visuals.widgets.active.bg_fill = Color32::from_rgb(247, 231, 185);
    visuals.widgets.active.bg_stroke = Stroke::new(2.0, Color32::from_rgb(94, 63, 36));

    visuals.selection.bg_fill = Color32::from_rgb(158, 215, 164);
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(94, 63, 36));

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = Margin::same(12);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);

    style.text_styles.insert(
        egui::TextStyle::Body,
        FontId::new(15.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        FontId::new(20.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        FontId::new(15.0, FontFamily::Proportional),
    );

    ctx.set_style(style);
}

pub struct PlannerApp {
    catalog: Vec<CropDefinition>,
    settings: PlannerSettings,
    site_origin: String,

    // Ranked by gold/day; `rows` is the filtered and sorted view of it
    results: Vec<ProfitResult>,
    rows: Vec<ProfitResult>,
    ranks: HashMap<String, usize>,
    summary: SeasonSummary,

    search: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    show_favorites_only: bool,
    selected_row: Option<usize>,

    favorites: FavoriteStore,
    status: Option<String>,
}

impl PlannerApp {
    pub fn new(
        catalog: Vec<CropDefinition>,
        settings: PlannerSettings,
        favorites: FavoriteStore,
        site_origin: String,
    ) -> Self {
        let mut app = Self {
            catalog,
            settings,
            site_origin,

            results: vec![],
            rows: vec![],
            ranks: HashMap::new(),
            summary: SeasonSummary::default(),

            search: String::new(),
            sort_key: SortKey::GoldPerDay,
            sort_direction: SortDirection::Descending,
            show_favorites_only: false,
            selected_row: None,

            favorites,
            status: None,
        };
        app.recompute();
        app
    }

    fn recompute(&mut self) {
        self.results = rank_crops(&self.catalog, &self.settings);
        self.summary = summarize(&self.results);
        self.ranks = gold_ranks(&self.results);
        self.apply_filters();
    }

    fn apply_filters(&mut self) {
        let mut rows = self.results.clone();

        if self.show_favorites_only {
            rows.retain(|r| self.favorites.is_favorite(&r.crop_id));
        }

        if !self.search.is_empty() {
            let search_lower = self.search.to_lowercase();
            rows.retain(|r| r.crop_name.to_lowercase().contains(&search_lower));
        }

        sort_results(&mut rows, self.sort_key, self.sort_direction);

        self.rows = rows;
        self.selected_row = None;
    }

    /// Clicking the active column flips direction, another column starts
    /// at its natural direction.
    fn click_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_direction = match self.sort_direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.sort_key = key;
            self.sort_direction = key.default_direction();
        }
        self.apply_filters();
    }

    // Selection is written first so a re-sort can clear it.
    fn apply_table_actions(
        &mut self,
        selected: Option<usize>,
        clicked_sort: Option<SortKey>,
        toggled: Option<String>,
    ) {
        self.selected_row = selected;
        if let Some(key) = clicked_sort {
            self.click_sort(key);
        }
        if let Some(crop_id) = toggled {
            self.toggle_favorite(&crop_id);
        }
    }

    fn toggle_favorite(&mut self, crop_id: &str) {
        self.favorites.toggle(crop_id);
        if let Err(e) = self.favorites.save() {
            tracing::warn!(error = %e, "could not save favorites");
            self.status = Some(format!("Could not save favorites: {e}"));
        }
        if self.show_favorites_only {
            self.apply_filters();
        }
    }

    fn current_share_url(&self) -> String {
        share_url(&self.site_origin, &self.settings)
    }

    fn current_share_text(&self) -> String {
        let top_pick = self.results.first().map(|r| r.crop_name.as_str());
        share_text(&self.settings, top_pick, &self.current_share_url())
    }

    fn sort_header(&self, ui: &mut egui::Ui, key: SortKey) -> bool {
        let arrow = if self.sort_key != key {
            ""
        } else if self.sort_direction == SortDirection::Ascending {
            " ↑"
        } else {
            " ↓"
        };
        ui.add(egui::Button::new(
            RichText::new(format!("{}{}", key.label(), arrow)).strong().color(INK),
        ).frame(false))
            .clicked()
    }

    fn top_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.heading(RichText::new("🌱 Stardew Crop Profit Planner")
                    .color(INK)
                    .strong()
                    .size(24.0)
                );
            });

            ui.add_space(4.0);
            ui.separator();

            ui.horizontal(|ui| {
                ui.label(RichText::new("Season:").strong());
                egui::ComboBox::from_id_salt("season")
                    .selected_text(self.settings.season.label())
                    .show_ui(ui, |ui| {
                        for season in Season::ALL {
                            ui.selectable_value(&mut self.settings.season, season, season.label());
                        }
                    });

                ui.separator();

                ui.label(RichText::new("Days left:").strong());
                ui.add(egui::DragValue::new(&mut self.settings.days_left)
                    .range(1..=28)
                    .speed(0.2));

                ui.separator();

                ui.label("🔎");
                let search_response = ui.add(
                    egui::TextEdit::singleline(&mut self.search)
                        .hint_text("Search crops...")
                        .desired_width(180.0)
                );
                if search_response.changed() {
                    self.apply_filters();
                }

                ui.separator();

                if ui.add_sized(
                    Vec2::new(130.0, 28.0),
                    egui::Button::new("🔗 Copy result link"),
                ).clicked() {
                    ui.ctx().copy_text(self.current_share_url());
                    self.status = Some("Copied link".into());
                }
                if ui.add_sized(
                    Vec2::new(130.0, 28.0),
                    egui::Button::new("✍ Copy share text"),
                ).clicked() {
                    ui.ctx().copy_text(self.current_share_text());
                    self.status = Some("Copied share text".into());
                }

                if let Some(status) = &self.status {
                    ui.label(RichText::new(status).italics().small());
                }
            });

            ui.add_space(2.0);
        });
    }

    fn settings_panel(&mut self, ctx: &Context) {
        egui::SidePanel::right("settings")
            .min_width(240.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                ui.heading(RichText::new("🌾 Crop Settings").color(INK));
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.label(RichText::new("Quality").strong());
                    ui.horizontal_wrapped(|ui| {
                        for quality in QualityTier::ALL {
                            ui.selectable_value(&mut self.settings.quality, quality, quality.label());
                        }
                    });

                    ui.add_space(8.0);
                    ui.checkbox(&mut self.settings.has_tiller, "👨‍🌾 Tiller (+10% crop price)");

                    ui.label(RichText::new(format!(
                        "Current multiplier: {}",
                        multiplier_label(self.settings.quality, self.settings.has_tiller)
                    )).small());

                    ui.add_space(8.0);
                    ui.separator();

                    ui.label(RichText::new("Profession").strong());
                    for profession in Profession::ALL {
                        ui.radio_value(&mut self.settings.profession, profession, profession.label());
                    }

                    ui.add_space(8.0);
                    ui.checkbox(&mut self.settings.use_processed_goods, "🍷 Sell as artisan goods");

                    ui.add_space(8.0);
                    ui.separator();

                    ui.label(RichText::new("📊 Sort By").strong());
                    let mut sort_changed = false;
                    egui::ComboBox::from_id_salt("sort_by")
                        .selected_text(self.sort_key.label())
                        .show_ui(ui, |ui| {
                            for key in SortKey::ALL {
                                if ui.selectable_value(&mut self.sort_key, key, key.label()).clicked() {
                                    sort_changed = true;
                                }
                            }
                        });

                    ui.horizontal(|ui| {
                        if ui.selectable_value(&mut self.sort_direction, SortDirection::Descending, "⬇ Desc")
                            .clicked()
                        {
                            sort_changed = true;
                        }
                        if ui.selectable_value(&mut self.sort_direction, SortDirection::Ascending, "⬆ Asc")
                            .clicked()
                        {
                            sort_changed = true;
                        }
                    });

                    ui.add_space(8.0);
                    if ui.checkbox(&mut self.show_favorites_only, "⭐ Show Favorites Only")
                        .changed()
                    {
                        sort_changed = true;
                    }

                    if sort_changed {
                        self.apply_filters();
                    }

                    ui.add_space(8.0);
                    ui.separator();

                    if ui.button(RichText::new("🔄 Reset").color(LOSS)).clicked() {
                        self.settings = PlannerSettings {
                            season: self.settings.season,
                            days_left: self.settings.days_left,
                            ..Default::default()
                        };
                        self.sort_key = SortKey::GoldPerDay;
                        self.sort_direction = SortDirection::Descending;
                        self.show_favorites_only = false;
                        self.search.clear();
                        self.apply_filters();
                    }

                    ui.add_space(12.0);
                    ui.separator();
                    self.summary_block(ui);
                });
            });
    }

    fn summary_block(&self, ui: &mut egui::Ui) {
        let s = &self.summary;
        ui.label(RichText::new("Season summary").strong());
        ui.label(format!("Crops: {} ({} profitable)", s.crop_count, s.profitable_count));
        ui.label(format!("Mean gold/day: {:.2}", s.mean_gold_per_day));
        ui.label(format!("Median gold/day: {:.2}", s.median_gold_per_day));
        ui.label(format!("Std dev: {:.2}", s.std_dev_gold_per_day));
        ui.label(format!("Kegs beat jars for {} crops", s.kegs_preferred));
        if let Some((name, gold)) = &s.best {
            ui.label(RichText::new(format!("Best pick: {name} ({gold:.2}g/day)")).color(GAIN).strong());
        }
    }

    fn chart_panel(&self, ctx: &Context) {
        egui::TopBottomPanel::bottom("chart")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                ui.label(RichText::new("Top crops by gold/day").strong());

                let bars: Vec<Bar> = self.results
                    .iter()
                    .take(CHART_CROPS)
                    .enumerate()
                    .map(|(i, r)| {
                        Bar::new(i as f64, r.gold_per_day)
                            .name(&r.crop_name)
                            .fill(if r.gold_per_day >= 0.0 { GAIN } else { LOSS })
                    })
                    .collect();

                Plot::new("gold_per_day")
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .show(ui, |plot_ui| {
                        plot_ui.bar_chart(BarChart::new("Gold/Day", bars).width(0.6));
                    });
            });
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let before = self.settings;

        self.top_bar(ctx);
        self.settings_panel(ctx);
        self.chart_panel(ctx);

        let mut clicked_sort = None;
        let mut toggled = None;
        let mut selected = self.selected_row;

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.rows.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(60.0);
                        ui.label(RichText::new("🌾").size(60.0));
                        ui.add_space(10.0);
                        let message = if self.results.is_empty() {
                            "Nothing grows outdoors this season. Try the greenhouse."
                        } else {
                            "No crops match your filters"
                        };
                        ui.label(RichText::new(message).size(20.0));
                    });
                });
                return;
            }

            TableBuilder::new(ui)
                .striped(true)
                .vscroll(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::exact(36.0))   // Favorite
                .column(Column::remainder().at_least(170.0).clip(true))  // Crop
                .column(Column::exact(90.0))   // Harvests
                .column(Column::exact(100.0))  // Revenue
                .column(Column::exact(100.0))  // Profit
                .column(Column::exact(100.0))  // Gold/Day
                .column(Column::exact(100.0))  // Kegs
                .column(Column::exact(100.0))  // Jars
                .column(Column::exact(120.0))  // Better
                .column(Column::exact(44.0))   // Copy
                .header(30.0, |mut header| {
                    header.col(|ui| {
                        ui.label(RichText::new("★").color(ACCENT).size(18.0));
                    });
                    for key in [
                        SortKey::CropName,
                        SortKey::HarvestCount,
                        SortKey::TotalRevenue,
                        SortKey::TotalProfit,
                        SortKey::GoldPerDay,
                    ] {
                        header.col(|ui| {
                            if self.sort_header(ui, key) {
                                clicked_sort = Some(key);
                            }
                        });
                    }
                    header.col(|ui| { ui.strong("Kegs"); });
                    header.col(|ui| { ui.strong("Jars"); });
                    header.col(|ui| { ui.strong("Process in"); });
                    header.col(|ui| { ui.label("📋"); });
                })
                .body(|body| {
                    body.rows(32.0, self.rows.len(), |mut row| {
                        let i = row.index();
                        let r = &self.rows[i];
                        let is_selected = selected == Some(i);
                        let is_favorite = self.favorites.is_favorite(&r.crop_id);
                        let rank = self.ranks.get(&r.crop_id).copied();

                        row.col(|ui| {
                            if ui.button(RichText::new(if is_favorite { "★" } else { "☆" })
                                .color(if is_favorite { ACCENT } else { Color32::GRAY }))
                                .clicked()
                            {
                                toggled = Some(r.crop_id.clone());
                            }
                        });

                        row.col(|ui| {
                            let medal = match rank {
                                Some(1) => "🥇 ",
                                Some(2) => "🥈 ",
                                Some(3) => "🥉 ",
                                _ => "",
                            };
                            let mut text = RichText::new(format!("{medal}{}", r.crop_name));
                            if is_selected || rank == Some(1) {
                                text = text.strong();
                            }
                            if ui.selectable_label(is_selected, text).clicked() {
                                selected = if is_selected { None } else { Some(i) };
                            }
                        });

                        row.col(|ui| {
                            ui.label(r.harvest_count.to_string());
                        });

                        row.col(|ui| {
                            ui.label(format_gold(r.total_revenue));
                        });

                        row.col(|ui| {
                            ui.label(RichText::new(format_gold(r.total_profit))
                                .color(profit_color(r.total_profit)));
                        });

                        row.col(|ui| {
                            ui.label(RichText::new(format!("{:.2}", r.gold_per_day))
                                .color(profit_color(r.gold_per_day))
                                .strong());
                        });

                        row.col(|ui| {
                            ui.label(format_gold(r.processed_goods.kegs));
                        });

                        row.col(|ui| {
                            ui.label(format_gold(r.processed_goods.preserves_jars));
                        });

                        row.col(|ui| {
                            let label = match r.processed_goods.better_option {
                                BetterOption::Kegs => "🍺 Kegs",
                                BetterOption::PreservesJars => "🫙 Jars",
                                BetterOption::Same => "= Same",
                            };
                            ui.label(label)
                                .on_hover_text(r.processed_goods.better_option.label());
                        });

                        row.col(|ui| {
                            if ui.button("📋").on_hover_text("Copy crop details").clicked() {
                                ui.ctx().copy_text(crop_details(r));
                            }
                        });
                    });
                });
        });

        self.apply_table_actions(selected, clicked_sort, toggled);

        if self.settings != before {
            self.status = None;
            self.recompute();
        }
    }
}

fn profit_color(value: f64) -> Color32 {
    if value > 0.0 {
        GAIN
    } else if value < 0.0 {
        LOSS
    } else {
        INK
    }
}

fn crop_details(r: &ProfitResult) -> String {
    format!(
        "{}:\nHarvests: {}\nRevenue: {}\nProfit: {}\nGold/Day: {:.2}\nKegs: {}\nPreserves Jars: {}\nBetter: {}",
        r.crop_name,
        r.harvest_count,
        format_gold(r.total_revenue),
        format_gold(r.total_profit),
        r.gold_per_day,
        format_gold(r.processed_goods.kegs),
        format_gold(r.processed_goods.preserves_jars),
        r.processed_goods.better_option.label(),
    )
}

fn format_gold(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.2}Mg", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}Kg", value / 1_000.0)
    } else {
        format!("{:.0}g", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_click_clears_selection() {
        let catalog = crate::loader::builtin_catalog().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let favorites = FavoriteStore::empty(dir.path().join("favorites.json"));
        let mut app = PlannerApp::new(
            catalog,
            PlannerSettings::default(),
            favorites,
            "https://example.com".into(),
        );

        app.apply_table_actions(Some(2), None, None);
        assert_eq!(app.selected_row, Some(2));

        app.apply_table_actions(Some(2), Some(SortKey::CropName), None);
        assert_eq!(app.selected_row, None);
    }

    #[test]
    fn gold_formatting_scales_and_keeps_sign() {
        assert_eq!(format_gold(250.0), "250g");
        assert_eq!(format_gold(-50.0), "-50g");
        assert_eq!(format_gold(12_345.0), "12.3Kg");
        assert_eq!(format_gold(2_500_000.0), "2.50Mg");
    }

    #[test]
    fn details_include_processing_choice() {
        let text = crop_details(&ProfitResult {
            crop_id: "melon".into(),
            crop_name: "Melon".into(),
            harvest_count: 2,
            total_revenue: 500.0,
            total_profit: 340.0,
            gold_per_day: 340.0 / 28.0,
            processed_goods: crate::model::ProcessedGoodsComparison {
                kegs: 1340.0,
                preserves_jars: 965.0,
                better_option: BetterOption::Kegs,
            },
        });
        assert!(text.starts_with("Melon:\nHarvests: 2"));
        assert!(text.ends_with("Better: Kegs"));
    }
}
