use rusqlite::Connection;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::model::{CropDefinition, Season};

const BUILTIN_CATALOG: &str = include_str!("../data/crops.json");

pub fn builtin_catalog() -> Result<Vec<CropDefinition>, CatalogError> {
    let crops: Vec<CropDefinition> = serde_json::from_str(BUILTIN_CATALOG)?;
    validate_catalog(&crops)?;
    Ok(crops)
}

pub fn load_catalog_json(path: &Path) -> Result<Vec<CropDefinition>, CatalogError> {
    let data = fs::read_to_string(path)?;
    let crops: Vec<CropDefinition> = serde_json::from_str(&data)?;
    validate_catalog(&crops)?;
    Ok(crops)
}

// Raw row as stored; seasons are a comma-separated list.
struct CropRow {
    id: String,
    name: String,
    seasons: String,
    seed_cost: u32,
    sell_price: u32,
    growth_days: u32,
    regrow_days: u32,
    regrows: bool,
    yield_per_harvest: Option<u32>,
}

pub fn load_catalog_db(db_path: &Path) -> Result<Vec<CropDefinition>, CatalogError> {
    let conn = Connection::open(db_path)?;

    let mut stmt = conn.prepare(
        "SELECT id, name, seasons, seed_cost, sell_price,
                growth_days, regrow_days, regrows, yield_per_harvest
         FROM crops
         ORDER BY name"
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(CropRow {
            id: row.get(0)?,
            name: row.get(1)?,
            seasons: row.get(2)?,
            seed_cost: row.get(3)?,
            sell_price: row.get(4)?,
            growth_days: row.get(5)?,
            regrow_days: row.get(6)?,
            regrows: row.get(7)?,
            yield_per_harvest: row.get(8)?,
        })
    })?;

    let mut crops = Vec::new();
    for row in rows {
        let row = row?;
        let seasons = parse_seasons(&row.seasons)?;
        crops.push(CropDefinition {
            id: row.id,
            name: row.name,
            seasons,
            seed_cost: row.seed_cost,
            sell_price: row.sell_price,
            growth_days: row.growth_days,
            regrow_days: row.regrow_days,
            regrows: row.regrows,
            yield_per_harvest: row.yield_per_harvest.unwrap_or(1),
        });
    }

    validate_catalog(&crops)?;
    Ok(crops)
}

fn parse_seasons(raw: &str) -> Result<Vec<Season>, CatalogError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Loads the catalog at `path`, picking the reader from the file extension.
/// Without a path the bundled catalog is used.
pub fn load_catalog(path: Option<&Path>) -> Result<Vec<CropDefinition>, CatalogError> {
    let Some(path) = path else {
        let crops = builtin_catalog()?;
        tracing::info!(crops = crops.len(), "loaded bundled crop catalog");
        return Ok(crops);
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let crops = match ext.as_str() {
        "json" => load_catalog_json(path)?,
        "db" | "sqlite" | "sqlite3" => load_catalog_db(path)?,
        _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
    };

    tracing::info!(path = %path.display(), crops = crops.len(), "loaded crop catalog");
    Ok(crops)
}

pub fn validate_catalog(crops: &[CropDefinition]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();

    for crop in crops {
        let reason = if crop.id.trim().is_empty() {
            Some("empty id")
        } else if !seen.insert(crop.id.as_str()) {
            Some("duplicate id")
        } else if crop.growth_days == 0 {
            Some("growth days must be positive")
        } else if crop.yield_per_harvest == 0 {
            Some("yield per harvest must be positive")
        } else {
            None
        };

        if let Some(reason) = reason {
            tracing::warn!(crop = %crop.id, reason, "rejected crop catalog entry");
            return Err(CatalogError::InvalidCrop {
                id: crop.id.clone(),
                reason: reason.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_catalog_is_valid() {
        let crops = builtin_catalog().unwrap();
        assert!(crops.len() > 30);
        let strawberry = crops.iter().find(|c| c.id == "strawberry").unwrap();
        assert!(strawberry.regrows);
        assert_eq!(strawberry.regrow_days, 4);
        let blueberry = crops.iter().find(|c| c.id == "blueberry").unwrap();
        assert_eq!(blueberry.yield_per_harvest, 3);
    }

    #[test]
    fn json_catalog_round_trips_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crops.json");
        fs::write(
            &path,
            r#"[{"id":"kale","name":"Kale","season":["spring"],"seedCost":70,
                 "sellPrice":110,"growthDays":6,"regrowDays":0,"isRegrowing":false}]"#,
        )
        .unwrap();

        let crops = load_catalog(Some(path.as_path())).unwrap();
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].sell_price, 110);
    }

    #[test]
    fn sqlite_catalog_parses_seasons_and_default_yield() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crops.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE crops (
                id TEXT PRIMARY KEY, name TEXT, seasons TEXT, seed_cost INTEGER,
                sell_price INTEGER, growth_days INTEGER, regrow_days INTEGER,
                regrows INTEGER, yield_per_harvest INTEGER
             );
             INSERT INTO crops VALUES ('corn', 'Corn', 'summer, fall', 150, 50, 14, 4, 1, NULL);
             INSERT INTO crops VALUES ('blueberry', 'Blueberry', 'summer', 80, 50, 13, 4, 1, 3);",
        )
        .unwrap();
        drop(conn);

        let crops = load_catalog(Some(path.as_path())).unwrap();
        assert_eq!(crops.len(), 2);
        assert_eq!(crops[0].id, "blueberry");
        assert_eq!(crops[1].seasons, vec![Season::Summer, Season::Fall]);
        assert_eq!(crops[1].yield_per_harvest, 1);
    }

    #[test]
    fn sqlite_catalog_rejects_unknown_season() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crops.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE crops (
                id TEXT, name TEXT, seasons TEXT, seed_cost INTEGER, sell_price INTEGER,
                growth_days INTEGER, regrow_days INTEGER, regrows INTEGER,
                yield_per_harvest INTEGER
             );
             INSERT INTO crops VALUES ('yam', 'Yam', 'autumn', 60, 160, 10, 0, 0, 1);",
        )
        .unwrap();
        drop(conn);

        assert!(matches!(
            load_catalog(Some(path.as_path())),
            Err(CatalogError::UnknownSeason(s)) if s == "autumn"
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_catalog(Some(Path::new("crops.csv"))).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }

    #[test]
    fn validation_rejects_duplicates_and_zero_growth() {
        let mut crops = builtin_catalog().unwrap();
        let first = crops[0].clone();
        crops.push(first);
        assert!(matches!(
            validate_catalog(&crops),
            Err(CatalogError::InvalidCrop { reason, .. }) if reason == "duplicate id"
        ));

        let mut broken = crops[0].clone();
        broken.growth_days = 0;
        assert!(matches!(
            validate_catalog(&[broken]),
            Err(CatalogError::InvalidCrop { .. })
        ));
    }

    #[test]
    fn regrowing_crop_without_regrow_days_loads_and_harvests_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crops.json");
        fs::write(
            &path,
            r#"[{"id":"x","name":"X","season":["summer"],"seedCost":40,
                 "sellPrice":80,"growthDays":8,"regrowDays":0,"isRegrowing":true}]"#,
        )
        .unwrap();

        let crops = load_catalog(Some(path.as_path())).unwrap();
        assert!(crops[0].regrows);
        assert_eq!(crops[0].regrow_days, 0);

        let result = crate::profit::calculate_season_profit(
            &crops[0],
            &crate::model::CalculationRequest {
                season_days: Some(28),
                ..Default::default()
            },
        );
        assert_eq!(result.harvest_count, 1);
    }
}
