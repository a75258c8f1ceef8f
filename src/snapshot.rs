//! Persisted statistics so that repeated runs over an unchanged dataset can
//! skip recomputing bounds.

use crate::catalog::{attributes_path, products_path, Catalog};
use crate::error::{PlanitError, Result};
use crate::scoring::stats::MetricCounts;
use crate::types::scoring::Stats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub dataset_digest: String,
    pub observed: MetricCounts,
    pub stats: Stats,
}

impl StatsSnapshot {
    pub fn new(catalog: &Catalog, dataset_digest: String) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            dataset_digest,
            observed: catalog.observed_counts(),
            stats: catalog.stats(),
        }
    }

    pub fn is_current(&self, dataset_digest: &str) -> bool {
        self.dataset_digest == dataset_digest
    }
}

/// SHA-256 over `products.csv` followed by `attributes.csv`.
pub fn dataset_digest(dir: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    for path in [products_path(dir), attributes_path(dir)] {
        let bytes = fs::read(&path).map_err(PlanitError::Io)?;
        hasher.update(&bytes);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

pub fn write_snapshot(path: &Path, snapshot: &StatsSnapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(PlanitError::Io)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).map_err(PlanitError::Io)?;
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<StatsSnapshot> {
    let content = fs::read_to_string(path)
        .map_err(|e| PlanitError::Snapshot(format!("{}: {}", path.display(), e)))?;
    let snapshot: StatsSnapshot = serde_json::from_str(&content)
        .map_err(|e| PlanitError::Snapshot(format!("{}: {}", path.display(), e)))?;

    let bounds = &snapshot.stats.bounds;
    for (name, metric) in [
        ("sugar", bounds.sugar),
        ("sat_fat", bounds.sat_fat),
        ("additives", bounds.additives),
        ("price", bounds.price),
    ] {
        if metric.max <= metric.min {
            return Err(PlanitError::Snapshot(format!(
                "{}: {name} bounds must satisfy max > min",
                path.display()
            )));
        }
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ATTRIBUTES_FILE, PRODUCTS_FILE};
    use crate::types::product::{ProductAttributes, ProductBasics};
    use tempfile::TempDir;

    fn sample_catalog() -> Catalog {
        let products = vec![
            ProductBasics {
                product_id: "a".into(),
                unit_price_gbp_per_litre: 1.2,
                ..ProductBasics::default()
            },
            ProductBasics {
                product_id: "b".into(),
                unit_price_gbp_per_litre: 2.6,
                ..ProductBasics::default()
            },
        ];
        let attributes = vec![ProductAttributes {
            product_id: "a".into(),
            sugar_g_per_100ml: Some(3.0),
            ..ProductAttributes::default()
        }];
        Catalog::new(products, attributes).expect("catalog should build")
    }

    #[test]
    fn snapshot_survives_write_and_read() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("snapshots/stats.json");
        let snapshot = StatsSnapshot::new(&sample_catalog(), "abc".to_string());

        write_snapshot(&path, &snapshot).expect("snapshot should write");
        let loaded = read_snapshot(&path).expect("snapshot should read");
        assert_eq!(loaded.dataset_digest, "abc");
        assert_eq!(loaded.generated_at, snapshot.generated_at);
        assert_eq!(loaded.stats.bounds.sugar.min, 3.0);
        assert_eq!(loaded.stats.bounds.sugar.max, 4.0);
        assert!((loaded.stats.bounds.price.min - snapshot.stats.bounds.price.min).abs() < 1e-9);
        assert_eq!(loaded.observed.price, 2);
        assert_eq!(loaded.observed.sat_fat, 0);
    }

    #[test]
    fn digest_tracks_dataset_changes() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join(PRODUCTS_FILE), "product_id\n").expect("products should write");
        fs::write(dir.path().join(ATTRIBUTES_FILE), "product_id\n")
            .expect("attributes should write");

        let before = dataset_digest(dir.path()).expect("digest should compute");
        assert_eq!(before.len(), 64);
        let snapshot = StatsSnapshot::new(&sample_catalog(), before.clone());
        assert!(snapshot.is_current(&before));

        fs::write(dir.path().join(ATTRIBUTES_FILE), "product_id\nx\n")
            .expect("attributes should write");
        let after = dataset_digest(dir.path()).expect("digest should compute");
        assert!(!snapshot.is_current(&after));
    }

    #[test]
    fn read_rejects_collapsed_bounds() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("stats.json");
        let mut snapshot = StatsSnapshot::new(&sample_catalog(), "abc".to_string());
        snapshot.stats.bounds.price.max = snapshot.stats.bounds.price.min;
        write_snapshot(&path, &snapshot).expect("snapshot should write");

        let err = read_snapshot(&path).expect_err("collapsed bounds should be rejected");
        assert!(err.to_string().contains("price"));
    }
}
