pub mod classify;
pub mod normalize;
pub mod stats;

use crate::catalog::Catalog;
use crate::types::config::ScoringConfig;
use crate::types::product::{ProductAttributes, ProductBasics};
use crate::types::scoring::{Breakdown, MetricBounds, QualityFlag, Scores, Stats};
use normalize::normalize_lower_better;
use rayon::prelude::*;
use serde::Serialize;

/// Observed value, or the bound midpoint when the value is absent.
fn resolve(value: Option<f64>, bounds: MetricBounds) -> (f64, bool) {
    match value.filter(|v| v.is_finite()) {
        Some(observed) => (observed, false),
        None => (bounds.midpoint(), true),
    }
}

fn round_score(value: f64) -> i64 {
    value.round() as i64
}

/// Scores one product. Without `stats` the fixed fallback bounds apply.
pub fn score_product(
    basics: &ProductBasics,
    attrs: &ProductAttributes,
    config: &ScoringConfig,
    stats: Option<&Stats>,
) -> Scores {
    let bounds = stats.copied().unwrap_or_default().bounds;
    let weights = &config.weights;

    let (sugar, sugar_imputed) = resolve(attrs.sugar_g_per_100ml, bounds.sugar);
    let (sat_fat, sat_fat_imputed) = resolve(attrs.sat_fat_g_per_100ml, bounds.sat_fat);
    let (additives, additives_imputed) = resolve(attrs.additives_count, bounds.additives);
    let (unit_price, price_imputed) = resolve(Some(basics.unit_price_gbp_per_litre), bounds.price);
    let quality_flag = if sugar_imputed || sat_fat_imputed || additives_imputed || price_imputed {
        QualityFlag::Imputed
    } else {
        QualityFlag::Ok
    };

    let health_sugar = normalize_lower_better(sugar, bounds.sugar.min, bounds.sugar.max);
    let health_sat_fat = normalize_lower_better(sat_fat, bounds.sat_fat.min, bounds.sat_fat.max);
    let health_additives =
        normalize_lower_better(additives, bounds.additives.min, bounds.additives.max);
    let health = weights.health.sugar * health_sugar
        + weights.health.sat_fat * health_sat_fat
        + weights.health.additives * health_additives;

    let packaging = classify::packaging_score(attrs, config);
    let origin = config
        .origin_scale
        .value_for(classify::origin_tier(&attrs.country_of_origin));
    let certs = classify::certification_points(&attrs.certifications);
    let sustainability = weights.sustainability.packaging * packaging
        + weights.sustainability.origin * origin
        + weights.sustainability.certs * certs;

    let price = normalize_lower_better(unit_price, bounds.price.min, bounds.price.max);

    let planit = weights.overall.sustainability * sustainability
        + weights.overall.health * health
        + weights.overall.price * price;

    Scores {
        health_score: round_score(health),
        sustainability_score: round_score(sustainability),
        price_score: round_score(price),
        planit_score: round_score(planit),
        breakdown: Breakdown {
            sugar: health_sugar.round(),
            sat_fat: health_sat_fat.round(),
            additives: health_additives.round(),
            packaging,
            origin,
            certs,
            price_norm: price.round(),
        },
        quality_flag,
    }
}

/// Computes dataset bounds from the full collections, then scores one product.
pub fn score_product_with_stats(
    basics: &ProductBasics,
    attrs: &ProductAttributes,
    config: &ScoringConfig,
    all_basics: &[ProductBasics],
    all_attrs: &[ProductAttributes],
) -> Scores {
    let stats = stats::compute_dataset_stats(all_attrs, all_basics);
    score_product(basics, attrs, config, Some(&stats))
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredProduct<'a> {
    pub basics: &'a ProductBasics,
    pub attributes: &'a ProductAttributes,
    pub scores: Scores,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogScores<'a> {
    pub scored: Vec<ScoredProduct<'a>>,
    /// Products skipped because no attribute row exists for them.
    pub skipped: Vec<&'a str>,
}

impl CatalogScores<'_> {
    pub fn imputed_count(&self) -> usize {
        self.scored
            .iter()
            .filter(|product| product.scores.quality_flag == QualityFlag::Imputed)
            .count()
    }
}

/// Scores every product of the catalog against one shared stats snapshot.
pub fn score_catalog<'a>(
    catalog: &'a Catalog,
    config: &ScoringConfig,
    stats: &Stats,
) -> CatalogScores<'a> {
    let scored: Vec<ScoredProduct<'a>> = catalog
        .products()
        .par_iter()
        .filter_map(|basics| {
            let attributes = catalog.attributes_for(&basics.product_id)?;
            Some(ScoredProduct {
                basics,
                attributes,
                scores: score_product(basics, attributes, config, Some(stats)),
            })
        })
        .collect();

    let skipped = catalog.products_without_attributes();
    for product_id in &skipped {
        tracing::warn!(product_id, "skipping product without attributes");
    }

    let result = CatalogScores { scored, skipped };
    tracing::debug!(
        scored = result.scored.len(),
        skipped = result.skipped.len(),
        imputed = result.imputed_count(),
        "scored catalog"
    );
    result
}
