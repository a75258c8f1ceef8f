//! Dataset-derived normalization bounds.
//!
//! Each metric is bounded by its 5th and 95th percentile so that a handful of
//! extreme products does not flatten everyone else's scores. Metrics with no
//! observations fall back to fixed bounds.

use crate::types::product::{ProductAttributes, ProductBasics};
use crate::types::scoring::{Bounds, MetricBounds, Stats};
use serde::{Deserialize, Serialize};

pub const LOWER_PERCENTILE: f64 = 5.0;
pub const UPPER_PERCENTILE: f64 = 95.0;

/// Number of usable observations behind each metric's bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCounts {
    pub sugar: usize,
    pub sat_fat: usize,
    pub additives: usize,
    pub price: usize,
}

/// Linear-interpolated percentile of an ascending slice, `None` when empty.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let weight = idx - lo as f64;
    Some(sorted[lo] * (1.0 - weight) + sorted[hi] * weight)
}

fn sorted_finite(values: impl Iterator<Item = Option<f64>>) -> Vec<f64> {
    let mut observed: Vec<f64> = values.flatten().filter(|value| value.is_finite()).collect();
    observed.sort_by(f64::total_cmp);
    observed
}

fn metric_bounds(sorted: &[f64], fallback: MetricBounds) -> MetricBounds {
    match (
        percentile(sorted, LOWER_PERCENTILE),
        percentile(sorted, UPPER_PERCENTILE),
    ) {
        (Some(min), Some(max)) => MetricBounds::new(min, max),
        _ => fallback,
    }
    .widened()
}

pub fn compute_dataset_stats(attributes: &[ProductAttributes], basics: &[ProductBasics]) -> Stats {
    let sugar = sorted_finite(attributes.iter().map(|a| a.sugar_g_per_100ml));
    let sat_fat = sorted_finite(attributes.iter().map(|a| a.sat_fat_g_per_100ml));
    let additives = sorted_finite(attributes.iter().map(|a| a.additives_count));
    let price = sorted_finite(basics.iter().map(|b| Some(b.unit_price_gbp_per_litre)));

    let bounds = Bounds {
        sugar: metric_bounds(&sugar, Bounds::FALLBACK_SUGAR),
        sat_fat: metric_bounds(&sat_fat, Bounds::FALLBACK_SAT_FAT),
        additives: metric_bounds(&additives, Bounds::FALLBACK_ADDITIVES),
        price: metric_bounds(&price, Bounds::FALLBACK_PRICE),
    };
    tracing::debug!(
        sugar = sugar.len(),
        sat_fat = sat_fat.len(),
        additives = additives.len(),
        price = price.len(),
        "computed dataset bounds"
    );

    Stats { bounds }
}

fn count_finite(values: impl Iterator<Item = Option<f64>>) -> usize {
    values.flatten().filter(|value| value.is_finite()).count()
}

pub fn observed_counts(attributes: &[ProductAttributes], basics: &[ProductBasics]) -> MetricCounts {
    MetricCounts {
        sugar: count_finite(attributes.iter().map(|a| a.sugar_g_per_100ml)),
        sat_fat: count_finite(attributes.iter().map(|a| a.sat_fat_g_per_100ml)),
        additives: count_finite(attributes.iter().map(|a| a.additives_count)),
        price: count_finite(basics.iter().map(|b| Some(b.unit_price_gbp_per_litre))),
    }
}
