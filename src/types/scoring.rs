use serde::{Deserialize, Serialize};

pub type Score = f64;

/// Normalization range of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBounds {
    pub min: f64,
    pub max: f64,
}

impl MetricBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Widens a collapsed range so that `max > min` holds.
    pub fn widened(self) -> Self {
        if self.max <= self.min {
            Self::new(self.min, self.min + 1.0)
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub sugar: MetricBounds,
    pub sat_fat: MetricBounds,
    pub additives: MetricBounds,
    pub price: MetricBounds,
}

impl Bounds {
    pub const FALLBACK_SUGAR: MetricBounds = MetricBounds::new(0.0, 10.0);
    pub const FALLBACK_SAT_FAT: MetricBounds = MetricBounds::new(0.0, 5.0);
    pub const FALLBACK_ADDITIVES: MetricBounds = MetricBounds::new(0.0, 5.0);
    pub const FALLBACK_PRICE: MetricBounds = MetricBounds::new(1.0, 3.0);

    pub const fn fallback() -> Self {
        Self {
            sugar: Self::FALLBACK_SUGAR,
            sat_fat: Self::FALLBACK_SAT_FAT,
            additives: Self::FALLBACK_ADDITIVES,
            price: Self::FALLBACK_PRICE,
        }
    }
}

/// Dataset-wide normalization context shared by every product of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub bounds: Bounds,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            bounds: Bounds::fallback(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityFlag {
    Ok,
    Imputed,
    /// Reserved; no scoring path produces it yet.
    Partial,
}

/// Named sub-scores kept for explainability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub sugar: Score,
    pub sat_fat: Score,
    pub additives: Score,
    pub packaging: Score,
    pub origin: Score,
    pub certs: Score,
    pub price_norm: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub health_score: i64,
    pub sustainability_score: i64,
    pub price_score: i64,
    pub planit_score: i64,
    pub breakdown: Breakdown,
    pub quality_flag: QualityFlag,
}
