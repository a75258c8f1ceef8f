pub mod json;
pub mod md;

use crate::error::PlanitError;
use crate::scoring::ScoredProduct;
use crate::snapshot::StatsSnapshot;
use crate::types::product::{ProductAttributes, ProductBasics};
use crate::types::scoring::{Bounds, QualityFlag, Scores};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingRow<'a> {
    pub rank: usize,
    pub product_id: &'a str,
    pub retailer: &'a str,
    pub brand: &'a str,
    pub product_name: &'a str,
    pub unit_price_gbp_per_litre: f64,
    pub planit_score: i64,
    pub health_score: i64,
    pub sustainability_score: i64,
    pub price_score: i64,
    pub quality_flag: QualityFlag,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub bounds: Bounds,
    pub rows: Vec<RankingRow<'a>>,
    pub skipped: Vec<&'a str>,
}

impl<'a> RankingReport<'a> {
    pub fn new(ranked: &[ScoredProduct<'a>], bounds: Bounds, skipped: Vec<&'a str>) -> Self {
        let rows = ranked
            .iter()
            .enumerate()
            .map(|(index, product)| RankingRow {
                rank: index + 1,
                product_id: &product.basics.product_id,
                retailer: &product.basics.retailer,
                brand: &product.basics.brand,
                product_name: &product.basics.product_name,
                unit_price_gbp_per_litre: product.basics.unit_price_gbp_per_litre,
                planit_score: product.scores.planit_score,
                health_score: product.scores.health_score,
                sustainability_score: product.scores.sustainability_score,
                price_score: product.scores.price_score,
                quality_flag: product.scores.quality_flag,
            })
            .collect();
        Self {
            generated_at: Utc::now(),
            bounds,
            rows,
            skipped,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductReport<'a> {
    pub product: &'a ProductBasics,
    pub attributes: &'a ProductAttributes,
    pub scores: Scores,
    pub bounds: Bounds,
}

pub fn render_ranking(
    report: &RankingReport<'_>,
    format: OutputFormat,
) -> Result<String, PlanitError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(PlanitError::Json),
        OutputFormat::Md => Ok(md::ranking_to_markdown(report)),
    }
}

pub fn render_product(
    report: &ProductReport<'_>,
    format: OutputFormat,
) -> Result<String, PlanitError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(PlanitError::Json),
        OutputFormat::Md => Ok(md::product_to_markdown(report)),
    }
}

pub fn render_stats(snapshot: &StatsSnapshot, format: OutputFormat) -> Result<String, PlanitError> {
    match format {
        OutputFormat::Json => json::to_json(snapshot).map_err(PlanitError::Json),
        OutputFormat::Md => Ok(md::stats_to_markdown(snapshot)),
    }
}
