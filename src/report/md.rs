use crate::report::{ProductReport, RankingReport};
use crate::snapshot::StatsSnapshot;
use crate::types::scoring::{Bounds, QualityFlag};

fn flag_label(flag: QualityFlag) -> &'static str {
    match flag {
        QualityFlag::Ok => "ok",
        QualityFlag::Imputed => "imputed",
        QualityFlag::Partial => "partial",
    }
}

fn push_bounds(output: &mut String, bounds: &Bounds) {
    output.push_str("| metric | min | max |\n|---|---|---|\n");
    for (name, metric) in [
        ("sugar (g/100ml)", bounds.sugar),
        ("sat fat (g/100ml)", bounds.sat_fat),
        ("additives", bounds.additives),
        ("price (GBP/L)", bounds.price),
    ] {
        output.push_str(&format!("| {name} | {:.3} | {:.3} |\n", metric.min, metric.max));
    }
}

pub fn ranking_to_markdown(report: &RankingReport<'_>) -> String {
    let mut output = String::new();
    output.push_str("# PlanIt Ranking\n\n");

    if report.rows.is_empty() {
        output.push_str("- none\n\n");
    } else {
        output.push_str(
            "| # | product | retailer | GBP/L | planit | health | sustainability | price | quality |\n",
        );
        output.push_str("|---|---|---|---|---|---|---|---|---|\n");
        for row in &report.rows {
            output.push_str(&format!(
                "| {} | {} {} | {} | {:.2} | {} | {} | {} | {} | {} |\n",
                row.rank,
                row.brand,
                row.product_name,
                row.retailer,
                row.unit_price_gbp_per_litre,
                row.planit_score,
                row.health_score,
                row.sustainability_score,
                row.price_score,
                flag_label(row.quality_flag)
            ));
        }
        output.push('\n');
    }

    if !report.skipped.is_empty() {
        output.push_str("## Skipped\n\n");
        for product_id in &report.skipped {
            output.push_str(&format!("- {product_id}: no attributes\n"));
        }
        output.push('\n');
    }

    output.push_str("## Bounds\n\n");
    push_bounds(&mut output, &report.bounds);
    output
}

pub fn product_to_markdown(report: &ProductReport<'_>) -> String {
    let basics = report.product;
    let scores = &report.scores;
    let breakdown = &scores.breakdown;

    let mut output = String::new();
    output.push_str(&format!("# {} - {}\n\n", basics.brand, basics.product_name));
    output.push_str(&format!(
        "Retailer: {} | GBP/L: {:.2}\n\n",
        basics.retailer, basics.unit_price_gbp_per_litre
    ));
    output.push_str("## Scores\n\n");
    output.push_str(&format!("- PlanIt: {}\n", scores.planit_score));
    output.push_str(&format!(
        "- Health: {} (sugar {}, sat fat {}, additives {})\n",
        scores.health_score, breakdown.sugar, breakdown.sat_fat, breakdown.additives
    ));
    output.push_str(&format!(
        "- Sustainability: {} (packaging {}, origin {}, certs {})\n",
        scores.sustainability_score, breakdown.packaging, breakdown.origin, breakdown.certs
    ));
    output.push_str(&format!("- Price: {}\n", scores.price_score));
    output.push_str(&format!("- Data quality: {}\n\n", flag_label(scores.quality_flag)));

    output.push_str("## Bounds\n\n");
    push_bounds(&mut output, &report.bounds);
    output
}

pub fn stats_to_markdown(snapshot: &StatsSnapshot) -> String {
    let mut output = String::new();
    output.push_str("# Dataset Statistics\n\n");
    output.push_str(&format!("Generated: {}\n\n", snapshot.generated_at.to_rfc3339()));
    output.push_str(&format!("Dataset digest: {}\n\n", snapshot.dataset_digest));
    output.push_str("## Observations\n\n");
    output.push_str(&format!(
        "- sugar: {}\n- sat fat: {}\n- additives: {}\n- price: {}\n\n",
        snapshot.observed.sugar,
        snapshot.observed.sat_fat,
        snapshot.observed.additives,
        snapshot.observed.price
    ));
    output.push_str("## Bounds\n\n");
    push_bounds(&mut output, &snapshot.stats.bounds);
    output
}
