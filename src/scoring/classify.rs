use crate::types::config::{Certification, OriginTier, PackagingMaterial, ScoringConfig};
use crate::types::product::ProductAttributes;
use std::collections::BTreeSet;

const HOME_COUNTRY: &str = "UK";
const NEIGHBOR_COUNTRIES: [&str; 2] = ["IE", "GB-IE"];

/// EU member states, matched after the home and neighbor codes.
const INTRA_EUROPE: [&str; 27] = [
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT", "LV",
    "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

/// Classifies the first comma-separated material of a packaging description.
pub fn primary_material(materials: &str) -> PackagingMaterial {
    let first = materials
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    if first.is_empty() {
        PackagingMaterial::Other
    } else if first.contains("tetra") {
        PackagingMaterial::TetraPack
    } else if first.contains("hdpe") {
        PackagingMaterial::Hdpe
    } else if first.contains("glass") {
        PackagingMaterial::Glass
    } else if first.contains("pet") {
        PackagingMaterial::Pet
    } else {
        PackagingMaterial::Named(first)
    }
}

/// Base points for the primary material plus the recyclability bonus, in 0..=100.
pub fn packaging_score(attrs: &ProductAttributes, config: &ScoringConfig) -> f64 {
    let material = primary_material(&attrs.packaging_materials);
    let base = config.packaging_base.base_for(&material);
    let bonus = config.recyclability_bonus.bonus_for(attrs.recyclability);
    (base + bonus).clamp(0.0, 100.0)
}

/// Distinct recognised certifications in a `;`-separated list.
pub fn certifications(list: &str) -> BTreeSet<Certification> {
    list.split(';')
        .map(|token| token.trim().to_lowercase())
        .filter_map(|token| Certification::parse(&token))
        .collect()
}

pub fn certification_points(list: &str) -> f64 {
    certifications(list)
        .into_iter()
        .map(Certification::points)
        .fold(0.0, |total, points| total + points)
        .clamp(0.0, Certification::MAX_POINTS)
}

pub fn origin_tier(country_code: &str) -> OriginTier {
    let code = country_code.trim().to_uppercase();
    if code == HOME_COUNTRY {
        OriginTier::SameCountry
    } else if NEIGHBOR_COUNTRIES.contains(&code.as_str()) {
        OriginTier::NeighboringCountry
    } else if INTRA_EUROPE.contains(&code.as_str()) {
        OriginTier::IntraEurope
    } else {
        OriginTier::Intercontinental
    }
}
