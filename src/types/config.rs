use crate::error::PlanitError;
use crate::types::product::Recyclability;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub weights: Weights,
    pub packaging_base: PackagingBase,
    pub recyclability_bonus: RecyclabilityBonus,
    pub origin_scale: OriginScale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub overall: OverallWeights,
    pub health: HealthWeights,
    pub sustainability: SustainabilityWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverallWeights {
    pub sustainability: f64,
    pub health: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthWeights {
    pub sugar: f64,
    pub sat_fat: f64,
    pub additives: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SustainabilityWeights {
    pub packaging: f64,
    pub origin: f64,
    pub certs: f64,
}

/// Canonical packaging category derived from the free-text materials field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackagingMaterial {
    TetraPack,
    Hdpe,
    Glass,
    Pet,
    /// First material token that matched none of the known categories.
    Named(String),
    /// Empty materials field.
    Other,
}

impl PackagingMaterial {
    pub fn key(&self) -> &str {
        match self {
            Self::TetraPack => "tetra-pack",
            Self::Hdpe => "hdpe",
            Self::Glass => "glass",
            Self::Pet => "pet",
            Self::Named(token) => token,
            Self::Other => "other",
        }
    }
}

/// Base packaging points per material. The `other` entry is mandatory and is
/// used for every material missing from the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingBase {
    pub other: f64,
    #[serde(flatten)]
    pub materials: BTreeMap<String, f64>,
}

impl PackagingBase {
    pub fn base_for(&self, material: &PackagingMaterial) -> f64 {
        match material {
            PackagingMaterial::Other => self.other,
            material => self
                .materials
                .get(material.key())
                .copied()
                .unwrap_or(self.other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecyclabilityBonus {
    pub widely_recycled: f64,
    pub check_local: f64,
    pub not_recycled: f64,
}

impl RecyclabilityBonus {
    pub fn bonus_for(&self, recyclability: Option<Recyclability>) -> f64 {
        match recyclability {
            Some(Recyclability::WidelyRecycled) => self.widely_recycled,
            Some(Recyclability::CheckLocal) => self.check_local,
            Some(Recyclability::NotRecycled) => self.not_recycled,
            None => 0.0,
        }
    }
}

/// Coarse sourcing distance of a product's country of origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginTier {
    SameCountry,
    NeighboringCountry,
    IntraEurope,
    Intercontinental,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OriginScale {
    pub same_country: f64,
    pub neighboring_country: f64,
    pub intra_europe: f64,
    pub intercontinental: f64,
}

impl OriginScale {
    pub fn value_for(&self, tier: OriginTier) -> f64 {
        match tier {
            OriginTier::SameCountry => self.same_country,
            OriginTier::NeighboringCountry => self.neighboring_country,
            OriginTier::IntraEurope => self.intra_europe,
            OriginTier::Intercontinental => self.intercontinental,
        }
    }
}

/// Certifications that earn sustainability points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Certification {
    Organic,
    SoilAssociation,
    BCorp,
    CarbonNeutral,
}

impl Certification {
    pub const MAX_POINTS: f64 = 20.0;

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "organic" => Some(Self::Organic),
            "soil-association" => Some(Self::SoilAssociation),
            "bcorp" => Some(Self::BCorp),
            "carbon-neutral" => Some(Self::CarbonNeutral),
            _ => None,
        }
    }

    pub fn points(self) -> f64 {
        match self {
            Self::Organic | Self::SoilAssociation => 10.0,
            Self::BCorp | Self::CarbonNeutral => 5.0,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            version: Some("1".to_string()),
            weights: Weights {
                overall: OverallWeights {
                    sustainability: 0.34,
                    health: 0.33,
                    price: 0.33,
                },
                health: HealthWeights {
                    sugar: 0.4,
                    sat_fat: 0.4,
                    additives: 0.2,
                },
                sustainability: SustainabilityWeights {
                    packaging: 0.5,
                    origin: 0.3,
                    certs: 0.2,
                },
            },
            packaging_base: PackagingBase {
                other: 30.0,
                materials: BTreeMap::from([
                    ("tetra-pack".to_string(), 70.0),
                    ("glass".to_string(), 60.0),
                    ("hdpe".to_string(), 50.0),
                    ("pet".to_string(), 40.0),
                ]),
            },
            recyclability_bonus: RecyclabilityBonus {
                widely_recycled: 20.0,
                check_local: 10.0,
                not_recycled: 0.0,
            },
            origin_scale: OriginScale {
                same_country: 100.0,
                neighboring_country: 80.0,
                intra_europe: 60.0,
                intercontinental: 20.0,
            },
        }
    }
}

impl ScoringConfig {
    /// Rejects values the engine cannot use. Weight triples that do not sum
    /// to 1.0 are accepted with a warning: scores are never renormalized.
    pub fn validate(&self) -> Result<(), PlanitError> {
        let w = &self.weights;
        let triples = [
            (
                "weights.overall",
                [w.overall.sustainability, w.overall.health, w.overall.price],
            ),
            (
                "weights.health",
                [w.health.sugar, w.health.sat_fat, w.health.additives],
            ),
            (
                "weights.sustainability",
                [
                    w.sustainability.packaging,
                    w.sustainability.origin,
                    w.sustainability.certs,
                ],
            ),
        ];

        for (name, weights) in triples {
            if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
                return Err(PlanitError::InvalidConfig(format!(
                    "{name} values must be finite and non-negative"
                )));
            }
            let sum: f64 = weights.iter().sum();
            if (sum - 1.0).abs() > 0.001 {
                tracing::warn!(
                    "{name} sum to {sum:.3}; scores will not stay within 0..=100"
                );
            }
        }

        let packaging = std::iter::once(("other", self.packaging_base.other)).chain(
            self.packaging_base
                .materials
                .iter()
                .map(|(key, value)| (key.as_str(), *value)),
        );
        for (key, value) in packaging {
            if !value.is_finite() {
                return Err(PlanitError::InvalidConfig(format!(
                    "packaging_base.{key} must be a finite number"
                )));
            }
        }

        let bonus = &self.recyclability_bonus;
        if [bonus.widely_recycled, bonus.check_local, bonus.not_recycled]
            .iter()
            .any(|value| !value.is_finite())
        {
            return Err(PlanitError::InvalidConfig(
                "recyclability_bonus values must be finite numbers".to_string(),
            ));
        }

        let origin = &self.origin_scale;
        if [
            origin.same_country,
            origin.neighboring_country,
            origin.intra_europe,
            origin.intercontinental,
        ]
        .iter()
        .any(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(PlanitError::InvalidConfig(
                "origin_scale values must be finite and non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
