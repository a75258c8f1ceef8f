use serde::{Deserialize, Serialize};

/// Identity and commercial facts of a product, one row of `products.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductBasics {
    pub product_id: String,
    pub retailer: String,
    pub brand: String,
    pub product_name: String,
    pub size_ml: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub price_gbp: Option<f64>,
    pub unit_price_gbp_per_litre: f64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub last_seen_at_utc: Option<String>,
}

impl ProductBasics {
    /// Text used for free-text filtering and name ordering.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.product_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recyclability {
    WidelyRecycled,
    CheckLocal,
    NotRecycled,
}

/// Nutritional and sourcing attributes, one row of `attributes.csv`.
///
/// Nutrient cells that are empty or not numbers load as `None`; the scorer
/// imputes them. An unrecognised recyclability value also loads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub product_id: String,
    #[serde(default)]
    pub off_code: Option<String>,
    #[serde(default)]
    pub ingredients_short: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sugar_g_per_100ml: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sat_fat_g_per_100ml: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub additives_count: Option<f64>,
    #[serde(default)]
    pub packaging_materials: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub recyclability: Option<Recyclability>,
    #[serde(default)]
    pub certifications: String,
    #[serde(default)]
    pub country_of_origin: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub source_links: Option<String>,
}

impl ProductAttributes {
    pub fn has_complete_nutrition(&self) -> bool {
        [
            self.sugar_g_per_100ml,
            self.sat_fat_g_per_100ml,
            self.additives_count,
        ]
        .iter()
        .all(|value| value.is_some_and(f64::is_finite))
    }
}
