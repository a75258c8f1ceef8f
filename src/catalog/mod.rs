pub mod headers;

pub use headers::{validate_headers, HeaderMismatch};

use crate::error::{PlanitError, Result};
use crate::scoring::stats::{compute_dataset_stats, observed_counts, MetricCounts};
use crate::types::product::{ProductAttributes, ProductBasics};
use crate::types::scoring::Stats;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const PRODUCTS_FILE: &str = "products.csv";
pub const ATTRIBUTES_FILE: &str = "attributes.csv";

/// Products and their attributes joined by product id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductBasics>,
    attributes: Vec<ProductAttributes>,
    product_index: HashMap<String, usize>,
    attribute_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(products: Vec<ProductBasics>, attributes: Vec<ProductAttributes>) -> Result<Self> {
        let mut product_index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product_index
                .insert(product.product_id.clone(), position)
                .is_some()
            {
                return Err(PlanitError::DuplicateProduct(product.product_id.clone()));
            }
        }

        let mut attribute_index = HashMap::with_capacity(attributes.len());
        for (position, attrs) in attributes.iter().enumerate() {
            if attribute_index
                .insert(attrs.product_id.clone(), position)
                .is_some()
            {
                return Err(PlanitError::DuplicateAttributes(attrs.product_id.clone()));
            }
        }

        Ok(Self {
            products,
            attributes,
            product_index,
            attribute_index,
        })
    }

    pub fn products(&self) -> &[ProductBasics] {
        &self.products
    }

    pub fn attributes(&self) -> &[ProductAttributes] {
        &self.attributes
    }

    pub fn product(&self, id: &str) -> Option<&ProductBasics> {
        self.product_index.get(id).map(|&position| &self.products[position])
    }

    pub fn attributes_for(&self, id: &str) -> Option<&ProductAttributes> {
        self.attribute_index
            .get(id)
            .map(|&position| &self.attributes[position])
    }

    /// Products without an attribute row, in catalog order.
    pub fn products_without_attributes(&self) -> Vec<&str> {
        self.products
            .iter()
            .filter(|product| !self.attribute_index.contains_key(&product.product_id))
            .map(|product| product.product_id.as_str())
            .collect()
    }

    /// Attribute rows whose product id is not in the product list.
    pub fn orphan_attributes(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|attrs| !self.product_index.contains_key(&attrs.product_id))
            .map(|attrs| attrs.product_id.as_str())
            .collect()
    }

    pub fn incomplete_nutrition_count(&self) -> usize {
        self.attributes
            .iter()
            .filter(|attrs| !attrs.has_complete_nutrition())
            .count()
    }

    pub fn stats(&self) -> Stats {
        compute_dataset_stats(&self.attributes, &self.products)
    }

    pub fn observed_counts(&self) -> MetricCounts {
        observed_counts(&self.attributes, &self.products)
    }
}

pub fn products_path(dir: &Path) -> PathBuf {
    dir.join(PRODUCTS_FILE)
}

pub fn attributes_path(dir: &Path) -> PathBuf {
    dir.join(ATTRIBUTES_FILE)
}

/// Loads `products.csv` and `attributes.csv` from a dataset directory.
pub fn load(dir: &Path) -> Result<Catalog> {
    if !dir.is_dir() {
        return Err(PlanitError::DatasetNotFound(dir.display().to_string()));
    }
    let products: Vec<ProductBasics> = read_rows(&products_path(dir))?;
    let attributes: Vec<ProductAttributes> = read_rows(&attributes_path(dir))?;

    for product in &products {
        if !product.unit_price_gbp_per_litre.is_finite() || product.unit_price_gbp_per_litre <= 0.0
        {
            tracing::warn!(
                product_id = %product.product_id,
                unit_price = product.unit_price_gbp_per_litre,
                "unit price is not a positive number"
            );
        }
    }
    tracing::info!(
        products = products.len(),
        attributes = attributes.len(),
        dir = %dir.display(),
        "loaded dataset"
    );

    Catalog::new(products, attributes)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(PlanitError::DatasetFileMissing(path.display().to_string()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result?;
        rows.push(row);
    }
    tracing::debug!(rows = rows.len(), path = %path.display(), "read csv");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::product::Recyclability;
    use std::fs;
    use tempfile::TempDir;

    const PRODUCTS: &str = "\
product_id,retailer,brand,product_name,size_ml,price_gbp,unit_price_gbp_per_litre,url,barcode,last_seen_at_utc
oat-1,Tesco,Oatly,Oat Drink Barista,1000,2.10,2.10,https://example.test/oat-1,7394376616228,2025-08-01T10:00:00Z
oat-2,Sainsbury's,Alpro,Oat No Sugars,1000,,1.60,,,
oat-3,Waitrose,Minor Figures,Oat M*lk,1000,2.40,2.40,,,
";

    const ATTRIBUTES: &str = "\
product_id,off_code,ingredients_short,sugar_g_per_100ml,sat_fat_g_per_100ml,additives_count,packaging_materials,recyclability,certifications,country_of_origin,notes,source_links
oat-1,7394376616228,\"water, oats\",3.4,0.3,2,\"tetra-pack,plastic-cap\",widely_recycled,,SE,,
oat-2,,,0,n/a,,\"Tetra Pak\",compost,organic;bcorp,UK,,
";

    fn write_dataset(dir: &Path, products: &str, attributes: &str) {
        fs::write(dir.join(PRODUCTS_FILE), products).expect("products should write");
        fs::write(dir.join(ATTRIBUTES_FILE), attributes).expect("attributes should write");
    }

    #[test]
    fn load_parses_and_joins_rows() {
        let dir = TempDir::new().expect("temp dir should be created");
        write_dataset(dir.path(), PRODUCTS, ATTRIBUTES);

        let catalog = load(dir.path()).expect("dataset should load");
        assert_eq!(catalog.products().len(), 3);
        assert_eq!(catalog.attributes().len(), 2);

        let first = catalog.attributes_for("oat-1").expect("oat-1 has attributes");
        assert_eq!(first.sugar_g_per_100ml, Some(3.4));
        assert_eq!(first.additives_count, Some(2.0));
        assert_eq!(first.packaging_materials, "tetra-pack,plastic-cap");
        assert_eq!(first.recyclability, Some(Recyclability::WidelyRecycled));

        let second = catalog.attributes_for("oat-2").expect("oat-2 has attributes");
        assert_eq!(second.sugar_g_per_100ml, Some(0.0));
        assert_eq!(second.sat_fat_g_per_100ml, None);
        assert_eq!(second.additives_count, None);
        assert_eq!(second.recyclability, None);
        assert_eq!(second.certifications, "organic;bcorp");

        let basics = catalog.product("oat-2").expect("oat-2 is listed");
        assert_eq!(basics.price_gbp, None);
        assert_eq!(basics.unit_price_gbp_per_litre, 1.60);

        assert_eq!(catalog.products_without_attributes(), vec!["oat-3"]);
        assert!(catalog.orphan_attributes().is_empty());
        assert_eq!(catalog.incomplete_nutrition_count(), 1);
    }

    #[test]
    fn load_rejects_duplicate_attribute_rows() {
        let dir = TempDir::new().expect("temp dir should be created");
        let duplicated = format!("{ATTRIBUTES}oat-1,,,1,1,1,glass,check_local,,FR,,\n");
        write_dataset(dir.path(), PRODUCTS, &duplicated);

        let err = load(dir.path()).expect_err("duplicate rows should fail");
        assert!(matches!(err, PlanitError::DuplicateAttributes(id) if id == "oat-1"));
    }

    #[test]
    fn load_reports_missing_files() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join(PRODUCTS_FILE), PRODUCTS).expect("products should write");

        let err = load(dir.path()).expect_err("missing attributes file should fail");
        assert!(matches!(err, PlanitError::DatasetFileMissing(_)));
    }

    #[test]
    fn orphan_attributes_are_listed() {
        let dir = TempDir::new().expect("temp dir should be created");
        let orphan = format!("{ATTRIBUTES}ghost,,,1,1,1,glass,check_local,,FR,,\n");
        write_dataset(dir.path(), PRODUCTS, &orphan);

        let catalog = load(dir.path()).expect("dataset should load");
        assert_eq!(catalog.orphan_attributes(), vec!["ghost"]);
    }
}
