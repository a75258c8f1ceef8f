use crate::catalog::{attributes_path, products_path, ATTRIBUTES_FILE, PRODUCTS_FILE};
use crate::error::{PlanitError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const PRODUCTS_HEADER: &str = "product_id,retailer,brand,product_name,size_ml,price_gbp,unit_price_gbp_per_litre,url,barcode,last_seen_at_utc";

pub const ATTRIBUTES_HEADER: &str = "product_id,off_code,ingredients_short,sugar_g_per_100ml,sat_fat_g_per_100ml,additives_count,packaging_materials,recyclability,certifications,country_of_origin,notes,source_links";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMismatch {
    pub file: &'static str,
    pub expected: &'static str,
    pub found: String,
}

/// Compares the first line of each dataset file with its canonical header.
pub fn validate_headers(dir: &Path) -> Result<Vec<HeaderMismatch>> {
    let mut mismatches = Vec::new();
    for (file, path, expected) in [
        (PRODUCTS_FILE, products_path(dir), PRODUCTS_HEADER),
        (ATTRIBUTES_FILE, attributes_path(dir), ATTRIBUTES_HEADER),
    ] {
        if !path.is_file() {
            return Err(PlanitError::DatasetFileMissing(path.display().to_string()));
        }
        let found = first_line(&path)?;
        if found != expected {
            tracing::debug!(file, %found, "header mismatch");
            mismatches.push(HeaderMismatch {
                file,
                expected,
                found,
            });
        }
    }
    Ok(mismatches)
}

fn first_line(path: &Path) -> Result<String> {
    let mut line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut line)?;
    Ok(line.trim().trim_start_matches('\u{feff}').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn canonical_headers_pass() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join(PRODUCTS_FILE), format!("{PRODUCTS_HEADER}\r\n"))
            .expect("products should write");
        fs::write(dir.path().join(ATTRIBUTES_FILE), format!("{ATTRIBUTES_HEADER}\n"))
            .expect("attributes should write");

        let mismatches = validate_headers(dir.path()).expect("headers should be readable");
        assert!(mismatches.is_empty());
    }

    #[test]
    fn reordered_columns_are_reported() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join(PRODUCTS_FILE), "retailer,product_id\n")
            .expect("products should write");
        fs::write(dir.path().join(ATTRIBUTES_FILE), format!("{ATTRIBUTES_HEADER}\n"))
            .expect("attributes should write");

        let mismatches = validate_headers(dir.path()).expect("headers should be readable");
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].file, PRODUCTS_FILE);
        assert_eq!(mismatches[0].found, "retailer,product_id");
    }
}
