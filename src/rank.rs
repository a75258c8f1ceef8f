use crate::scoring::ScoredProduct;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Planit,
    Health,
    Sustainability,
    Price,
    UnitPrice,
}

impl SortKey {
    /// Cheapest first for unit price, best first for every score.
    pub fn default_direction(self) -> Direction {
        match self {
            Self::UnitPrice => Direction::Ascending,
            _ => Direction::Descending,
        }
    }

    fn compare(self, a: &ScoredProduct<'_>, b: &ScoredProduct<'_>) -> Ordering {
        match self {
            Self::Planit => a.scores.planit_score.cmp(&b.scores.planit_score),
            Self::Health => a.scores.health_score.cmp(&b.scores.health_score),
            Self::Sustainability => a
                .scores
                .sustainability_score
                .cmp(&b.scores.sustainability_score),
            Self::Price => a.scores.price_score.cmp(&b.scores.price_score),
            Self::UnitPrice => a
                .basics
                .unit_price_gbp_per_litre
                .total_cmp(&b.basics.unit_price_gbp_per_litre),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    pub sort: SortKey,
    pub direction: Option<Direction>,
    pub query: Option<String>,
    pub limit: Option<usize>,
}

fn matches_query(product: &ScoredProduct<'_>, term: &str) -> bool {
    let basics = product.basics;
    format!("{} {}", basics.display_name(), basics.retailer)
        .to_lowercase()
        .contains(term)
}

/// Filters, orders and truncates scored products. Equal keys fall back to
/// brand and product name order.
pub fn rank<'a>(
    mut products: Vec<ScoredProduct<'a>>,
    options: &RankOptions,
) -> Vec<ScoredProduct<'a>> {
    if let Some(term) = options
        .query
        .as_deref()
        .map(|query| query.trim().to_lowercase())
        .filter(|term| !term.is_empty())
    {
        products.retain(|product| matches_query(product, &term));
    }

    let direction = options
        .direction
        .unwrap_or_else(|| options.sort.default_direction());
    products.sort_by(|a, b| {
        let primary = match direction {
            Direction::Ascending => options.sort.compare(a, b),
            Direction::Descending => options.sort.compare(b, a),
        };
        primary.then_with(|| a.basics.display_name().cmp(&b.basics.display_name()))
    });

    if let Some(limit) = options.limit {
        products.truncate(limit);
    }
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::product::{ProductAttributes, ProductBasics};
    use crate::types::scoring::{Breakdown, QualityFlag, Scores};

    fn scores(planit: i64, price: i64) -> Scores {
        Scores {
            health_score: 50,
            sustainability_score: 50,
            price_score: price,
            planit_score: planit,
            breakdown: Breakdown {
                sugar: 0.0,
                sat_fat: 0.0,
                additives: 0.0,
                packaging: 0.0,
                origin: 0.0,
                certs: 0.0,
                price_norm: 0.0,
            },
            quality_flag: QualityFlag::Ok,
        }
    }

    fn scored<'a>(
        basics: &'a ProductBasics,
        attributes: &'a ProductAttributes,
        scores: Scores,
    ) -> ScoredProduct<'a> {
        ScoredProduct {
            basics,
            attributes,
            scores,
        }
    }

    fn product(brand: &str, retailer: &str, unit_price: f64) -> ProductBasics {
        ProductBasics {
            product_id: brand.to_lowercase(),
            retailer: retailer.to_string(),
            brand: brand.to_string(),
            product_name: "Oat Drink".to_string(),
            unit_price_gbp_per_litre: unit_price,
            ..ProductBasics::default()
        }
    }

    #[test]
    fn default_rank_orders_by_planit_then_name() {
        let attrs = ProductAttributes::default();
        let oatly = product("Oatly", "Tesco", 2.1);
        let alpro = product("Alpro", "Asda", 1.6);
        let rude = product("Rude Health", "Tesco", 2.4);
        let scored = vec![
            scored(&oatly, &attrs, scores(60, 40)),
            scored(&alpro, &attrs, scores(72, 70)),
            scored(&rude, &attrs, scores(60, 20)),
        ];

        let ranked = rank(scored, &RankOptions::default());
        let brands: Vec<_> = ranked.iter().map(|p| p.basics.brand.as_str()).collect();
        assert_eq!(brands, vec!["Alpro", "Oatly", "Rude Health"]);
    }

    #[test]
    fn unit_price_sorts_cheapest_first_unless_overridden() {
        let attrs = ProductAttributes::default();
        let oatly = product("Oatly", "Tesco", 2.1);
        let alpro = product("Alpro", "Asda", 1.6);
        let (oatly, alpro, attrs) = (&oatly, &alpro, &attrs);
        let make = move || {
            vec![
                scored(oatly, attrs, scores(60, 40)),
                scored(alpro, attrs, scores(72, 70)),
            ]
        };

        let options = RankOptions {
            sort: SortKey::UnitPrice,
            ..RankOptions::default()
        };
        assert_eq!(rank(make(), &options)[0].basics.brand, "Alpro");

        let options = RankOptions {
            sort: SortKey::UnitPrice,
            direction: Some(Direction::Descending),
            ..RankOptions::default()
        };
        assert_eq!(rank(make(), &options)[0].basics.brand, "Oatly");
    }

    #[test]
    fn query_filters_on_brand_name_and_retailer_and_limit_truncates() {
        let attrs = ProductAttributes::default();
        let oatly = product("Oatly", "Tesco", 2.1);
        let alpro = product("Alpro", "Asda", 1.6);
        let rude = product("Rude Health", "Tesco", 2.4);
        let scored = vec![
            scored(&oatly, &attrs, scores(60, 40)),
            scored(&alpro, &attrs, scores(72, 70)),
            scored(&rude, &attrs, scores(65, 20)),
        ];

        let options = RankOptions {
            query: Some(" TESCO ".to_string()),
            limit: Some(1),
            ..RankOptions::default()
        };
        let ranked = rank(scored, &options);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].basics.brand, "Rude Health");
    }
}
