use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub image: String,
    pub category: String,
    pub stock: StockLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<HashMap<String, String>>,
}

impl Product {
    /// Linear substring filter over name and description; the catalog is
    /// small enough that nothing smarter is warranted.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.description.to_lowercase().contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: "prod_1".into(),
            name: "Premium Wireless Headphones".into(),
            price: 299.99,
            description: "Immersive sound with active noise cancellation.".into(),
            detailed_description: String::new(),
            image: String::new(),
            category: "Electronics".into(),
            stock: StockLevel::InStock,
            variants: None,
            specifications: None,
        }
    }

    #[test]
    fn test_stock_level_wire_format() {
        assert_eq!(
            serde_json::to_string(&StockLevel::OutOfStock).unwrap(),
            "\"out-of-stock\""
        );
        let parsed: StockLevel = serde_json::from_str("\"low-stock\"").unwrap();
        assert_eq!(parsed, StockLevel::LowStock);
    }

    #[test]
    fn test_product_field_names_are_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("detailedDescription").is_some());
        assert!(value.get("detailed_description").is_none());
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let product = sample();
        assert!(product.matches_query("wireless"));
        assert!(product.matches_query("NOISE"));
        assert!(!product.matches_query("jacket"));
    }
}
