//! The product catalog every customer is scored against.

use anyhow::{bail, Result};
use data_loader::ProductId;
use std::collections::HashSet;

/// Products offered by the bank, in response order.
///
/// The order matters: recommendations are returned in catalog order, not by
/// probability.
pub const STANDARD_PRODUCTS: [&str; 13] = [
    "ind_nom_pens_ult1",
    "ind_ctop_fin_ult1",
    "ind_reca_fin_ult1",
    "ind_cno_fin_ult1",
    "ind_cco_fin_ult1",
    "ind_dela_fin_ult1",
    "ind_valo_fin_ult1",
    "ind_ctpp_fin_ult1",
    "ind_fond_fin_ult1",
    "ind_nomina_ult1",
    "ind_tjcr_fin_ult1",
    "ind_ecue_fin_ult1",
    "ind_recibo_ult1",
];

/// Ordered, duplicate-free list of product identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    products: Vec<ProductId>,
}

impl ProductCatalog {
    /// The 13-product catalog the model was trained on
    pub fn standard() -> Self {
        Self {
            products: STANDARD_PRODUCTS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Build a custom catalog. Must be non-empty with unique identifiers.
    pub fn new(products: Vec<ProductId>) -> Result<Self> {
        if products.is_empty() {
            bail!("product catalog must not be empty");
        }
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.as_str()) {
                bail!("duplicate product '{}' in catalog", product);
            }
        }
        Ok(Self { products })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_order() {
        let catalog = ProductCatalog::standard();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.iter().next(), Some("ind_nom_pens_ult1"));
        assert_eq!(catalog.iter().last(), Some("ind_recibo_ult1"));
        assert_eq!(catalog.iter().nth(4), Some("ind_cco_fin_ult1"));
    }

    #[test]
    fn test_custom_catalog_rejects_duplicates() {
        let result = ProductCatalog::new(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_catalog_rejects_empty() {
        assert!(ProductCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(ProductCatalog::default(), ProductCatalog::standard());
    }
}
