//! In-memory product catalog.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use shopflow_core::{Product, ProductId};

use super::{Latency, ProductRepository, RepositoryError, parse_fixture};

const PRODUCTS_FIXTURE: &str = include_str!("../../fixtures/products.json");

/// Minimum rating for the featured list.
const FEATURED_MIN_RATING: f32 = 4.5;
const FEATURED_LIMIT: usize = 6;
const RELATED_LIMIT: usize = 4;

/// Field filters for catalog listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<f32>,
    pub brand: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category
            .as_ref()
            .is_none_or(|category| &product.category == category)
            && self
                .subcategory
                .as_ref()
                .is_none_or(|sub| product.subcategory.as_ref() == Some(sub))
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.min_rating.is_none_or(|min| product.rating >= min)
            && self
                .brand
                .as_ref()
                .is_none_or(|brand| &product.brand == brand)
            && self
                .in_stock
                .is_none_or(|in_stock| product.in_stock == in_stock)
    }
}

/// Read-only catalog held in memory; clones share the same products.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<Vec<Product>>,
    latency: Latency,
}

impl InMemoryProductRepository {
    #[must_use]
    pub fn new(products: Vec<Product>, latency: Latency) -> Self {
        Self {
            products: Arc::new(products),
            latency,
        }
    }

    /// Catalog seeded from the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the fixture does not parse.
    pub fn from_fixtures(latency: Latency) -> Result<Self, RepositoryError> {
        Ok(Self::new(parse_fixture("products", PRODUCTS_FIXTURE)?, latency))
    }

    fn select(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.products.iter().filter(|&p| keep(p)).cloned().collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.latency.pause(300).await;
        Ok(self.products.to_vec())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.latency.pause(200).await;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Product {id}")))
    }

    #[instrument(skip(self))]
    async fn get_by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        self.latency.pause(250).await;
        Ok(self.select(|p| p.category == category))
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        self.latency.pause(300).await;
        let term = query.trim().to_lowercase();
        let results = self.select(|p| {
            contains_ignore_case(&p.name, &term)
                || contains_ignore_case(&p.description, &term)
                || contains_ignore_case(&p.category, &term)
                || contains_ignore_case(&p.brand, &term)
        });
        debug!(results = results.len(), "Product search complete");
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn get_filtered(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        self.latency.pause(300).await;
        Ok(self.select(|p| filter.matches(p)))
    }

    #[instrument(skip(self))]
    async fn get_featured(&self) -> Result<Vec<Product>, RepositoryError> {
        self.latency.pause(200).await;
        Ok(self
            .products
            .iter()
            .filter(|p| p.rating >= FEATURED_MIN_RATING)
            .take(FEATURED_LIMIT)
            .cloned()
            .collect())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_related(&self, id: ProductId) -> Result<Vec<Product>, RepositoryError> {
        self.latency.pause(250).await;
        let Some(product) = self.products.iter().find(|p| p.id == id) else {
            return Ok(Vec::new());
        };

        Ok(self
            .products
            .iter()
            .filter(|p| p.id != id && p.category == product.category)
            .take(RELATED_LIMIT)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn repo() -> InMemoryProductRepository {
        InMemoryProductRepository::from_fixtures(Latency::none()).unwrap()
    }

    #[test]
    fn test_fixture_ids_are_unique() {
        let repo = repo();
        let mut ids: Vec<_> = repo.products.iter().map(|p| p.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(total >= 8);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let repo = repo();
        let product = repo.get_by_id(ProductId::new(1)).await.unwrap();
        assert_eq!(product.id, ProductId::new(1));

        let err = repo.get_by_id(ProductId::new(9999)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
        assert_eq!(err.to_string(), "Product 9999 not found");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = repo();
        let lower = repo.search("headphones").await.unwrap();
        let upper = repo.search("HEADPHONES").await.unwrap();
        assert!(!lower.is_empty());
        assert_eq!(lower, upper);
    }

    #[tokio::test]
    async fn test_search_matches_category_and_brand() {
        let repo = repo();
        let clothing = repo.get_by_category("Clothing").await.unwrap();
        let results = repo.search("clothing").await.unwrap();
        assert!(!clothing.is_empty());
        assert!(clothing.iter().all(|p| results.contains(p)));

        let by_brand = repo.search("  sonica ").await.unwrap();
        assert!(!by_brand.is_empty());
        assert!(by_brand.iter().all(|p| p.brand == "Sonica"));

        assert!(repo.search("no-such-term-anywhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_category() {
        let repo = repo();
        let electronics = repo.get_by_category("Electronics").await.unwrap();
        assert!(!electronics.is_empty());
        assert!(electronics.iter().all(|p| p.category == "Electronics"));
        assert!(repo.get_by_category("electronics").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filtered_by_price_and_stock() {
        let repo = repo();
        let filter = ProductFilter {
            max_price: Some(Decimal::new(50, 0)),
            in_stock: Some(true),
            ..ProductFilter::default()
        };
        let products = repo.get_filtered(&filter).await.unwrap();
        assert!(!products.is_empty());
        assert!(products
            .iter()
            .all(|p| p.price <= Decimal::new(50, 0) && p.in_stock));

        let everything = repo.get_filtered(&ProductFilter::default()).await.unwrap();
        assert_eq!(everything.len(), repo.get_all().await.unwrap().len());
    }

    #[tokio::test]
    async fn test_featured_limits_and_rating() {
        let featured = repo().get_featured().await.unwrap();
        assert!(!featured.is_empty());
        assert!(featured.len() <= FEATURED_LIMIT);
        assert!(featured.iter().all(|p| p.rating >= FEATURED_MIN_RATING));
    }

    #[tokio::test]
    async fn test_related_excludes_self() {
        let repo = repo();
        let product = repo.get_by_id(ProductId::new(1)).await.unwrap();
        let related = repo.get_related(product.id).await.unwrap();

        assert!(!related.is_empty());
        assert!(related.len() <= RELATED_LIMIT);
        assert!(related
            .iter()
            .all(|p| p.id != product.id && p.category == product.category));

        assert!(repo.get_related(ProductId::new(9999)).await.unwrap().is_empty());
    }
}
