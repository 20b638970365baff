//! In-memory category list.

use std::sync::Arc;

use tracing::instrument;

use shopflow_core::{Category, CategoryId};

use super::{CategoryRepository, Latency, RepositoryError, parse_fixture};

const CATEGORIES_FIXTURE: &str = include_str!("../../fixtures/categories.json");

#[derive(Debug, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<Vec<Category>>,
    latency: Latency,
}

impl InMemoryCategoryRepository {
    #[must_use]
    pub fn new(categories: Vec<Category>, latency: Latency) -> Self {
        Self {
            categories: Arc::new(categories),
            latency,
        }
    }

    /// Categories seeded from the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the fixture does not parse.
    pub fn from_fixtures(latency: Latency) -> Result<Self, RepositoryError> {
        Ok(Self::new(
            parse_fixture("categories", CATEGORIES_FIXTURE)?,
            latency,
        ))
    }
}

impl CategoryRepository for InMemoryCategoryRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError> {
        self.latency.pause(200).await;
        Ok(self.categories.to_vec())
    }

    #[instrument(skip(self), fields(category_id = %id))]
    async fn get_by_id(&self, id: CategoryId) -> Result<Category, RepositoryError> {
        self.latency.pause(150).await;
        self.categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Category {id}")))
    }
}
