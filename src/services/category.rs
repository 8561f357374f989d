//! Category service

use super::Ledger;
use crate::error::DericerResult;
use crate::models::{category_scope, Category, CategoryId};

/// Service for category queries
pub struct CategoryService<'a> {
    ledger: &'a Ledger,
}

impl<'a> CategoryService<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Categories that are not soft-deleted
    pub fn list_active(&self) -> DericerResult<Vec<Category>> {
        let mut categories = self.ledger.store().load_all_categories()?;
        categories.retain(|c| !c.is_deleted);
        Ok(categories)
    }

    /// Ids of `root` and every category below it
    pub fn scope_of(&self, root: CategoryId) -> DericerResult<Vec<CategoryId>> {
        let categories = self.ledger.store().load_all_categories()?;
        let mut ids: Vec<CategoryId> = category_scope(root, &categories).into_iter().collect();
        ids.sort();
        Ok(ids)
    }
}
