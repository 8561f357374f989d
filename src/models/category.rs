//! Category model and hierarchy lookups
//!
//! Categories form a forest through `parent_id`. Reports and budgets roll
//! amounts up this tree, so the ancestor and descendant walks live next to
//! the model. Both walks carry a visited set, so a corrupted parent chain
//! that loops back on itself ends the walk instead of spinning forever.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::ids::CategoryId;

/// A (possibly nested) spending/income category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Parent category; `None` for a root
    #[serde(default)]
    pub parent_id: Option<CategoryId>,

    /// Soft-delete marker
    #[serde(default)]
    pub is_deleted: bool,
}

impl Category {
    /// Create a new root category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            parent_id: None,
            is_deleted: false,
        }
    }

    /// Create a new category nested under `parent_id`
    pub fn with_parent(name: impl Into<String>, parent_id: CategoryId) -> Self {
        let mut category = Self::new(name);
        category.parent_id = Some(parent_id);
        category
    }

    /// Check if this is a root category
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Index categories by id
pub fn build_category_index(categories: &[Category]) -> HashMap<CategoryId, &Category> {
    categories.iter().map(|c| (c.id, c)).collect()
}

/// Ancestor chain of `category_id`, nearest parent first, excluding the category itself
///
/// The walk stops at a root or at a parent id that is not in the index; that
/// unresolved id is still reported as an ancestor.
pub fn ancestor_ids(
    category_id: CategoryId,
    index: &HashMap<CategoryId, &Category>,
) -> Vec<CategoryId> {
    let mut ancestors = Vec::new();
    let mut visited = HashSet::from([category_id]);
    let mut current = index.get(&category_id).copied();

    while let Some(parent_id) = current.and_then(|c| c.parent_id) {
        if !visited.insert(parent_id) {
            tracing::warn!(category = %category_id, "category parent chain contains a cycle");
            break;
        }
        ancestors.push(parent_id);
        current = index.get(&parent_id).copied();
    }

    ancestors
}

/// Every category below `root_id`, excluding `root_id` itself
///
/// Sibling order is unspecified; callers should treat the result as a set.
pub fn descendant_ids(root_id: CategoryId, categories: &[Category]) -> Vec<CategoryId> {
    let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
    for category in categories {
        if let Some(parent_id) = category.parent_id {
            children.entry(parent_id).or_default().push(category.id);
        }
    }

    let mut result = Vec::new();
    let mut visited = HashSet::from([root_id]);
    let mut stack: Vec<CategoryId> = children.get(&root_id).cloned().unwrap_or_default();

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            tracing::warn!(category = %root_id, "category tree contains a cycle");
            continue;
        }
        result.push(id);
        if let Some(grandchildren) = children.get(&id) {
            stack.extend(grandchildren.iter().copied());
        }
    }

    result
}

/// A category together with all of its descendants
pub fn category_scope(root_id: CategoryId, categories: &[Category]) -> HashSet<CategoryId> {
    let mut scope: HashSet<CategoryId> = descendant_ids(root_id, categories).into_iter().collect();
    scope.insert(root_id);
    scope
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Food -> Restaurant -> FastFood, Food -> Groceries, Travel
    fn tree() -> Vec<Category> {
        let food = Category::new("Food");
        let restaurant = Category::with_parent("Restaurant", food.id);
        let fast_food = Category::with_parent("Fast Food", restaurant.id);
        let groceries = Category::with_parent("Groceries", food.id);
        let travel = Category::new("Travel");
        vec![food, restaurant, fast_food, groceries, travel]
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let cats = tree();
        let index = build_category_index(&cats);
        let ancestors = ancestor_ids(cats[2].id, &index);
        assert_eq!(ancestors, vec![cats[1].id, cats[0].id]);
        assert!(ancestor_ids(cats[0].id, &index).is_empty());
    }

    #[test]
    fn test_ancestors_stop_at_unresolved_parent() {
        let orphan_parent = CategoryId::new();
        let orphan = Category::with_parent("Orphan", orphan_parent);
        let cats = vec![orphan.clone()];
        let index = build_category_index(&cats);
        assert_eq!(ancestor_ids(orphan.id, &index), vec![orphan_parent]);
    }

    #[test]
    fn test_descendants_visit_each_once() {
        let cats = tree();
        let descendants: HashSet<_> = descendant_ids(cats[0].id, &cats).into_iter().collect();
        let expected: HashSet<_> = [cats[1].id, cats[2].id, cats[3].id].into_iter().collect();
        assert_eq!(descendants, expected);
        assert_eq!(descendant_ids(cats[0].id, &cats).len(), 3);
        assert!(descendant_ids(cats[4].id, &cats).is_empty());
    }

    #[test]
    fn test_scope_includes_root() {
        let cats = tree();
        let scope = category_scope(cats[1].id, &cats);
        assert_eq!(scope.len(), 2);
        assert!(scope.contains(&cats[1].id));
        assert!(scope.contains(&cats[2].id));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut a = Category::new("A");
        let b = Category::with_parent("B", a.id);
        a.parent_id = Some(b.id);
        let cats = vec![a.clone(), b.clone()];
        let index = build_category_index(&cats);

        assert_eq!(ancestor_ids(a.id, &index), vec![b.id]);
        assert_eq!(descendant_ids(a.id, &cats), vec![b.id]);
    }
}
