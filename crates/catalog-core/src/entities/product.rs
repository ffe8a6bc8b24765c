//! Product entity and its derived views.

use crate::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// A product joined with its category.
///
/// `category_name` is never stored on the product row; it is projected from
/// the `category` table every time a product is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    pub category_name: String,
}

/// Input for inserting a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub category_id: CategoryId,
}

impl NewProduct {
    #[must_use]
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            category_id,
        }
    }
}

/// Listing entry: the product projection without the raw category id.
///
/// This is also the shape stored in the cached product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub category_name: String,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category_name: product.category_name,
        }
    }
}

/// Partial update of a product.
///
/// Blank names and zero category ids are normalized to `None`, so a field is
/// either a real change or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    pub id: ProductId,
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
}

/// Which columns a [`ProductChanges`] touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSet {
    NameAndCategory,
    CategoryOnly,
    NameOnly,
    Nothing,
}

impl ProductChanges {
    /// Builds a change set, dropping blank names and unset category ids.
    #[must_use]
    pub fn new(id: ProductId, name: Option<String>, category_id: Option<CategoryId>) -> Self {
        Self {
            id,
            name: name.filter(|n| !n.trim().is_empty()),
            category_id: category_id.filter(|c| !c.is_unset()),
        }
    }

    #[must_use]
    pub fn change_set(&self) -> ChangeSet {
        match (&self.name, &self.category_id) {
            (Some(_), Some(_)) => ChangeSet::NameAndCategory,
            (None, Some(_)) => ChangeSet::CategoryOnly,
            (Some(_), None) => ChangeSet::NameOnly,
            (None, None) => ChangeSet::Nothing,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.change_set(), ChangeSet::Nothing)
    }
}
