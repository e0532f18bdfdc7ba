//! Category list supplied to the workflow out of band.
//!
//! The admin page embeds the active categories as a JSON array of `{id, name}`
//! objects (extra fields such as `sort_order` are ignored). Order is preserved
//! and drives the order of every category picker.

use crate::shared::ids::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read category file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid category json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("category `{0}` is listed more than once")]
    DuplicateCategory(String),
    #[error("category `{0}` has a blank name")]
    BlankName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.clone()) {
                return Err(CatalogError::DuplicateCategory(category.id.to_string()));
            }
            if category.name.trim().is_empty() {
                return Err(CatalogError::BlankName(category.id.to_string()));
            }
        }
        Ok(Self { categories })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_str(raw)?;
        Self::new(categories)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn name_of(&self, id: &CategoryId) -> Option<&str> {
        self.get(id).map(|category| category.name.as_str())
    }

    pub fn position(&self, id: &CategoryId) -> Option<usize> {
        self.categories.iter().position(|category| &category.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_embedded_json_and_ignores_extra_fields() {
        let catalog = CategoryCatalog::from_json_str(
            r#"[{"id":"math","name":"Math","sort_order":1,"status":"active"},{"id":"history","name":"History"}]"#,
        )
        .expect("parse catalog");
        assert_eq!(catalog.len(), 2);
        let math = CategoryId::parse("math").expect("id");
        assert_eq!(catalog.name_of(&math), Some("Math"));
        assert_eq!(catalog.position(&math), Some(0));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CategoryCatalog::from_json_str(
            r#"[{"id":"math","name":"Math"},{"id":"math","name":"Maths"}]"#,
        )
        .expect_err("duplicate id must fail");
        assert!(matches!(err, CatalogError::DuplicateCategory(id) if id == "math"));
    }

    #[test]
    fn rejects_invalid_identifiers() {
        let err = CategoryCatalog::from_json_str(r#"[{"id":"bad id","name":"Bad"}]"#)
            .expect_err("invalid id must fail");
        assert!(err.to_string().contains("category id"));
    }
}
