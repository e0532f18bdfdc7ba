use super::form::parse_release_date;
use super::rows::RowStore;
use crate::shared::ids::CategoryId;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Select at least one category")]
    NoCategorySelected,
    #[error("Select a category on every row")]
    IncompleteRows,
    #[error("Total count must be {limit} or less (currently {total})")]
    TotalExceedsLimit { total: u32, limit: u32 },
    #[error("Set a release date")]
    MissingReleaseDate,
    #[error("Category `{category_id}` is selected on more than one row")]
    DuplicateCategory { category_id: CategoryId },
    #[error("Release date `{value}` must use the YYYY-MM-DD format")]
    InvalidReleaseDate { value: String },
}

/// Checks the configuration before generation. The first failing rule wins.
pub fn validate_config(rows: &RowStore, release_date: &str) -> Result<(), ValidationError> {
    let selected = rows
        .rows()
        .iter()
        .filter(|row| row.category.is_some())
        .count();
    if selected == 0 {
        return Err(ValidationError::NoCategorySelected);
    }
    if selected != rows.len() {
        return Err(ValidationError::IncompleteRows);
    }

    let total = rows.total_count();
    let limit = rows.limits().max_total_count;
    if total > limit {
        return Err(ValidationError::TotalExceedsLimit { total, limit });
    }

    if release_date.trim().is_empty() {
        return Err(ValidationError::MissingReleaseDate);
    }

    let mut seen = HashSet::new();
    for category in rows.rows().iter().filter_map(|row| row.category.as_ref()) {
        if !seen.insert(category) {
            return Err(ValidationError::DuplicateCategory {
                category_id: category.clone(),
            });
        }
    }

    if parse_release_date(release_date).is_none() {
        return Err(ValidationError::InvalidReleaseDate {
            value: release_date.to_string(),
        });
    }
    Ok(())
}
