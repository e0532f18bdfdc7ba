use super::limits::WorkflowLimits;
use crate::catalog::{Category, CategoryCatalog};
use crate::shared::ids::{CategoryId, RowId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("row `{0}` does not exist")]
    UnknownRow(RowId),
    #[error("invalid category id `{raw}`: {reason}")]
    InvalidCategory { raw: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRow {
    pub id: RowId,
    pub category: Option<CategoryId>,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSummary {
    pub selected_categories: usize,
    pub total_count: u32,
}

impl RowSummary {
    pub fn label(&self) -> String {
        format!(
            "{} categories / {} total",
            self.selected_categories, self.total_count
        )
    }
}

/// Ordered configuration rows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowStore {
    rows: Vec<ConfigRow>,
    next_id: u64,
    limits: WorkflowLimits,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(WorkflowLimits::default())
    }
}

impl RowStore {
    pub fn new(limits: WorkflowLimits) -> Self {
        let mut store = Self {
            rows: Vec::new(),
            next_id: 0,
            limits,
        };
        store.add_row();
        store
    }

    pub fn limits(&self) -> &WorkflowLimits {
        &self.limits
    }

    pub fn rows(&self) -> &[ConfigRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&ConfigRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(|row| row.id)
    }

    pub fn add_row(&mut self) -> RowId {
        let id = RowId::from_counter(self.next_id);
        self.next_id += 1;
        self.rows.push(ConfigRow {
            id,
            category: None,
            count: self.limits.default_row_count,
        });
        id
    }

    /// Removes the row if present and returns whether anything was removed.
    /// A default row is appended whenever the store would otherwise be empty.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        let removed = self.rows.len() != before;
        if self.rows.is_empty() {
            self.add_row();
        }
        removed
    }

    pub fn set_category(
        &mut self,
        id: RowId,
        category: Option<CategoryId>,
    ) -> Result<(), RowError> {
        self.row_mut(id)?.category = category;
        Ok(())
    }

    /// Form-style category input: blank clears the selection.
    pub fn set_category_input(&mut self, id: RowId, raw: &str) -> Result<(), RowError> {
        let trimmed = raw.trim();
        let category = if trimmed.is_empty() {
            None
        } else {
            Some(
                CategoryId::parse(trimmed).map_err(|reason| RowError::InvalidCategory {
                    raw: raw.to_string(),
                    reason,
                })?,
            )
        };
        self.set_category(id, category)
    }

    pub fn set_count(&mut self, id: RowId, value: i64) -> Result<u32, RowError> {
        let clamped = self.limits.clamp_count(value);
        self.row_mut(id)?.count = clamped;
        Ok(clamped)
    }

    /// Form-style count input. Anything without a leading integer counts as 1.
    pub fn set_count_input(&mut self, id: RowId, raw: &str) -> Result<u32, RowError> {
        let value = match parse_leading_integer(raw) {
            Some(0) | None => 1,
            Some(value) => value,
        };
        self.set_count(id, value)
    }

    pub fn adjust_count(&mut self, id: RowId, delta: i64) -> Result<u32, RowError> {
        let current = self.get(id).ok_or(RowError::UnknownRow(id))?.count;
        self.set_count(id, i64::from(current).saturating_add(delta))
    }

    /// Categories assigned to rows other than `id`.
    pub fn used_elsewhere(&self, id: RowId) -> Vec<&CategoryId> {
        self.rows
            .iter()
            .filter(|row| row.id != id)
            .filter_map(|row| row.category.as_ref())
            .collect()
    }

    pub fn available_categories<'c>(
        &self,
        id: RowId,
        catalog: &'c CategoryCatalog,
    ) -> Vec<&'c Category> {
        let used = self.used_elsewhere(id);
        catalog
            .categories()
            .iter()
            .filter(|category| !used.contains(&&category.id))
            .collect()
    }

    /// Steps the row's selection through the unset slot and every available
    /// category, in catalog order, wrapping at both ends.
    pub fn cycle_category(
        &mut self,
        id: RowId,
        catalog: &CategoryCatalog,
        forward: bool,
    ) -> Result<Option<CategoryId>, RowError> {
        let current = self.get(id).ok_or(RowError::UnknownRow(id))?.category.clone();
        let mut choices: Vec<Option<CategoryId>> = vec![None];
        choices.extend(
            self.available_categories(id, catalog)
                .into_iter()
                .map(|category| Some(category.id.clone())),
        );
        let position = choices
            .iter()
            .position(|choice| *choice == current)
            .unwrap_or(0);
        let next = if forward {
            (position + 1) % choices.len()
        } else {
            (position + choices.len() - 1) % choices.len()
        };
        let selected = choices.swap_remove(next);
        self.set_category(id, selected.clone())?;
        Ok(selected)
    }

    pub fn summary(&self) -> RowSummary {
        RowSummary {
            selected_categories: self.rows.iter().filter(|row| row.category.is_some()).count(),
            total_count: self.total_count(),
        }
    }

    pub fn total_count(&self) -> u32 {
        self.rows
            .iter()
            .fold(0u32, |total, row| total.saturating_add(row.count))
    }

    fn row_mut(&mut self, id: RowId) -> Result<&mut ConfigRow, RowError> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(RowError::UnknownRow(id))
    }
}

/// Reads an optionally signed integer prefix, ignoring leading whitespace and
/// any trailing garbage. Overflow saturates.
fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = digits.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
