use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("review item {index} does not exist (review has {len} items)")]
    OutOfRange { index: usize, len: usize },
}

/// One generated quiz awaiting review. `category_name` is the name captured
/// when the batch was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub category_id: String,
    #[serde(default)]
    pub category_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl GeneratedItem {
    /// Drops generation-only fields such as `category_name`.
    pub fn to_save_item(&self) -> SaveQuizItem {
        SaveQuizItem {
            category_id: self.category_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveQuizItem {
    pub category_id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSet {
    items: Vec<GeneratedItem>,
}

impl ReviewSet {
    pub fn from_items(items: Vec<GeneratedItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[GeneratedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remove_item(&mut self, index: usize) -> Result<GeneratedItem, ReviewError> {
        if index >= self.items.len() {
            return Err(ReviewError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn to_save_items(&self) -> Vec<SaveQuizItem> {
        self.items.iter().map(GeneratedItem::to_save_item).collect()
    }

    pub fn count_label(&self) -> String {
        format!("{} quizzes", self.items.len())
    }
}
