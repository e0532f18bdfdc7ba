use crate::workflow::{GeneratedItem, QuizStatus};
pub use crate::workflow::SaveQuizItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRow {
    pub category_id: String,
    pub category_name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub rows: Vec<GenerateRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub release_date: String,
    pub status: QuizStatus,
    pub quizzes: Vec<SaveQuizItem>,
}

/// `{success, error?, data?}` wrapper shared by both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateData {
    /// The server sends `null` when nothing was generated.
    pub quizzes: Option<Vec<GeneratedItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaveData {
    pub redirect_url: Option<String>,
    pub created_count: Option<u32>,
}
