use super::api::BulkQuizApi;
use super::error::{server_message, GenerationError, GENERATION_FAILED_MESSAGE};
use super::wire::{ApiEnvelope, GenerateData, GenerateRequest, GenerateRow};
use crate::catalog::CategoryCatalog;
use crate::workflow::{ConfigRow, ReviewSet};

/// One payload row per configuration row, names resolved from the catalog.
pub fn build_generate_request(rows: &[ConfigRow], catalog: &CategoryCatalog) -> GenerateRequest {
    GenerateRequest {
        rows: rows
            .iter()
            .map(|row| GenerateRow {
                category_id: row
                    .category
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                category_name: row
                    .category
                    .as_ref()
                    .and_then(|id| catalog.name_of(id))
                    .unwrap_or_default()
                    .to_string(),
                count: row.count,
            })
            .collect(),
    }
}

pub fn interpret_generate_envelope(
    envelope: ApiEnvelope<GenerateData>,
) -> Result<ReviewSet, GenerationError> {
    if !envelope.success {
        return Err(GenerationError::Server(server_message(
            envelope.error,
            GENERATION_FAILED_MESSAGE,
        )));
    }
    let quizzes = envelope
        .data
        .and_then(|data| data.quizzes)
        .unwrap_or_default();
    if quizzes.is_empty() {
        return Err(GenerationError::EmptyGeneration);
    }
    Ok(ReviewSet::from_items(quizzes))
}

pub struct GenerationClient<'a, A: BulkQuizApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: BulkQuizApi + ?Sized> GenerationClient<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub fn generate(
        &self,
        rows: &[ConfigRow],
        catalog: &CategoryCatalog,
    ) -> Result<ReviewSet, GenerationError> {
        let request = build_generate_request(rows, catalog);
        let envelope = self.api.post_generate(&request)?;
        interpret_generate_envelope(envelope)
    }
}
