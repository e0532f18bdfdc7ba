use super::api::BulkQuizApi;
use super::error::{server_message, SaveError, SAVE_FAILED_MESSAGE};
use super::wire::{ApiEnvelope, SaveData, SaveRequest};
use crate::workflow::{GeneratedItem, QuizStatus, RedirectTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub target: RedirectTarget,
    pub created_count: Option<u32>,
}

pub fn build_save_request(
    items: &[GeneratedItem],
    release_date: &str,
    status: QuizStatus,
) -> Result<SaveRequest, SaveError> {
    if items.is_empty() {
        return Err(SaveError::NothingToSave);
    }
    Ok(SaveRequest {
        release_date: release_date.to_string(),
        status,
        quizzes: items.iter().map(GeneratedItem::to_save_item).collect(),
    })
}

pub fn interpret_save_envelope(
    envelope: ApiEnvelope<SaveData>,
    fallback_redirect: &str,
) -> Result<SaveReceipt, SaveError> {
    if !envelope.success {
        return Err(SaveError::Server(server_message(
            envelope.error,
            SAVE_FAILED_MESSAGE,
        )));
    }
    let data = envelope.data.unwrap_or_default();
    let target = data
        .redirect_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| fallback_redirect.to_string());
    Ok(SaveReceipt {
        target: RedirectTarget::new(target),
        created_count: data.created_count,
    })
}

pub struct SaveClient<'a, A: BulkQuizApi + ?Sized> {
    api: &'a A,
    fallback_redirect: &'a str,
}

impl<'a, A: BulkQuizApi + ?Sized> SaveClient<'a, A> {
    pub fn new(api: &'a A, fallback_redirect: &'a str) -> Self {
        Self {
            api,
            fallback_redirect,
        }
    }

    /// Fails with `NothingToSave` before touching the network when `items` is empty.
    pub fn save(
        &self,
        items: &[GeneratedItem],
        release_date: &str,
        status: QuizStatus,
    ) -> Result<SaveReceipt, SaveError> {
        let request = build_save_request(items, release_date, status)?;
        let envelope = self.api.post_save(&request)?;
        interpret_save_envelope(envelope, self.fallback_redirect)
    }
}
