use super::error::TransportError;
use super::wire::{ApiEnvelope, GenerateData, GenerateRequest, SaveData, SaveRequest};
use crate::config::Settings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport seam between the workflow and the admin endpoints.
pub trait BulkQuizApi: Send + Sync {
    fn post_generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<ApiEnvelope<GenerateData>, TransportError>;

    fn post_save(&self, request: &SaveRequest) -> Result<ApiEnvelope<SaveData>, TransportError>;
}

#[derive(Clone)]
pub struct HttpBulkQuizApi {
    agent: ureq::Agent,
    api_base: String,
    generate_path: String,
    save_path: String,
}

impl HttpBulkQuizApi {
    pub fn new(
        api_base: &str,
        generate_path: &str,
        save_path: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            api_base: api_base.to_string(),
            generate_path: generate_path.to_string(),
            save_path: save_path.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.api_base,
            &settings.generate_path,
            &settings.save_path,
            settings.request_timeout(),
        )
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, TransportError> {
        let url = self.endpoint(path);
        let payload = serde_json::to_value(body).map_err(|e| TransportError::Encode {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        let response = match self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(payload)
        {
            Ok(response) => response,
            // Error statuses still carry a `{success:false,error}` body.
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => {
                return Err(TransportError::Request {
                    url,
                    reason: err.to_string(),
                })
            }
        };

        response
            .into_json::<ApiEnvelope<T>>()
            .map_err(|e| TransportError::Decode {
                url,
                reason: e.to_string(),
            })
    }
}

impl BulkQuizApi for HttpBulkQuizApi {
    fn post_generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<ApiEnvelope<GenerateData>, TransportError> {
        self.post_json(&self.generate_path, request)
    }

    fn post_save(&self, request: &SaveRequest) -> Result<ApiEnvelope<SaveData>, TransportError> {
        self.post_json(&self.save_path, request)
    }
}
