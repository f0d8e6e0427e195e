use std::sync::{Arc, RwLock};

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::Value as JsonValue;
use validator::{Validate, ValidateEmail};

use crate::api::ApiClient;
use crate::dto::candidate_dto::{
    CreateCandidatePayload, UpdateCandidatePayload, UpdateCandidateStatusRequest,
};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::services::listing::filter_list;

/// Candidate list controller over `/resumes`. Same refresh-after-write
/// policy as the vacancy controller.
#[derive(Clone)]
pub struct CandidateService {
    api: ApiClient,
    items: Arc<RwLock<Vec<Candidate>>>,
}

impl CandidateService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn load(&self) -> Result<Vec<Candidate>> {
        let fetched: Vec<Candidate> = self.api.get_json("/resumes").await?;
        *self.items.write().expect("candidate cache poisoned") = fetched.clone();
        Ok(fetched)
    }

    pub fn items(&self) -> Vec<Candidate> {
        self.items.read().expect("candidate cache poisoned").clone()
    }

    /// Filtered view over the cached collection; tab 0 = all, tab n
    /// selects backend status id n. The query searches name, position and
    /// every skill source.
    pub fn filtered(&self, query: &str, tab: usize) -> Vec<Candidate> {
        let items = self.items.read().expect("candidate cache poisoned");
        filter_list(&items, query, tab)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<Candidate> {
        self.api.get_json(&format!("/resumes/{}", id)).await
    }

    pub async fn create(&self, payload: &CreateCandidatePayload) -> Result<Vec<Candidate>> {
        payload.validate()?;
        let _created: JsonValue = self.api.post_json("/resumes", payload).await?;
        self.load().await
    }

    pub async fn update(&self, id: i64, payload: &UpdateCandidatePayload) -> Result<Vec<Candidate>> {
        payload.validate()?;
        let _updated: JsonValue = self.api.put_json(&format!("/resumes/{}", id), payload).await?;
        self.load().await
    }

    pub async fn delete(&self, id: i64) -> Result<Vec<Candidate>> {
        self.api.delete(&format!("/resumes/{}", id)).await?;
        self.load().await
    }

    /// Imports a candidate by uploading a résumé file. The backend parses
    /// the document and creates the record.
    pub async fn import(
        &self,
        file_name: &str,
        content: Bytes,
        email: &str,
    ) -> Result<Vec<Candidate>> {
        if content.is_empty() {
            return Err(Error::validation("file", "выберите файл для импорта"));
        }
        if !email.validate_email() {
            return Err(Error::validation("email", "укажите корректный email"));
        }
        let form = Form::new()
            .text("email", email.to_string())
            .part(
                "file",
                Part::bytes(content.to_vec()).file_name(file_name.to_string()),
            );
        let _uploaded: JsonValue = self.api.post_multipart("/resumes/upload", form).await?;
        self.load().await
    }

    pub async fn set_status(&self, resume_id: i64, status_id: i64) -> Result<Vec<Candidate>> {
        let request = UpdateCandidateStatusRequest {
            resume_id,
            status_id,
        };
        self.api
            .post_json_expect_ok("/resumes/update-status", &request)
            .await?;
        self.load().await
    }

    /// The backend-defined status dictionary.
    pub async fn statuses(&self) -> Result<Vec<CandidateStatus>> {
        self.api.get_json("/candidate-status").await
    }
}
