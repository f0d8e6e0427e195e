use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::matching::{MatchHistoryResponse, MatchRecord, MatchResult};
use crate::services::matching_service::MatchTransport;
use crate::session::SessionStore;

/// Thin wrapper over `reqwest` that owns the API base URL and the session
/// store. Every request carries `Authorization: Bearer <token>` when a
/// session exists; an absent session just omits the header.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.http.get(self.url(path));
        self.execute(request).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        self.execute(request).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(request).await
    }

    /// POST where the backend replies with an empty or irrelevant body.
    pub async fn post_json_expect_ok<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.url(path)).json(body);
        let response = self.authorize(request).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let request = self.http.post(self.url(path)).multipart(form);
        self.execute(request).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.put(self.url(path)).json(body);
        self.execute(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.http.delete(self.url(path));
        let response = self.authorize(request).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorize(request).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Http {
            status,
            message: extract_error_message(&body, status),
        })
    }
}

/// Backends disagree on the error envelope: `{"error": ...}`,
/// `{"message": ...}`, bare text, or nothing at all.
fn extract_error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

fn resume_part(content: Bytes, file_name: String) -> Part {
    Part::bytes(content.to_vec()).file_name(file_name)
}

#[async_trait]
impl MatchTransport for ApiClient {
    async fn match_resume_file_to_vacancy_url(
        &self,
        content: Bytes,
        file_name: String,
        email: String,
        vacancy_url: String,
    ) -> Result<MatchResult> {
        let form = Form::new()
            .part("resume", resume_part(content, file_name))
            .text("email", email)
            .text("vacancyUrl", vacancy_url);
        self.post_multipart("/matching/resume-file", form).await
    }

    async fn match_resume_file_to_vacancy_text(
        &self,
        content: Bytes,
        file_name: String,
        email: String,
        vacancy_text: String,
    ) -> Result<MatchResult> {
        let form = Form::new()
            .part("resume", resume_part(content, file_name))
            .text("email", email)
            .text("vacancyText", vacancy_text);
        self.post_multipart("/matching/resume-file-vacancy-text", form)
            .await
    }

    async fn match_resume_url_to_vacancy_url(
        &self,
        resume_url: String,
        vacancy_url: String,
    ) -> Result<MatchResult> {
        self.post_json(
            "/matching/resume-url",
            &json!({ "resumeUrl": resume_url, "vacancyUrl": vacancy_url }),
        )
        .await
    }

    async fn match_resume_url_to_vacancy_text(
        &self,
        resume_url: String,
        vacancy_text: String,
    ) -> Result<MatchResult> {
        self.post_json(
            "/matching/resume-url-vacancy-text",
            &json!({ "resumeUrl": resume_url, "vacancyText": vacancy_text }),
        )
        .await
    }

    async fn match_resume_text_to_vacancy_url(
        &self,
        resume_text: String,
        vacancy_url: String,
    ) -> Result<MatchResult> {
        self.post_json(
            "/matching/resume-text-vacancy-url",
            &json!({ "resumeText": resume_text, "vacancyUrl": vacancy_url }),
        )
        .await
    }

    async fn match_resume_text_to_vacancy_text(
        &self,
        resume_text: String,
        vacancy_text: String,
    ) -> Result<MatchResult> {
        self.post_json(
            "/matching/resume-text-vacancy-text",
            &json!({ "resumeText": resume_text, "vacancyText": vacancy_text }),
        )
        .await
    }

    async fn match_by_ids(&self, resume_id: i64, vacancy_id: i64) -> Result<MatchResult> {
        self.post_json(
            "/resume-vacancy-matches/full",
            &json!({ "resumeId": resume_id, "vacancyId": vacancy_id }),
        )
        .await
    }

    async fn fetch_match_history(&self, page: u32, limit: u32) -> Result<Vec<MatchRecord>> {
        let response: MatchHistoryResponse = self
            .get_json_with_query(
                "/resume-vacancy-matches",
                &[("page", page), ("limit", limit)],
            )
            .await?;
        Ok(response.into_records())
    }

    async fn fetch_match_by_id(&self, id: i64) -> Result<MatchResult> {
        self.get_json(&format!("/matching/{}", id)).await
    }
}
