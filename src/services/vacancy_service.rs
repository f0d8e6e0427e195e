use std::sync::{Arc, RwLock};

use validator::Validate;

use crate::api::ApiClient;
use crate::dto::vacancy_dto::{
    CreateVacancyPayload, GenerateVacancyPayload, ImportSource, ParseVacancyRequest,
    UpdateVacancyPayload,
};
use crate::error::{Error, Result};
use crate::models::vacancy::{Vacancy, VacancyStats};
use crate::services::listing::filter_list;

/// Vacancy list controller. Mutations follow refresh-after-write: each
/// successful backend call re-fetches the whole collection, trading a
/// round-trip for never having to reconcile local patches. A failed call
/// leaves the cached list untouched.
#[derive(Clone)]
pub struct VacancyService {
    api: ApiClient,
    items: Arc<RwLock<Vec<Vacancy>>>,
}

impl VacancyService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn load(&self) -> Result<Vec<Vacancy>> {
        let fetched: Vec<Vacancy> = self.api.get_json("/vacancies").await?;
        *self.items.write().expect("vacancy cache poisoned") = fetched.clone();
        Ok(fetched)
    }

    pub fn items(&self) -> Vec<Vacancy> {
        self.items.read().expect("vacancy cache poisoned").clone()
    }

    /// Filtered view over the cached collection; tab 0 = all, 1 = active,
    /// 2 = closed.
    pub fn filtered(&self, query: &str, tab: usize) -> Vec<Vacancy> {
        let items = self.items.read().expect("vacancy cache poisoned");
        filter_list(&items, query, tab)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: i64) -> Result<Vacancy> {
        self.api.get_json(&format!("/vacancies/{}", id)).await
    }

    pub async fn create(&self, payload: &CreateVacancyPayload) -> Result<Vec<Vacancy>> {
        payload.validate()?;
        let _created: Vacancy = self.api.post_json("/vacancies", payload).await?;
        self.load().await
    }

    pub async fn update(&self, id: i64, payload: &UpdateVacancyPayload) -> Result<Vec<Vacancy>> {
        payload.validate()?;
        let _updated: Vacancy = self.api.put_json(&format!("/vacancies/{}", id), payload).await?;
        self.load().await
    }

    pub async fn delete(&self, id: i64) -> Result<Vec<Vacancy>> {
        self.api.delete(&format!("/vacancies/{}", id)).await?;
        self.load().await
    }

    pub async fn duplicate(&self, vacancy: &Vacancy) -> Result<Vec<Vacancy>> {
        let payload = CreateVacancyPayload::duplicate_of(vacancy);
        self.create(&payload).await
    }

    /// Toggles between active and closed by re-sending the cached vacancy
    /// with only its status replaced.
    pub async fn set_status(&self, id: i64, status: &str) -> Result<Vec<Vacancy>> {
        let mut vacancy = self
            .items
            .read()
            .expect("vacancy cache poisoned")
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| Error::validation("id", "вакансия не найдена в загруженном списке"))?;
        vacancy.status = Some(status.to_string());
        let _updated: Vacancy = self
            .api
            .put_json(&format!("/vacancies/{}", id), &vacancy)
            .await?;
        self.load().await
    }

    /// Imports a vacancy from a job board via the parser service.
    pub async fn import(&self, source: ImportSource, url: &str) -> Result<Vec<Vacancy>> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::validation("url", "введите ссылку"));
        }
        if !url.starts_with("http") {
            return Err(Error::validation(
                "url",
                "ссылка должна начинаться с http:// или https://",
            ));
        }
        let request = ParseVacancyRequest {
            source,
            url: url.to_string(),
        };
        self.api
            .post_json_expect_ok("/vacancies/parse", &request)
            .await?;
        self.load().await
    }

    /// AI-generates a vacancy from a structured brief; the backend stores
    /// it, so the list is refreshed afterwards.
    pub async fn generate(&self, brief: &GenerateVacancyPayload) -> Result<Vacancy> {
        brief.validate()?;
        let generated: Vacancy = self.api.post_json("/vacancies/generate", brief).await?;
        self.load().await?;
        Ok(generated)
    }

    pub async fn stats(&self) -> Result<VacancyStats> {
        self.api.get_json("/vacancies/stats").await
    }
}
