pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::services::{
    auth_service::AuthService, candidate_service::CandidateService,
    matching_service::MatchingService, vacancy_service::VacancyService,
};
use crate::session::SessionStore;

/// Everything a frontend needs, wired over one shared HTTP client and one
/// session store.
#[derive(Clone)]
pub struct ClientState {
    pub auth_service: AuthService,
    pub vacancy_service: VacancyService,
    pub candidate_service: CandidateService,
    pub matching_service: Arc<MatchingService>,
}

impl ClientState {
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        let session = Arc::new(SessionStore::open(config.session_file.clone()));
        let api = ApiClient::new(config, session.clone())?;

        let auth_service = AuthService::new(api.clone(), session);
        let vacancy_service = VacancyService::new(api.clone());
        let candidate_service = CandidateService::new(api.clone());
        let matching_service = Arc::new(MatchingService::new(api));

        Ok(Self {
            auth_service,
            vacancy_service,
            candidate_service,
            matching_service,
        })
    }
}
