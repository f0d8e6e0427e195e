use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex as FlightLock;
use url::Url;
use validator::ValidateEmail;

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::matching::{MatchRecord, MatchResult};

pub const RECENT_MATCHES_LIMIT: usize = 5;
pub const MIN_FREE_TEXT_CHARS: usize = 50;

/// How a résumé was supplied for matching.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    File {
        content: Bytes,
        file_name: String,
        email: String,
    },
    Url(String),
    Text(String),
    Record(i64),
}

/// How a vacancy was supplied for matching.
#[derive(Debug, Clone)]
pub enum VacancySource {
    Url(String),
    Text(String),
    Record(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

/// Backend matching operations behind a seam so tests can count calls.
/// `ApiClient` provides the production implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchTransport: Send + Sync {
    async fn match_resume_file_to_vacancy_url(
        &self,
        content: Bytes,
        file_name: String,
        email: String,
        vacancy_url: String,
    ) -> Result<MatchResult>;

    async fn match_resume_file_to_vacancy_text(
        &self,
        content: Bytes,
        file_name: String,
        email: String,
        vacancy_text: String,
    ) -> Result<MatchResult>;

    async fn match_resume_url_to_vacancy_url(
        &self,
        resume_url: String,
        vacancy_url: String,
    ) -> Result<MatchResult>;

    async fn match_resume_url_to_vacancy_text(
        &self,
        resume_url: String,
        vacancy_text: String,
    ) -> Result<MatchResult>;

    async fn match_resume_text_to_vacancy_url(
        &self,
        resume_text: String,
        vacancy_url: String,
    ) -> Result<MatchResult>;

    async fn match_resume_text_to_vacancy_text(
        &self,
        resume_text: String,
        vacancy_text: String,
    ) -> Result<MatchResult>;

    async fn match_by_ids(&self, resume_id: i64, vacancy_id: i64) -> Result<MatchResult>;

    async fn fetch_match_history(&self, page: u32, limit: u32) -> Result<Vec<MatchRecord>>;

    async fn fetch_match_by_id(&self, id: i64) -> Result<MatchResult>;
}

/// Drives the résumé-to-vacancy match flow: validates the source pair,
/// dispatches to the matching backend operation, and caches successful
/// results in a bounded recent buffer.
///
/// Single-flight: at most one `perform_match` per instance may be in
/// flight; a second call is rejected with [`Error::Busy`] while the first
/// is still requesting. Dropping the returned future aborts the request
/// and returns the phase to `Idle`.
pub struct MatchingService<T: MatchTransport = ApiClient> {
    transport: T,
    flight: FlightLock<()>,
    phase: Mutex<MatchPhase>,
    current: Mutex<Option<MatchResult>>,
    recent: Mutex<VecDeque<MatchResult>>,
}

impl<T: MatchTransport> MatchingService<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            flight: FlightLock::new(()),
            phase: Mutex::new(MatchPhase::Idle),
            current: Mutex::new(None),
            recent: Mutex::new(VecDeque::new()),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        *self.phase.lock().expect("phase lock poisoned")
    }

    pub fn current_match(&self) -> Option<MatchResult> {
        self.current.lock().expect("current lock poisoned").clone()
    }

    pub fn clear_current_match(&self) {
        *self.current.lock().expect("current lock poisoned") = None;
    }

    /// Newest-first local cache of performed matches, capped at
    /// [`RECENT_MATCHES_LIMIT`].
    pub fn recent_matches(&self) -> Vec<MatchResult> {
        self.recent
            .lock()
            .expect("recent lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    pub async fn perform_match(
        &self,
        resume: ResumeSource,
        vacancy: VacancySource,
    ) -> Result<MatchResult> {
        let _flight = self.flight.try_lock().map_err(|_| {
            Error::Busy("wait for the current match to finish before starting another".to_string())
        })?;

        validate_sources(&resume, &vacancy)?;

        self.set_phase(MatchPhase::Requesting);
        let reset = PhaseReset { service_phase: &self.phase };

        let result = self.dispatch(resume, vacancy).await;
        std::mem::forget(reset);

        match result {
            Ok(matched) => {
                tracing::info!(score = matched.score, "Match request succeeded");
                self.store_success(matched.clone());
                self.set_phase(MatchPhase::Succeeded);
                Ok(matched)
            }
            Err(e) => {
                tracing::warn!("Match request failed: {}", e);
                self.set_phase(MatchPhase::Failed);
                Err(e)
            }
        }
    }

    /// Exactly one backend operation per source-tag combination. Adding a
    /// source kind forces every arm here to be revisited at compile time.
    async fn dispatch(&self, resume: ResumeSource, vacancy: VacancySource) -> Result<MatchResult> {
        match (resume, vacancy) {
            (
                ResumeSource::File {
                    content,
                    file_name,
                    email,
                },
                VacancySource::Url(vacancy_url),
            ) => {
                self.transport
                    .match_resume_file_to_vacancy_url(content, file_name, email, vacancy_url)
                    .await
            }
            (
                ResumeSource::File {
                    content,
                    file_name,
                    email,
                },
                VacancySource::Text(vacancy_text),
            ) => {
                self.transport
                    .match_resume_file_to_vacancy_text(content, file_name, email, vacancy_text)
                    .await
            }
            (ResumeSource::Url(resume_url), VacancySource::Url(vacancy_url)) => {
                self.transport
                    .match_resume_url_to_vacancy_url(resume_url, vacancy_url)
                    .await
            }
            (ResumeSource::Url(resume_url), VacancySource::Text(vacancy_text)) => {
                self.transport
                    .match_resume_url_to_vacancy_text(resume_url, vacancy_text)
                    .await
            }
            (ResumeSource::Text(resume_text), VacancySource::Url(vacancy_url)) => {
                self.transport
                    .match_resume_text_to_vacancy_url(resume_text, vacancy_url)
                    .await
            }
            (ResumeSource::Text(resume_text), VacancySource::Text(vacancy_text)) => {
                self.transport
                    .match_resume_text_to_vacancy_text(resume_text, vacancy_text)
                    .await
            }
            (ResumeSource::Record(resume_id), VacancySource::Record(vacancy_id)) => {
                self.transport.match_by_ids(resume_id, vacancy_id).await
            }
            (ResumeSource::Record(_), _) | (_, VacancySource::Record(_)) => {
                Err(Error::validation(
                    "source",
                    "stored-record sources must be paired: select both a résumé and a vacancy",
                ))
            }
        }
    }

    /// Paginated server-side match history. Does not touch the recent
    /// buffer or the current match.
    pub async fn fetch_history(&self, page: u32, limit: u32) -> Result<Vec<MatchRecord>> {
        self.transport.fetch_match_history(page, limit).await
    }

    pub async fn fetch_recent(&self) -> Result<Vec<MatchRecord>> {
        self.transport
            .fetch_match_history(1, RECENT_MATCHES_LIMIT as u32)
            .await
    }

    /// Loads a stored match and makes it the current one.
    pub async fn fetch_match_by_id(&self, id: i64) -> Result<MatchResult> {
        let matched = self.transport.fetch_match_by_id(id).await?;
        self.store_success(matched.clone());
        Ok(matched)
    }

    fn store_success(&self, matched: MatchResult) {
        *self.current.lock().expect("current lock poisoned") = Some(matched.clone());
        let mut recent = self.recent.lock().expect("recent lock poisoned");
        recent.push_front(matched);
        recent.truncate(RECENT_MATCHES_LIMIT);
    }

    fn set_phase(&self, phase: MatchPhase) {
        *self.phase.lock().expect("phase lock poisoned") = phase;
    }
}

/// Returns the phase to `Idle` when a `perform_match` future is dropped
/// mid-flight; defused with `mem::forget` once the request completes.
struct PhaseReset<'a> {
    service_phase: &'a Mutex<MatchPhase>,
}

impl Drop for PhaseReset<'_> {
    fn drop(&mut self) {
        *self.service_phase.lock().expect("phase lock poisoned") = MatchPhase::Idle;
    }
}

fn validate_sources(resume: &ResumeSource, vacancy: &VacancySource) -> Result<()> {
    match resume {
        ResumeSource::File { content, email, .. } => {
            if content.is_empty() {
                return Err(Error::validation("resumeFile", "выберите файл резюме"));
            }
            if !email.validate_email() {
                return Err(Error::validation("email", "введите корректный email"));
            }
        }
        ResumeSource::Url(raw) => validate_board_url(raw, "resumeUrl", BoardPage::Resume)?,
        ResumeSource::Text(text) => validate_free_text(text, "resumeText")?,
        ResumeSource::Record(_) => {}
    }

    match vacancy {
        VacancySource::Url(raw) => validate_board_url(raw, "vacancyUrl", BoardPage::Vacancy)?,
        VacancySource::Text(text) => validate_free_text(text, "vacancyText")?,
        VacancySource::Record(_) => {}
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum BoardPage {
    Resume,
    Vacancy,
}

/// Accepts hh.ru résumé/vacancy links, tolerating a pasted leading `@` and
/// surrounding whitespace.
fn validate_board_url(raw: &str, field: &str, page: BoardPage) -> Result<()> {
    let cleaned = raw.trim().trim_start_matches('@').trim();
    let parsed = Url::parse(cleaned)
        .map_err(|_| Error::validation(field, "введите корректную ссылку на hh.ru"))?;

    let scheme_ok = matches!(parsed.scheme(), "http" | "https");
    let host_ok = matches!(parsed.host_str(), Some("hh.ru") | Some("www.hh.ru"));
    if !scheme_ok || !host_ok {
        return Err(Error::validation(field, "введите корректную ссылку на hh.ru"));
    }

    let mut segments = parsed.path_segments().into_iter().flatten();
    let section = segments.next().unwrap_or_default();
    let id = segments.next().unwrap_or_default();
    let shape_ok = match page {
        BoardPage::Resume => {
            section == "resume"
                && !id.is_empty()
                && id.chars().all(|c| c.is_alphanumeric() || c == '_')
        }
        BoardPage::Vacancy => {
            section == "vacancy" && !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
        }
    };
    if !shape_ok {
        let expected = match page {
            BoardPage::Resume => "ссылка должна вести на резюме hh.ru",
            BoardPage::Vacancy => "ссылка должна вести на вакансию hh.ru",
        };
        return Err(Error::validation(field, expected));
    }

    Ok(())
}

fn validate_free_text(text: &str, field: &str) -> Result<()> {
    if text.chars().count() < MIN_FREE_TEXT_CHARS {
        return Err(Error::validation(
            field,
            format!("введите текст (минимум {} символов)", MIN_FREE_TEXT_CHARS),
        ));
    }
    Ok(())
}
