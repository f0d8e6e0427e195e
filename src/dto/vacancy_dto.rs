use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vacancy::Vacancy;
use crate::utils::normalize::normalize_skills;

/// Appended to the title when duplicating a vacancy.
pub const COPY_SUFFIX: &str = " (копия)";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub currency: Option<String>,
    pub experience: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub skills: Vec<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
}

impl CreateVacancyPayload {
    /// Creation payload for a duplicate: identity and creation timestamp
    /// are left behind, the title gets the copy marker.
    pub fn duplicate_of(vacancy: &Vacancy) -> Self {
        Self {
            title: format!("{}{}", vacancy.title, COPY_SUFFIX),
            company: vacancy.company.clone(),
            location: vacancy.location.clone(),
            salary_from: vacancy.salary_from,
            salary_to: vacancy.salary_to,
            currency: vacancy.currency.clone(),
            experience: vacancy.experience.clone(),
            description: vacancy.description.clone(),
            requirements: vacancy.requirements.clone(),
            responsibilities: vacancy.responsibilities.clone(),
            skills: vacancy
                .skills
                .as_ref()
                .map(normalize_skills)
                .unwrap_or_default(),
            status: vacancy.status.clone(),
            source: vacancy.source.clone(),
            url: vacancy.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub currency: Option<String>,
    pub experience: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub skills: Option<Vec<String>>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
}

/// Structured brief for `POST /vacancies/generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateVacancyPayload {
    #[validate(length(min = 1))]
    pub position: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub required_skills: Vec<String>,
    pub experience_years: i32,
    #[validate(length(min = 1))]
    pub location: String,
    pub salary_range: Option<String>,
    pub company_description: Option<String>,
    pub additional_info: Option<String>,
}

/// Job boards the parser service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportSource {
    Hh,
    Habr,
    Getmatch,
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportSource::Hh => "hh",
            ImportSource::Habr => "habr",
            ImportSource::Getmatch => "getmatch",
        };
        f.write_str(name)
    }
}

impl FromStr for ImportSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hh" => Ok(ImportSource::Hh),
            "habr" => Ok(ImportSource::Habr),
            "getmatch" => Ok(ImportSource::Getmatch),
            other => Err(format!(
                "unknown source '{}', expected hh, habr or getmatch",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseVacancyRequest {
    pub source: ImportSource,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::SkillsField;

    #[test]
    fn duplicate_strips_identity_and_marks_the_title() {
        let vacancy = Vacancy {
            id: 42,
            title: "Rust-разработчик".to_string(),
            company: Some("Tech Solutions".to_string()),
            skills: Some(SkillsField::Text("['Rust', 'Tokio']".to_string())),
            created_at: Some(
                chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            ),
            ..Vacancy::default()
        };

        let payload = CreateVacancyPayload::duplicate_of(&vacancy);
        assert!(payload.title.ends_with(COPY_SUFFIX));
        assert_eq!(payload.skills, vec!["Rust", "Tokio"]);

        let encoded = serde_json::to_value(&payload).unwrap();
        assert!(encoded.get("id").is_none());
        assert!(encoded.get("createdAt").is_none());
    }

    #[test]
    fn import_source_parses_and_serializes_lowercase() {
        assert_eq!("HH".parse::<ImportSource>().unwrap(), ImportSource::Hh);
        assert!("linkedin".parse::<ImportSource>().is_err());
        let request = ParseVacancyRequest {
            source: ImportSource::Getmatch,
            url: "https://getmatch.ru/vacancies/1".to_string(),
        };
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["source"], "getmatch");
    }
}
