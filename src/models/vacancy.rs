use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::fields::SkillsField;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vacancy {
    pub id: i64,
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
    pub skills: Option<SkillsField>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub original_id: Option<String>,
    pub format_work: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Dashboard counters from `GET /vacancies/stats`. The backend returns a
/// loose map, so every counter is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VacancyStats {
    pub total_vacancies: Option<i64>,
    pub active_vacancies: Option<i64>,
    pub total_candidates: Option<i64>,
    pub high_score_candidates: Option<i64>,
    pub matches_today: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_skills_as_array_string_or_null() {
        let as_array: Vacancy =
            serde_json::from_str(r#"{"id":1,"title":"Dev","skills":["Rust","Go"]}"#).unwrap();
        assert_eq!(
            as_array.skills,
            Some(SkillsField::List(vec!["Rust".to_string(), "Go".to_string()]))
        );

        let as_string: Vacancy =
            serde_json::from_str(r#"{"id":2,"title":"Dev","skills":"['Rust', 'Go']"}"#).unwrap();
        assert_eq!(
            as_string.skills,
            Some(SkillsField::Text("['Rust', 'Go']".to_string()))
        );

        let as_null: Vacancy =
            serde_json::from_str(r#"{"id":3,"title":"Dev","skills":null}"#).unwrap();
        assert!(as_null.skills.is_none());
    }

    #[test]
    fn decodes_backend_timestamp_without_offset() {
        let vacancy: Vacancy = serde_json::from_str(
            r#"{"id":3,"title":"Dev","createdAt":"2025-06-01T09:30:00"}"#,
        )
        .unwrap();
        assert!(vacancy.created_at.is_some());
    }
}
