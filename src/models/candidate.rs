use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::fields::{EducationField, SkillsField};
use crate::utils::normalize::normalize_skills;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "position")]
    pub role: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub education: Option<EducationField>,
    pub work_experience: Vec<WorkExperience>,
    pub hard_skills: Option<SkillsField>,
    pub soft_skills: Option<SkillsField>,
    pub skills: Option<SkillsField>,
    pub status: Option<CandidateState>,
    pub candidate_status: Option<CandidateStatus>,
    pub resume_url: Option<String>,
    pub matched_vacancies: Vec<MatchedVacancy>,
    pub source: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Candidate {
    /// The backend-assigned status takes precedence over the legacy
    /// fixed enumeration, which survives only as a display fallback.
    pub fn display_status(&self) -> Option<String> {
        if let Some(status) = &self.candidate_status {
            return Some(status.title.clone());
        }
        self.status.map(|s| s.display_label().to_string())
    }

    /// Union of all three skill sources, normalized. Duplicates across
    /// sources are kept, matching what the backend actually stores.
    pub fn skills_union(&self) -> Vec<String> {
        let mut all = Vec::new();
        for field in [&self.hard_skills, &self.soft_skills, &self.skills]
            .into_iter()
            .flatten()
        {
            all.extend(normalize_skills(field));
        }
        all
    }
}

/// Work experience entries keep the backend's snake_case field names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperience {
    pub company_name: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub technologies: Vec<String>,
    pub achievements: Vec<String>,
}

impl WorkExperience {
    pub fn period(&self) -> String {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) => format!("{} — {}", start, end),
            (Some(start), None) => start.to_string(),
            (None, Some(end)) => end.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateState {
    New,
    Reviewing,
    Interviewing,
    Offer,
    Rejected,
}

impl CandidateState {
    pub fn display_label(&self) -> &'static str {
        match self {
            CandidateState::New => "Новый",
            CandidateState::Reviewing => "На рассмотрении",
            CandidateState::Interviewing => "На собеседовании",
            CandidateState::Offer => "Предложение",
            CandidateState::Rejected => "Отклонен",
        }
    }
}

/// Richer backend-assigned status, served by `GET /candidate-status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateStatus {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedVacancy {
    pub vacancy_id: i64,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_status_takes_precedence_over_legacy_enum() {
        let candidate = Candidate {
            status: Some(CandidateState::New),
            candidate_status: Some(CandidateStatus {
                id: 3,
                title: "Автоподбор".to_string(),
            }),
            ..Candidate::default()
        };
        assert_eq!(candidate.display_status().as_deref(), Some("Автоподбор"));
    }

    #[test]
    fn legacy_enum_is_the_fallback() {
        let candidate = Candidate {
            status: Some(CandidateState::Rejected),
            ..Candidate::default()
        };
        assert_eq!(candidate.display_status().as_deref(), Some("Отклонен"));
    }

    #[test]
    fn decodes_position_alias_and_string_skills() {
        let candidate: Candidate = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Анна Иванова",
                "position": "Backend Developer",
                "hardSkills": "Java, Spring",
                "skills": ["SQL"]
            }"#,
        )
        .unwrap();
        assert_eq!(candidate.role.as_deref(), Some("Backend Developer"));
        assert_eq!(candidate.skills_union(), vec!["Java", "Spring", "SQL"]);
    }
}
