use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::fields::SkillsField;

/// A backend-computed compatibility assessment between one résumé and one
/// vacancy. Immutable once received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchResult {
    pub score: f64,
    pub verdict: Option<String>,
    pub matched_skills: Vec<String>,
    pub unmatched_skills: Vec<String>,
    pub positives: Vec<String>,
    pub negatives: Vec<String>,
    pub llm_comment: Option<String>,
    pub clarifying_questions: Vec<String>,
}

/// Stored match as returned by the history endpoints. Skill lists here come
/// from jsonb columns and may arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: i64,
    pub resume_id: Option<i64>,
    pub vacancy_id: Option<i64>,
    pub score: Option<f64>,
    pub verdict: Option<String>,
    pub matched_skills: Option<SkillsField>,
    pub unmatched_skills: Option<SkillsField>,
    pub llm_comment: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// `GET /resume-vacancy-matches` has shipped both a bare array and a
/// `{data: [...]}` wrapper; decode both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MatchHistoryResponse {
    Plain(Vec<MatchRecord>),
    Wrapped { data: Vec<MatchRecord> },
}

impl MatchHistoryResponse {
    pub fn into_records(self) -> Vec<MatchRecord> {
        match self {
            MatchHistoryResponse::Plain(records) => records,
            MatchHistoryResponse::Wrapped { data } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_decodes_bare_array_and_wrapped_forms() {
        let bare: MatchHistoryResponse =
            serde_json::from_str(r#"[{"id":1,"score":0.9},{"id":2}]"#).unwrap();
        assert_eq!(bare.into_records().len(), 2);

        let wrapped: MatchHistoryResponse =
            serde_json::from_str(r#"{"data":[{"id":3,"resumeId":5,"vacancyId":9}]}"#).unwrap();
        let records = wrapped.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].resume_id, Some(5));
    }

    #[test]
    fn match_result_defaults_optional_sections() {
        let result: MatchResult =
            serde_json::from_str(r#"{"score":0.42,"verdict":"ok"}"#).unwrap();
        assert!(result.matched_skills.is_empty());
        assert!(result.clarifying_questions.is_empty());
        assert!(result.llm_comment.is_none());
    }
}
