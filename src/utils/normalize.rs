//! Pure coercions from loosely-typed backend fields to display shapes.
//! Every function is total: malformed input degrades, it never errors.

use rust_decimal::Decimal;

use crate::models::fields::{EducationField, SkillsField};

pub const NOT_SPECIFIED: &str = "Не указано";
pub const SALARY_NOT_SPECIFIED: &str = "Не указана";

const ACTIVE_SYNONYMS: [&str; 4] = ["active", "активная", "open", "открыта"];
const CLOSED_SYNONYMS: [&str; 2] = ["closed", "закрыта"];

pub const STATUS_ACTIVE_LABEL: &str = "Активная";
pub const STATUS_CLOSED_LABEL: &str = "Закрыта";

/// Canonical skill list out of whatever shape the backend sent.
///
/// List input is passed through with bracket artifacts stripped from the
/// first and last elements. String input is parsed as a JSON array when it
/// looks like one (single quotes coerced to double), otherwise split on
/// commas. Always returns an owned, trimmed, non-empty-element list.
pub fn normalize_skills(input: &SkillsField) -> Vec<String> {
    match input {
        SkillsField::List(items) => {
            let last = items.len().saturating_sub(1);
            items
                .iter()
                .enumerate()
                .map(|(i, raw)| {
                    let mut skill = raw.as_str();
                    if i == 0 {
                        skill = skill.trim_start().trim_start_matches('[');
                    }
                    if i == last {
                        skill = skill.trim_end().trim_end_matches(']');
                    }
                    skill.trim().to_string()
                })
                .filter(|s| !s.is_empty())
                .collect()
        }
        SkillsField::Text(text) => normalize_skills_str(text),
    }
}

fn normalize_skills_str(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        let jsonish = trimmed.replace('\'', "\"");
        if let Ok(parsed) = serde_json::from_str::<Vec<String>>(&jsonish) {
            return parsed
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    trimmed
        .split(',')
        .map(|s| s.replace(['[', ']'], "").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// One display string out of either education shape. Entry fields are
/// joined with `", "`, entries with `"; "`.
pub fn normalize_education(input: Option<&EducationField>) -> String {
    match input {
        Some(EducationField::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Some(EducationField::Entries(entries)) if !entries.is_empty() => entries
            .iter()
            .map(|entry| {
                [
                    entry.degree.as_deref(),
                    entry.direction.as_deref(),
                    entry.specialty.as_deref(),
                ]
                .into_iter()
                .flatten()
                .filter(|s| !s.trim().is_empty())
                .collect::<Vec<_>>()
                .join(", ")
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// The four salary phrasings; currency suffix only when present.
pub fn normalize_salary_range(
    from: Option<&Decimal>,
    to: Option<&Decimal>,
    currency: Option<&str>,
) -> String {
    let suffix = currency
        .map(|c| format!(" {}", c))
        .unwrap_or_default();
    match (from, to) {
        (Some(from), Some(to)) => format!("от {} до {}{}", from, to, suffix),
        (Some(from), None) => format!("от {}{}", from, suffix),
        (None, Some(to)) => format!("до {}{}", to, suffix),
        (None, None) => SALARY_NOT_SPECIFIED.to_string(),
    }
}

/// Case-insensitive mapping of vacancy status synonyms to the two canonical
/// labels; anything unknown passes through unchanged.
pub fn normalize_status_label(raw: &str) -> String {
    if is_active_status(raw) {
        STATUS_ACTIVE_LABEL.to_string()
    } else if is_closed_status(raw) {
        STATUS_CLOSED_LABEL.to_string()
    } else {
        raw.to_string()
    }
}

pub fn is_active_status(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    ACTIVE_SYNONYMS.contains(&lowered.as_str())
}

pub fn is_closed_status(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    CLOSED_SYNONYMS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::EducationEntry;
    use rust_decimal::Decimal;

    fn list(items: &[&str]) -> SkillsField {
        SkillsField::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn plain_list_round_trips() {
        assert_eq!(
            normalize_skills(&list(&["React", "Go"])),
            vec!["React", "Go"]
        );
    }

    #[test]
    fn list_with_bracket_artifacts_is_cleaned() {
        assert_eq!(
            normalize_skills(&list(&["[React", " TypeScript ", "Go]"])),
            vec!["React", "TypeScript", "Go"]
        );
    }

    #[test]
    fn single_quoted_json_string_parses() {
        let field = SkillsField::Text("['React', 'Go']".to_string());
        assert_eq!(normalize_skills(&field), vec!["React", "Go"]);
    }

    #[test]
    fn double_quoted_json_string_parses() {
        let field = SkillsField::Text(r#"["React", "Go"]"#.to_string());
        assert_eq!(normalize_skills(&field), vec!["React", "Go"]);
    }

    #[test]
    fn comma_list_splits() {
        let field = SkillsField::Text("React, Go".to_string());
        assert_eq!(normalize_skills(&field), vec!["React", "Go"]);
    }

    #[test]
    fn unparseable_bracketed_string_falls_back_to_comma_split() {
        let field = SkillsField::Text("[React, Go]".to_string());
        assert_eq!(normalize_skills(&field), vec!["React", "Go"]);
    }

    #[test]
    fn empty_input_yields_empty_vec() {
        assert!(normalize_skills(&SkillsField::Text(String::new())).is_empty());
        assert!(normalize_skills(&SkillsField::Text("  ".to_string())).is_empty());
        assert!(normalize_skills(&SkillsField::List(Vec::new())).is_empty());
    }

    #[test]
    fn education_entries_join_with_separators() {
        let field = EducationField::Entries(vec![
            EducationEntry {
                degree: Some("Бакалавр".to_string()),
                direction: Some("ИТ".to_string()),
                specialty: None,
            },
            EducationEntry {
                degree: Some("Магистр".to_string()),
                direction: None,
                specialty: Some("Разработка ПО".to_string()),
            },
        ]);
        assert_eq!(
            normalize_education(Some(&field)),
            "Бакалавр, ИТ; Магистр, Разработка ПО"
        );
    }

    #[test]
    fn absent_education_yields_placeholder() {
        assert_eq!(normalize_education(None), NOT_SPECIFIED);
        let empty = EducationField::Text("  ".to_string());
        assert_eq!(normalize_education(Some(&empty)), NOT_SPECIFIED);
    }

    #[test]
    fn salary_phrasings() {
        let from = Decimal::from(100_000);
        let to = Decimal::from(180_000);
        assert_eq!(
            normalize_salary_range(Some(&from), Some(&to), Some("RUB")),
            "от 100000 до 180000 RUB"
        );
        assert_eq!(normalize_salary_range(Some(&from), None, None), "от 100000");
        assert_eq!(
            normalize_salary_range(None, Some(&to), Some("₽")),
            "до 180000 ₽"
        );
        assert_eq!(normalize_salary_range(None, None, Some("RUB")), SALARY_NOT_SPECIFIED);
    }

    #[test]
    fn status_synonyms_map_case_insensitively() {
        assert_eq!(normalize_status_label("Active"), STATUS_ACTIVE_LABEL);
        assert_eq!(normalize_status_label("ОТКРЫТА"), STATUS_ACTIVE_LABEL);
        assert_eq!(normalize_status_label("closed"), STATUS_CLOSED_LABEL);
        assert_eq!(normalize_status_label("Закрыта"), STATUS_CLOSED_LABEL);
    }

    #[test]
    fn unknown_status_passes_through() {
        assert_eq!(normalize_status_label("черновик"), "черновик");
    }
}
