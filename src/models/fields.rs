use serde::{Deserialize, Serialize};

/// Skill lists drift across backends: a native JSON array, a bracketed
/// pseudo-JSON string (sometimes single-quoted), or a plain comma list.
/// Decoding keeps the raw shape; `utils::normalize::normalize_skills`
/// produces the canonical `Vec<String>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SkillsField {
    List(Vec<String>),
    Text(String),
}

impl Default for SkillsField {
    fn default() -> Self {
        SkillsField::List(Vec::new())
    }
}

impl From<Vec<String>> for SkillsField {
    fn from(list: Vec<String>) -> Self {
        SkillsField::List(list)
    }
}

/// Education arrives either as one free-text string or as a structured
/// record list, depending on how the résumé was imported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EducationField {
    Text(String),
    Entries(Vec<EducationEntry>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub direction: Option<String>,
    pub specialty: Option<String>,
}
