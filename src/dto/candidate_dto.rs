use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub education: Option<String>,
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub education: Option<String>,
    pub hard_skills: Option<Vec<String>>,
    pub soft_skills: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
}

/// Body of `POST /resumes/update-status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidateStatusRequest {
    pub resume_id: i64,
    pub status_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_request_uses_backend_field_names() {
        let request = UpdateCandidateStatusRequest {
            resume_id: 10,
            status_id: 4,
        };
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["resumeId"], 10);
        assert_eq!(encoded["statusId"], 4);
    }
}
