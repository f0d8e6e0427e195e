//! Shared list filtering for the entity screens: a tab-derived status
//! predicate AND a case-insensitive substring predicate. Either criterion
//! defaults to "pass" when absent; tab 0 always means "all".

use crate::models::candidate::Candidate;
use crate::models::vacancy::Vacancy;
use crate::utils::normalize::{is_active_status, is_closed_status};

pub const VACANCY_TAB_ALL: usize = 0;
pub const VACANCY_TAB_ACTIVE: usize = 1;
pub const VACANCY_TAB_CLOSED: usize = 2;

pub trait ListEntity {
    fn matches_tab(&self, tab: usize) -> bool;

    /// `query` arrives already lowercased and non-empty.
    fn matches_query(&self, query: &str) -> bool;
}

pub fn filter_list<'a, T: ListEntity>(items: &'a [T], query: &str, tab: usize) -> Vec<&'a T> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| tab == 0 || item.matches_tab(tab))
        .filter(|item| query.is_empty() || item.matches_query(&query))
        .collect()
}

impl ListEntity for Vacancy {
    fn matches_tab(&self, tab: usize) -> bool {
        let status = self.status.as_deref().unwrap_or_default();
        match tab {
            VACANCY_TAB_ACTIVE => is_active_status(status),
            VACANCY_TAB_CLOSED => is_closed_status(status),
            _ => true,
        }
    }

    fn matches_query(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
    }
}

impl ListEntity for Candidate {
    /// Tab n selects the backend-assigned status with id n; candidates
    /// without one only show under "all".
    fn matches_tab(&self, tab: usize) -> bool {
        self.candidate_status
            .as_ref()
            .map(|status| status.id == tab as i64)
            .unwrap_or(false)
    }

    fn matches_query(&self, query: &str) -> bool {
        if self.name.to_lowercase().contains(query) {
            return true;
        }
        if let Some(role) = &self.role {
            if role.to_lowercase().contains(query) {
                return true;
            }
        }
        self.skills_union()
            .iter()
            .any(|skill| skill.to_lowercase().contains(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateStatus;
    use crate::models::fields::SkillsField;

    fn vacancy(id: i64, title: &str, status: &str) -> Vacancy {
        Vacancy {
            id,
            title: title.to_string(),
            status: Some(status.to_string()),
            ..Vacancy::default()
        }
    }

    #[test]
    fn empty_query_on_tab_zero_returns_everything() {
        let items = vec![
            vacancy(1, "Backend", "active"),
            vacancy(2, "Frontend", "Активная"),
            vacancy(3, "QA", "open"),
            vacancy(4, "Lead", "закрыта"),
        ];
        assert_eq!(filter_list(&items, "", VACANCY_TAB_ALL).len(), 4);
    }

    #[test]
    fn active_tab_matches_synonyms_in_any_case() {
        let items = vec![
            vacancy(1, "Backend", "active"),
            vacancy(2, "Frontend", "Активная"),
            vacancy(3, "QA", "Открыта"),
            vacancy(4, "Lead", "closed"),
        ];
        let active = filter_list(&items, "", VACANCY_TAB_ACTIVE);
        assert_eq!(active.len(), 3);
        let closed = filter_list(&items, "", VACANCY_TAB_CLOSED);
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].id, 4);
    }

    #[test]
    fn query_and_tab_compose() {
        let items = vec![
            vacancy(1, "Rust Backend", "active"),
            vacancy(2, "Rust Backend", "closed"),
            vacancy(3, "Go Backend", "active"),
        ];
        let found = filter_list(&items, "rust", VACANCY_TAB_ACTIVE);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn candidate_search_covers_name_role_and_all_skill_sources() {
        let candidate = Candidate {
            id: 1,
            name: "Анна Иванова".to_string(),
            role: Some("Backend Developer".to_string()),
            hard_skills: Some(SkillsField::Text("Kotlin, PostgreSQL".to_string())),
            soft_skills: Some(SkillsField::List(vec!["Communication".to_string()])),
            ..Candidate::default()
        };
        let items = vec![candidate];

        for query in ["анна", "backend", "postgresql", "communication"] {
            assert_eq!(filter_list(&items, query, 0).len(), 1, "query {}", query);
        }
        assert!(filter_list(&items, "golang", 0).is_empty());
    }

    #[test]
    fn candidate_tabs_select_backend_status_ids() {
        let with_status = |id| Candidate {
            id,
            name: format!("c{}", id),
            candidate_status: Some(CandidateStatus {
                id,
                title: "x".to_string(),
            }),
            ..Candidate::default()
        };
        let items = vec![with_status(1), with_status(2), Candidate::default()];

        assert_eq!(filter_list(&items, "", 0).len(), 3);
        assert_eq!(filter_list(&items, "", 2).len(), 1);
        assert_eq!(filter_list(&items, "", 4).len(), 0);
    }
}
