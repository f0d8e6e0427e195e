pub mod auth_service;
pub mod candidate_service;
pub mod listing;
pub mod matching_service;
pub mod vacancy_service;
