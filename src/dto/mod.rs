pub mod auth_dto;
pub mod candidate_dto;
pub mod vacancy_dto;
