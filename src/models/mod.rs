pub mod candidate;
pub mod fields;
pub mod matching;
pub mod user;
pub mod vacancy;
