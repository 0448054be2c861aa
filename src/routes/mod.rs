pub mod exams;
pub mod health;
