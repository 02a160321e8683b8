pub mod admin;
pub mod exams;
pub mod login;
pub mod register;
pub mod users;
