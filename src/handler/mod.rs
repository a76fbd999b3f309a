pub mod admin;
pub mod analytics;
pub mod users;
