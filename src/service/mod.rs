pub mod error;
pub mod performance_service;
pub mod provision_service;
pub mod rating_service;
