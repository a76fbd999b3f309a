pub mod analyticsmodels;
pub mod bidmodel;
pub mod projectmodel;
pub mod reviewmodel;
pub mod usermodel;
