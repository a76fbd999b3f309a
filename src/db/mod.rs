pub mod analyticsdb;
pub mod db;
pub mod ratingdb;
pub mod relationaldb;
pub mod userdb;
pub mod viewdb;
