pub mod admin;
pub mod help;
pub mod reports;
pub mod shift;
