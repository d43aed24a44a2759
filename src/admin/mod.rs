pub mod commands;
pub mod reports;
pub mod security;
pub mod titles;
