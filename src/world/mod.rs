pub mod state;
pub mod titles;
