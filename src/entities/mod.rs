pub mod player;
pub mod titles;
