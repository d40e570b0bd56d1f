pub mod display;
pub mod error;
pub mod filters;
pub mod types;
