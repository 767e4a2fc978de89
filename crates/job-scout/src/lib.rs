pub mod backend;
pub mod config;
pub mod errors;
pub mod extract;
pub mod models;
pub mod search;
pub mod sheets;
