pub mod event;
pub mod job;
pub mod payload;
pub mod query;
