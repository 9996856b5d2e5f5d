pub mod config;
pub mod environment;
pub mod errors;
pub mod id;
pub mod log;
pub mod routes;
pub mod store;
pub mod submission;
