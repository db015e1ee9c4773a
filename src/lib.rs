pub mod app;
pub mod config;
pub mod domain;
pub mod notify;
pub mod submission;
pub mod telemetry;
