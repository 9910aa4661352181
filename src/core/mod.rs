//! Core client: configuration, auth, request execution and languages

pub mod client;
pub mod config;
pub mod errors;
pub mod executor;
pub mod language;
pub mod models;
pub mod token;
