//! Command-line demo consumer

pub mod commands;
