//! Models describing runtime configuration.

pub mod config;
