//! bookdesk: booking normalization for the tutoring-platform admin tools

pub mod cli;
pub mod config;
pub mod services;
pub mod store;
pub mod types;
