pub mod config;
pub mod core;
pub mod perception;
pub mod report;
