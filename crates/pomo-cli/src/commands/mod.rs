pub mod clear;
pub mod config;
pub mod session;
pub mod stats;
