pub mod args;
pub mod config;
pub mod core;
pub mod encoding;
pub mod errors;
pub mod readwrite;
pub mod reconstruction;
pub mod runner;
pub mod simulation;
pub mod stats;
