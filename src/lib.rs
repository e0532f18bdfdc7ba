pub mod app;
pub mod catalog;
pub mod client;
pub mod config;
pub mod shared;
pub mod tui;
pub mod workflow;
