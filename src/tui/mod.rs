pub mod navigation;
pub mod screens;
pub mod state;
pub mod workflow;
